//! Progress reporting while providers are being called

use colored::Colorize;
use comparator_application::OutcomeSink;
use comparator_domain::{CallOutcome, ProviderDescriptor, ProviderId};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// One spinner per dispatched provider, finished as each one settles
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<ProviderId, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn finished_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("  {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeSink for ProgressReporter {
    fn on_dispatch(&self, providers: &[ProviderDescriptor]) {
        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        for descriptor in providers {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb.set_prefix(descriptor.display_name.clone());
            pb.set_message("waiting...");
            pb.enable_steady_tick(Duration::from_millis(100));
            bars.insert(descriptor.id.clone(), pb);
        }
    }

    fn on_outcome(&self, outcome: &CallOutcome) {
        let bar = self
            .bars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(outcome.provider_id());
        if let Some(pb) = bar {
            pb.set_style(Self::finished_style());
            let status = match outcome.error() {
                None => format!("{} done", "✓".green()),
                Some(error) => format!("{} {}", "✗".red(), error),
            };
            pb.finish_with_message(status);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl OutcomeSink for SimpleProgress {
    fn on_dispatch(&self, providers: &[ProviderDescriptor]) {
        let names: Vec<&str> = providers.iter().map(|d| d.display_name.as_str()).collect();
        eprintln!("{} Asking {}", "->".cyan(), names.join(", ").bold());
    }

    fn on_outcome(&self, outcome: &CallOutcome) {
        if outcome.is_success() {
            eprintln!("  {} {}", "✓".green(), outcome.provider_id());
        } else {
            eprintln!(
                "  {} {} ({})",
                "✗".red(),
                outcome.provider_id(),
                outcome.display_text()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comparator_domain::{CallError, ProviderKind};

    #[test]
    fn test_reporter_drops_settled_bars() {
        let reporter = ProgressReporter::new();
        reporter.on_dispatch(&[
            ProviderKind::Grok.descriptor(),
            ProviderKind::DeepSeek.descriptor(),
        ]);
        reporter.on_outcome(&CallOutcome::success("grok", "Hola"));
        reporter.on_outcome(&CallOutcome::failure(
            "deepseek",
            CallError::exhausted("DeepSeek", 3, None),
        ));

        assert!(reporter.bars.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reporter_ignores_undispatched_outcome() {
        let reporter = ProgressReporter::new();
        reporter.on_dispatch(&[ProviderKind::Grok.descriptor()]);
        reporter.on_outcome(&CallOutcome::success("claude", "Hola"));

        assert_eq!(reporter.bars.lock().unwrap().len(), 1);
    }
}
