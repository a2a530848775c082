//! Console output formatter for comparison results

use crate::output::board::Slot;
use colored::Colorize;
use comparator_domain::{ProviderDescriptor, UsageCounter, UsageSummary};
use serde_json::json;

/// Formats comparison results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every slot under a common header
    pub fn format_board(title: &str, input: &str, slots: &[Slot]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(title));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Input:".cyan().bold(), input));

        for slot in slots {
            let label = format!("── {} ──", slot.display_name);
            let label = if slot.is_success() {
                label.yellow().bold()
            } else {
                label.red().bold()
            };
            output.push_str(&format!("\n{}\n{}\n", label, slot.body()));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format slots as JSON
    pub fn format_board_json(input: &str, slots: &[Slot]) -> String {
        let value = json!({
            "input": input,
            "results": slots,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_follow_up(display_name: &str, question: &str, answer: &str) -> String {
        format!(
            "{} {}\n\n{}\n{}\n",
            "Q:".bold(),
            question,
            format!("── {} ──", display_name).yellow().bold(),
            answer
        )
    }

    /// Format the usage summary: totals, then providers busiest first
    pub fn format_usage(summary: &UsageSummary) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Estimated usage"));
        output.push_str(&Self::usage_line("Today", &summary.today));
        output.push_str(&Self::usage_line("This month", &summary.this_month));
        output.push_str(&Self::usage_line("Total", &summary.total));

        if summary.providers.is_empty() {
            output.push_str(&format!("\n{}\n", "No calls recorded yet.".dimmed()));
            return output;
        }

        output.push_str(&Self::section_header("By provider"));
        for provider in &summary.providers {
            output.push_str(&format!(
                "  {:<12} {:>6} calls  ${:.4}\n",
                provider.provider_id.as_str(),
                provider.calls,
                provider.estimated_cost
            ));
        }
        output
    }

    pub fn format_usage_json(summary: &UsageSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
    }

    /// List providers; `available` marks those registered with a key
    pub fn format_providers(providers: &[(ProviderDescriptor, bool)]) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Providers"));
        for (descriptor, available) in providers {
            let status = if *available {
                "available".green()
            } else {
                "no API key".dimmed()
            };
            let default_marker = if descriptor.enabled_by_default { "*" } else { " " };
            output.push_str(&format!(
                "{} {:<12} {:<20} {:<36} {}\n",
                default_marker,
                descriptor.id.as_str(),
                descriptor.display_name,
                descriptor.default_model,
                status
            ));
        }
        output.push_str(&format!("\n{}\n", "* compared by default".dimmed()));
        output
    }

    pub fn format_providers_json(providers: &[(ProviderDescriptor, bool)]) -> String {
        let entries: Vec<_> = providers
            .iter()
            .map(|(descriptor, available)| {
                json!({
                    "provider": descriptor,
                    "available": available,
                })
            })
            .collect();
        serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
    }

    fn usage_line(label: &str, counter: &UsageCounter) -> String {
        format!(
            "  {:<12} {:>6} calls  ${:.4}\n",
            label, counter.calls, counter.estimated_cost
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
