//! Core domain concepts shared across all subdomains.
//!
//! - [`prompt::Prompt`] — the validated text fanned out to providers
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod prompt;
