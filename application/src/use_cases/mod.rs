//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod compare_providers;
pub mod governed_call;
