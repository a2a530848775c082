//! Provider call results: the adapter/governor error taxonomy and the
//! per-provider [`CallOutcome`] delivered to callers.

pub mod error;
pub mod outcome;

pub use error::{CallError, ProviderError};
pub use outcome::CallOutcome;
