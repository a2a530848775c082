//! Prompt construction for translate, grammar, usage and follow-up requests

pub mod mode;
pub mod template;

pub use mode::{ComparisonMode, TARGET_LANGUAGES, language_name};
pub use template::PromptTemplate;
