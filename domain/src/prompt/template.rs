//! Prompt templates for each comparison mode
//!
//! Pure string construction: identical inputs always produce identical
//! prompts, and inputs are inserted verbatim without validation.

/// Templates for generating the prompt sent to every provider
pub struct PromptTemplate;

impl PromptTemplate {
    /// Translation only, no explanation, between two named languages
    pub fn translation(text: &str, source_language: &str, target_language: &str) -> String {
        format!(
            r#"Translate the following text from {source_language} to {target_language}:

"{text}"

Provide only the translation without additional explanation."#
        )
    }

    /// Correctness verdict, error explanation and corrected version
    pub fn grammar(text: &str, source_language: &str, response_language: &str) -> String {
        format!(
            r#"You are a grammar checker. Your ONLY task is to check if the grammar is correct.

Given text: "{text}"
Source language: {source_language}

Check the grammar and provide:
1. Whether it's correct or incorrect
2. Explanation of any errors
3. Corrected version if needed

Respond in {response_language}."#
        )
    }

    /// Register, appropriate contexts and cultural nuance of an expression
    pub fn usage(text: &str, source_language: &str, response_language: &str) -> String {
        format!(
            r#"You are a language usage analyzer.

Given text: "{text}"
Source language: {source_language}

Analyze the usage of this phrase/expression:
1. Is it formal/informal/colloquial?
2. When is it appropriate to use?
3. Common contexts where it appears
4. Any cultural nuances

Respond in {response_language}."#
        )
    }

    /// Re-send the original task and the provider's own answer with a new question
    ///
    /// Providers keep no conversation state, so the whole prior exchange
    /// travels as plain text on every follow-up.
    pub fn follow_up(original_prompt: &str, original_response: &str, question: &str) -> String {
        format!(
            r#"Original task: {original_prompt}

Your previous response: {original_response}

Follow-up question: {question}

Please answer the follow-up question in the context of your previous response."#
        )
    }
}
