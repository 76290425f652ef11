//! Questions to the finance chat assistant.

use serde::{Deserialize, Serialize};

use crate::{Error, transaction::RawTransaction};

/// The instructions given to the assistant with every question.
///
/// [ChatAssistant] implementations send this as the system message, followed
/// by [ChatRequest::prompt] as the user message.
pub const SYSTEM_PROMPT: &str = "You are a helpful personal finance assistant. \
    Answer the user's questions about their spending based on the transaction data provided. \
    Be concise, helpful, and provide specific numbers when relevant. \
    If asked about trends, calculate percentages and comparisons.";

/// The answer shown when the assistant replies with nothing.
pub const FALLBACK_ANSWER: &str = "I couldn't process your question.";

/// A question about the user's finances, sent with the transactions it is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question.
    pub question: String,
    /// The transactions the assistant may use to answer.
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
}

impl ChatRequest {
    /// The prompt text combining the transaction data and the question.
    ///
    /// # Errors
    /// Returns [Error::JSONSerializationError] if the transactions cannot be
    /// serialized.
    pub fn prompt(&self) -> Result<String, Error> {
        let transaction_data = serde_json::to_string_pretty(&self.transactions)?;

        Ok(format!(
            "Transaction Data:\n{transaction_data}\n\nUser Question: {}",
            self.question
        ))
    }
}

/// Answers free-text questions about the user's finances.
pub trait ChatAssistant {
    /// Answer `request`. An empty answer is allowed.
    fn answer(&self, request: &ChatRequest) -> Result<String, Error>;
}

/// Ask `assistant` a question, replacing a blank answer with [FALLBACK_ANSWER].
pub fn ask(assistant: &impl ChatAssistant, request: &ChatRequest) -> Result<String, Error> {
    let answer = assistant.answer(request).inspect_err(|error| {
        tracing::error!("chat assistant failed to answer: {error}");
    })?;

    if answer.trim().is_empty() {
        Ok(FALLBACK_ANSWER.to_owned())
    } else {
        Ok(answer)
    }
}
