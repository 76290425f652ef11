//! Interfaces to the services the dashboard depends on.
//!
//! Authentication, bill extraction and the chat assistant run elsewhere;
//! only their request and response types and the checks around them live
//! here. Transactions can be kept locally in a [JsonFileStore].

mod auth;
mod bill;
mod chat;
mod store;

pub use auth::{Authenticator, Credentials, Session};
pub use bill::{
    BillExtractor, ExtractedBill, LineItem, MAX_BILL_SIZE, parse_extraction_reply,
    validate_bill_upload,
};
pub use chat::{ChatAssistant, ChatRequest, FALLBACK_ANSWER, SYSTEM_PROMPT, ask};
pub use store::{JsonFileStore, TransactionStore};
