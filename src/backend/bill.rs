//! Receipt uploads and the structured bill the extraction backend returns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    Error,
    transaction::{RawTransaction, TransactionType, parse_amount},
};

/// The largest bill image accepted for extraction, in bytes.
pub const MAX_BILL_SIZE: usize = 10 * 1024 * 1024;

const DEFAULT_MERCHANT: &str = "Unknown";
const DEFAULT_CATEGORY: &str = "Other";

/// One line of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// What was bought.
    pub name: String,
    /// What it cost.
    pub price: f64,
}

/// The fields read from a receipt image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedBill {
    /// The bill date as written by the backend, usually "YYYY-MM-DD". May be empty.
    pub date: String,
    /// The store name.
    pub merchant: String,
    /// The spending category.
    pub category: String,
    /// The bill total.
    pub total_amount: f64,
    /// The individual items on the bill.
    pub items: Vec<LineItem>,
}

impl ExtractedBill {
    /// Convert the bill into an expense record ready to be stored.
    ///
    /// A blank date is left out so the store's creation timestamp dates the record.
    pub fn into_record(self) -> RawTransaction {
        let items: Vec<Value> = self
            .items
            .into_iter()
            .map(|item| serde_json::json!({"name": item.name, "price": item.price}))
            .collect();

        let mut record = RawTransaction::new();
        if !self.date.trim().is_empty() {
            record.set("date", self.date);
        }

        record
            .with("merchant", self.merchant)
            .with("category", self.category)
            .with("total_amount", self.total_amount)
            .with("type", TransactionType::Expense.as_str())
            .with("items", items)
    }
}

/// Reads information from bill images.
pub trait BillExtractor {
    /// Extract the bill fields from `image`, an image of type `content_type`.
    fn extract(&self, image: &[u8], content_type: &str) -> Result<ExtractedBill, Error>;
}

/// Check an upload before it is sent to a [BillExtractor].
///
/// # Errors
/// Returns [Error::NotAnImage] if `content_type` is missing or not an image
/// type, and [Error::FileTooLarge] if `size` exceeds [MAX_BILL_SIZE].
pub fn validate_bill_upload(content_type: Option<&str>, size: usize) -> Result<(), Error> {
    if !content_type.is_some_and(|content_type| content_type.starts_with("image/")) {
        return Err(Error::NotAnImage);
    }

    if size > MAX_BILL_SIZE {
        return Err(Error::FileTooLarge(size, MAX_BILL_SIZE));
    }

    Ok(())
}

/// Parse the text reply of an extraction model into an [ExtractedBill].
///
/// The reply may be wrapped in a Markdown code fence. Missing fields get
/// defaults: an empty date, "Unknown" merchant, "Other" category and a zero
/// total. Amounts given as numeric strings are accepted.
///
/// # Errors
/// Returns [Error::EmptyExtraction] if the reply is blank and
/// [Error::InvalidExtraction] if it is not a JSON object.
pub fn parse_extraction_reply(reply: &str) -> Result<ExtractedBill, Error> {
    let text = strip_code_fence(reply);

    if text.is_empty() {
        return Err(Error::EmptyExtraction);
    }

    let fields: Map<String, Value> = serde_json::from_str(text).map_err(|error| {
        tracing::error!("could not parse the extraction reply: {error}");
        Error::InvalidExtraction(error.to_string())
    })?;

    let text_field = |key: &str, default: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_owned()
    };

    let items: Vec<LineItem> = fields
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_line_item).collect())
        .unwrap_or_default();

    Ok(ExtractedBill {
        date: text_field("date", ""),
        merchant: text_field("merchant", DEFAULT_MERCHANT),
        category: text_field("category", DEFAULT_CATEGORY),
        total_amount: fields
            .get("total_amount")
            .and_then(parse_amount)
            .unwrap_or(0.0),
        items,
    })
}

fn parse_line_item(value: &Value) -> Option<LineItem> {
    let item = value.as_object()?;

    Some(LineItem {
        name: item.get("name")?.as_str()?.to_owned(),
        price: item.get("price").and_then(parse_amount).unwrap_or(0.0),
    })
}

fn strip_code_fence(reply: &str) -> &str {
    let text = reply.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);

    text.trim()
}
