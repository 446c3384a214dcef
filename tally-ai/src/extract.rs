//! Statement extraction: raw statement text in, validated transactions out.
//!
//! The model is asked for a strict JSON object, but nothing enforces that
//! on the wire — the response is treated as untrusted input and validated
//! field by field. Entries that fail validation are dropped, not guessed at.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use tally_core::{Transaction, TxKind};

use crate::client::{chat_complete, AiConfig, ChatTurn};

const EXTRACT_SYSTEM: &str = "You convert bank statement text into structured \
data. Respond with ONLY a JSON object of the shape \
{\"transactions\": [{\"date\": \"YYYY-MM-DD\", \"amount\": -12.50, \
\"category\": \"Dining\", \"note\": \"Cafe\", \"type\": \"expense\"}]}. \
The type field must be one of income, expense, or investment. No prose, \
no Markdown.";

/// Extract transactions from raw statement text via the chat API.
///
/// Each accepted entry gets a freshly generated unique id.
pub async fn extract_statement(config: &AiConfig, statement_text: &str) -> Result<Vec<Transaction>> {
    let content = chat_complete(config, EXTRACT_SYSTEM, &[ChatTurn::user(statement_text)]).await?;
    let txns = parse_extraction(&content)?;
    tracing::info!(count = txns.len(), "extracted transactions from statement");
    Ok(txns)
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    transactions: Vec<RawTransaction>,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Parse and validate a model response. Invalid entries are skipped; a
/// response with no recognizable JSON object at all is an error.
pub fn parse_extraction(content: &str) -> Result<Vec<Transaction>> {
    let body = strip_code_fences(content)?;
    let raw: RawResponse = serde_json::from_str(body)
        .context("model response was not the expected JSON object")?;
    Ok(raw.transactions.into_iter().filter_map(validate_row).collect())
}

fn strip_code_fences(content: &str) -> Result<&str> {
    let fence = Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```")?;
    let body = fence
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(content)
        .trim();

    // Models sometimes wrap the object in prose; keep the outermost braces.
    if body.starts_with('{') {
        return Ok(body);
    }
    match (body.find('{'), body.rfind('}')) {
        (Some(open), Some(close)) if close > open => Ok(&body[open..=close]),
        _ => Ok(body),
    }
}

fn validate_row(raw: RawTransaction) -> Option<Transaction> {
    let date = NaiveDate::parse_from_str(raw.date.as_deref()?.trim(), "%Y-%m-%d").ok()?;
    let amount = coerce_amount(raw.amount.as_ref()?)?;
    let kind = TxKind::parse(raw.kind.as_deref()?)?;
    let category = raw
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Uncategorized");

    let mut tx = Transaction::new(uuid::Uuid::new_v4().to_string(), date, amount, category, kind);
    tx.note = raw
        .note
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Some(tx)
}

fn coerce_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', "").parse().ok()?,
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}
