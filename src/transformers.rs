//! Ready-made transformers for common output contexts and the tables that
//! select them by tag value.

use crate::error::{Error, Result};
use crate::merge::TransformerTable;
use crate::placeholder::{stringify, Transformer};
use serde_json::Value;
use std::sync::Arc;

/// Dollar-quote tag wrapped around database search input
const DB_QUOTE: &str = "$i_n_p_u_t$";

fn unsupported(transformer: &str, value: &Value) -> Error {
    Error::UnsupportedValue { transformer: transformer.to_string(), value: value.to_string() }
}

fn expect_str<'v>(transformer: &str, value: &'v Value) -> Result<&'v str> {
    value.as_str().ok_or_else(|| unsupported(transformer, value))
}

/// Any value, stringified and HTML-escaped.
pub fn text(value: &Value) -> Result<String> {
    Ok(html_escape::encode_text(&stringify(value)).into_owned())
}

/// Trusted markup, passed through unchanged. Only strings are accepted.
pub fn html(value: &Value) -> Result<String> {
    expect_str("html", value).map(str::to_string)
}

/// Quotes input for use as a literal inside a Postgres dollar-quoted string.
/// `$` is removed so the input can never close the quote.
pub fn escape_db(input: &str) -> String {
    format!("{DB_QUOTE}{}{DB_QUOTE}", input.replace('$', ""))
}

/// Search text that must end the matched column: `%input`.
pub fn search_prefix(value: &Value) -> Result<String> {
    let input = expect_str("searchtext%", value)?;
    Ok(escape_db(&format!("%{input}")))
}

/// Search text that must start the matched column: `input%`.
pub fn search_suffix(value: &Value) -> Result<String> {
    let input = expect_str("%searchtext", value)?;
    Ok(escape_db(&format!("{input}%")))
}

/// Tag values `text` and `html`.
pub fn html_table() -> TransformerTable {
    TransformerTable::from([
        ("text".to_string(), Arc::new(text) as Transformer),
        ("html".to_string(), Arc::new(html) as Transformer),
    ])
}

/// Tag values `searchtext%` and `%searchtext`.
pub fn db_table() -> TransformerTable {
    TransformerTable::from([
        ("searchtext%".to_string(), Arc::new(search_prefix) as Transformer),
        ("%searchtext".to_string(), Arc::new(search_suffix) as Transformer),
    ])
}
