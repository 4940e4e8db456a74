//! JSON rendering

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty-print `value` as JSON with a trailing newline
///
/// Non-finite floats serialize as `null`.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    out.push('\n');
    Ok(out)
}
