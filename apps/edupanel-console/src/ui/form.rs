//! Form state for create/update: a JSON object assembled from a file,
//! `--set`/`--set-json` assignments and interactive prompts.

use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Value};
use std::path::Path;

use edupanel_shared::Localized;
use edupanel_shared::localized::LocalizedError;

pub type FormValues = Map<String, Value>;

pub fn load_file(path: &Path) -> Result<FormValues> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    match serde_json::from_str::<Value>(&raw).with_context(|| format!("{} is not valid JSON", path.display()))? {
        Value::Object(map) => Ok(map),
        _ => bail!("{} must contain a JSON object", path.display()),
    }
}

/// Sets `key` (dotted for nesting, e.g. `name.uz`) to `value`.
pub fn assign(form: &mut FormValues, key: &str, value: Value) -> Result<()> {
    let mut parts = key.split('.').peekable();
    let mut target = form;
    while let Some(part) = parts.next() {
        if part.is_empty() {
            bail!("invalid field name '{}'", key);
        }
        if parts.peek().is_none() {
            target.insert(part.to_string(), value);
            return Ok(());
        }
        let slot = target
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        target = slot
            .as_object_mut()
            .ok_or_else(|| anyhow!("cannot nest under '{}'", part))?;
    }
    Ok(())
}

/// True when the top-level field of `key` holds numbers, flags or arrays.
pub fn is_typed(key: &str, typed_fields: &[&str]) -> bool {
    let root = key.split('.').next().unwrap_or(key);
    typed_fields.contains(&root)
}

/// Applies a `--set key=value` assignment. Values stay text unless the
/// field is one of `typed_fields`, where JSON such as `3`, `true` or
/// `[...]` is decoded and anything else is kept as text.
pub fn set_field(form: &mut FormValues, key: &str, raw: &str, typed_fields: &[&str]) -> Result<()> {
    let value = if is_typed(key, typed_fields) {
        serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
    } else {
        Value::String(raw.to_string())
    };
    assign(form, key, value)
}

/// Applies a `--set-json key=value` assignment; the value must be valid JSON.
pub fn set_json(form: &mut FormValues, key: &str, raw: &str) -> Result<()> {
    let value = serde_json::from_str::<Value>(raw).with_context(|| format!("{} is not valid JSON: {}", key, raw))?;
    assign(form, key, value)
}

pub fn localized(form: &FormValues, field: &str) -> Localized {
    form.get(field)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

pub fn set_localized(form: &mut FormValues, field: &str, value: &Localized) -> Result<()> {
    form.insert(field.to_string(), serde_json::to_value(value)?);
    Ok(())
}

/// Blocks submission while a multilingual field is incomplete. On create
/// every listed field must be present; on update only the ones being sent.
pub fn check_localized(form: &FormValues, fields: &[&str], creating: bool) -> Result<(), LocalizedError> {
    for field in fields {
        if !creating && !form.contains_key(*field) {
            continue;
        }
        localized(form, field).require_complete(field)?;
    }
    Ok(())
}
