//! Payload field grammar
//!
//! Payload text looks like `{ key = value, key = "quoted, value", ... }`.
//! Fields are separated by commas at nesting depth zero; commas inside
//! quotes, braces, brackets or parentheses belong to the value.

use log::{debug, warn};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Remove one pair of enclosing braces and surrounding whitespace
pub fn strip_braces(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix('{').unwrap_or(text);
    let text = text.trim_end_matches(',').trim_end();
    let text = text.strip_suffix('}').unwrap_or(text);
    text.trim()
}

/// Split at top-level commas. Each field is returned trimmed, together with
/// its byte offset in `text`.
pub fn split_top_level(text: &str) -> Vec<(usize, &str)> {
    let mut fields = Vec::new();
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if in_quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quote = false;
            }
            continue;
        }
        match c {
            '"' => in_quote = true,
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                push_field(&mut fields, text, start, i);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_field(&mut fields, text, start, text.len());
    fields
}

fn push_field<'a>(fields: &mut Vec<(usize, &'a str)>, text: &'a str, start: usize, end: usize) {
    let raw = &text[start..end];
    let trimmed = raw.trim_start();
    let offset = start + (raw.len() - trimmed.len());
    let trimmed = trimmed.trim_end();
    if !trimmed.is_empty() {
        fields.push((offset, trimmed));
    }
}

/// Split `key = value` at the first `=`; both sides trimmed
pub fn split_pair(field: &str) -> Option<(&str, &str)> {
    let (key, value) = field.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Remove one pair of surrounding double quotes; inner spaces and quotes
/// belong to the value
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Plain `key = value` list into a map, values unquoted
pub fn parse_pairs(text: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (_, field) in split_top_level(strip_braces(text)) {
        match split_pair(field) {
            Some((key, value)) => {
                map.insert(key.to_string(), unquote(value).to_string());
            }
            None => debug!("payload field without '=': {field}"),
        }
    }
    map
}

/// Payload of a legacy user event: the decoded pairs plus the signal
/// derived from a lone `scope` field, if that is what the payload holds.
pub fn parse_legacy_payload(text: &str) -> (BTreeMap<String, String>, Option<String>) {
    let inner = strip_braces(text);
    let fields = split_top_level(inner);

    if let [(_, field)] = fields.as_slice() {
        if let Some(("scope", value)) = split_pair(field) {
            let scope = unquote(value).trim();
            let mut map = BTreeMap::new();
            map.insert("scope".to_string(), scope.to_string());
            return (map, Some(scope_signal(scope)));
        }
    }

    (parse_pairs(inner), None)
}

/// Short signal name of a scope string:
/// `void ns::Foo::bar(int)` → `ns_Foo_bar`, `plain` → `plain`
pub fn scope_signal(scope: &str) -> String {
    if !scope.contains("::") {
        return scope.to_string();
    }
    let head = scope.split('(').next().unwrap_or(scope);
    let name = head
        .split_whitespace()
        .filter(|token| token.contains("::"))
        .last()
        .unwrap_or_else(|| head.trim());
    name.replace("::", "_")
}

/// Payload of a structured pmtrace event. The `payload` field holds raw,
/// unescaped JSON, so it is located by key and taken up to the end of the
/// record instead of being split on commas.
pub fn parse_structured_payload(text: &str) -> BTreeMap<String, String> {
    let inner = strip_braces(text);
    let mut map = BTreeMap::new();

    for (offset, field) in split_top_level(inner) {
        let Some((key, value)) = split_pair(field) else {
            continue;
        };
        if key == "payload" {
            let raw = split_pair(&inner[offset..]).map_or("", |(_, rest)| rest);
            flatten_json_payload(unquote(raw), &mut map);
            break;
        }
        map.insert(key.to_string(), unquote(value).to_string());
    }
    map
}

fn flatten_json_payload(json: &str, map: &mut BTreeMap<String, String>) {
    if json.trim().is_empty() {
        return;
    }
    match serde_json::from_str::<JsonValue>(json) {
        Ok(JsonValue::Object(members)) => {
            for (key, value) in members {
                map.insert(key, json_scalar_to_string(&value));
            }
        }
        Ok(other) => debug!("structured payload is not an object: {other}"),
        Err(e) => warn!("structured payload is not valid JSON ({e}): {json}"),
    }
}

/// Strings as-is; integral numbers without a fraction (`3.0` → `3`)
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn json_scalar_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f.is_finite() && f.trunc() == f && f.abs() < 9.0e15 {
                    (f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
        }
        other => {
            debug!("non-scalar payload member kept as JSON text: {other}");
            other.to_string()
        }
    }
}
