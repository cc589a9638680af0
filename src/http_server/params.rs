//! Request parameter normalization: extracts an ordered list of UID
//! strings from a query string or request body regardless of encoding.
//! Absence of UIDs is not an error here; callers answer 400 on empty.

use serde_json::Value;

type Decoder = fn(&str, &[&str]) -> Option<Vec<String>>;

/// Extracts UIDs from a raw query string. Key aliases are consulted in
/// order and the first alias with any values wins, so `uids[]=1&uids[]=2`
/// beats a stray `uids=`. Packed comma-separated values are split; order
/// is preserved and duplicates are kept.
pub fn from_query(query: &str, keys: &[&str]) -> Vec<String> {
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    for key in keys {
        let mut out = Vec::new();
        for (k, v) in &pairs {
            if k == key {
                push_value(&mut out, v);
            }
        }
        if !out.is_empty() {
            return out;
        }
    }
    Vec::new()
}

/// Extracts UIDs from a request body via a prioritized decoder chain.
/// The declared content type only orders the chain; each decoder returns
/// no-match instead of raising, and the first non-empty result wins. An
/// unlabeled body therefore still parses as JSON or as a raw URL-encoded
/// query string.
pub fn from_body(content_type: &str, body: &str, keys: &[&str]) -> Vec<String> {
    let ct = content_type.to_lowercase();
    let chain: [Decoder; 2] = if ct.contains("application/x-www-form-urlencoded") {
        [decode_form, decode_json]
    } else {
        [decode_json, decode_form]
    };
    for decode in chain {
        if let Some(uids) = decode(body, keys) {
            return uids;
        }
    }
    Vec::new()
}

fn decode_json(body: &str, keys: &[&str]) -> Option<Vec<String>> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    for key in keys {
        let Some(field) = parsed.get(key) else {
            continue;
        };
        let mut out = Vec::new();
        match field {
            Value::Array(items) => {
                for item in items {
                    push_json_value(&mut out, item);
                }
            }
            other => push_json_value(&mut out, other),
        }
        if !out.is_empty() {
            return Some(out);
        }
    }
    None
}

fn decode_form(body: &str, keys: &[&str]) -> Option<Vec<String>> {
    let uids = from_query(body, keys);
    if uids.is_empty() {
        None
    } else {
        Some(uids)
    }
}

fn push_json_value(out: &mut Vec<String>, value: &Value) {
    match value {
        Value::String(s) => push_value(out, s),
        Value::Number(n) => out.push(n.to_string()),
        _ => {}
    }
}

fn push_value(out: &mut Vec<String>, value: &str) {
    out.extend(
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    );
}
