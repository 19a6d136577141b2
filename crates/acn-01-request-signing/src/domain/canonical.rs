//! # Canonical Payload Encodings
//!
//! The hashed string embeds the payload in one of two fixed encodings. Both
//! reproduce what the deployed network servers compute, because the server
//! rehashes the decoded payload with its own encoder.
//!
//! ## Legacy (`rpc_version` < 2)
//!
//! Length-prefixed framing, one token per value:
//!
//! | Value | Encoding |
//! |-------|----------|
//! | null | `N;` |
//! | bool | `b:1;` / `b:0;` |
//! | integer | `i:<n>;` |
//! | float | `d:<shortest repr>;` (`1.0E+25` style outside `1e-4 ..< 1e15`) |
//! | string | `s:<byte len>:"<raw bytes>";` |
//! | list | `a:<n>:{i:0;<v>i:1;<v>...}` |
//! | map | `a:<n>:{<key><v>...}`, keys as `i:<n>;` when they are canonical integers, else `s:...;` |
//!
//! ## V2 (`rpc_version` == 2)
//!
//! JSON with the server encoder's conventions:
//! - `/` is escaped as `\/`, non-ASCII as lowercase `\uXXXX` (UTF-16 units)
//! - an empty map, or a map keyed exactly `"0".."n-1"` in order, is a list
//! - floats with an integral value keep a `.0` suffix

use serde_json::Value;
use shared_types::Params;
use std::fmt::Write;

// =============================================================================
// LEGACY SERIALIZER
// =============================================================================

/// Encode a payload in the legacy framing.
pub fn legacy_serialize(params: &Params) -> String {
    let mut out = String::new();
    write_legacy_map(&mut out, params);
    out
}

fn write_legacy_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("N;"),
        Value::Bool(b) => {
            let _ = write!(out, "b:{};", u8::from(*b));
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                let _ = write!(out, "i:{i};");
            } else if let Some(u) = n.as_u64() {
                let _ = write!(out, "i:{u};");
            } else {
                let f = n.as_f64().unwrap_or_default();
                let _ = write!(out, "d:{};", format_float(f, 'E', false));
            }
        }
        Value::String(s) => write_legacy_string(out, s),
        Value::Array(items) => {
            let _ = write!(out, "a:{}:{{", items.len());
            for (index, item) in items.iter().enumerate() {
                let _ = write!(out, "i:{index};");
                write_legacy_value(out, item);
            }
            out.push('}');
        }
        Value::Object(map) => write_legacy_map(out, map),
    }
}

fn write_legacy_map(out: &mut String, map: &Params) {
    let _ = write!(out, "a:{}:{{", map.len());
    for (key, value) in map {
        match integer_key(key) {
            Some(i) => {
                let _ = write!(out, "i:{i};");
            }
            None => write_legacy_string(out, key),
        }
        write_legacy_value(out, value);
    }
    out.push('}');
}

fn write_legacy_string(out: &mut String, s: &str) {
    let _ = write!(out, "s:{}:\"{}\";", s.len(), s);
}

/// Map keys that the receiving runtime stores as integers: `0`, or an
/// optional minus sign followed by a non-zero digit and more digits, within
/// `i64` range.
fn integer_key(key: &str) -> Option<i64> {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if key == "-0" {
        return None;
    }
    key.parse::<i64>().ok()
}

// =============================================================================
// V2 JSON
// =============================================================================

/// Encode a payload as V2 JSON.
pub fn json_encode_params(params: &Params) -> String {
    let mut out = String::new();
    write_json_map(&mut out, params);
    out
}

fn write_json_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                let _ = write!(out, "{i}");
            } else if let Some(u) = n.as_u64() {
                let _ = write!(out, "{u}");
            } else {
                let f = n.as_f64().unwrap_or_default();
                out.push_str(&format_float(f, 'e', true));
            }
        }
        Value::String(s) => write_json_string(out, s),
        Value::Array(items) => write_json_list(out, items.iter()),
        Value::Object(map) => write_json_map(out, map),
    }
}

fn write_json_map(out: &mut String, map: &Params) {
    if is_list_like(map) {
        write_json_list(out, map.values());
        return;
    }
    out.push('{');
    for (index, (key, value)) in map.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        write_json_string(out, key);
        out.push(':');
        write_json_value(out, value);
    }
    out.push('}');
}

fn write_json_list<'a>(out: &mut String, items: impl Iterator<Item = &'a Value>) {
    out.push('[');
    for (index, item) in items.enumerate() {
        if index > 0 {
            out.push(',');
        }
        write_json_value(out, item);
    }
    out.push(']');
}

fn is_list_like(map: &Params) -> bool {
    map.keys()
        .enumerate()
        .all(|(index, key)| key.parse::<usize>().ok() == Some(index) && integer_key(key).is_some())
}

fn write_json_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || (c as u32) > 0x7f => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

// =============================================================================
// FLOATS
// =============================================================================

/// Shortest round-trip decimal; exponent form outside `1e-4 ..< 1e15`.
fn format_float(value: f64, exp_marker: char, keep_fraction: bool) -> String {
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..15).contains(&exponent) {
        let fixed = format!("{value}");
        if keep_fraction && !fixed.contains('.') {
            return format!("{fixed}.0");
        }
        return fixed;
    }

    let mantissa = if mantissa.contains('.') {
        mantissa.to_string()
    } else {
        format!("{mantissa}.0")
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}{exp_marker}{sign}{}", exponent.unsigned_abs())
}
