use crate::statics;
use base64::Engine as _;
use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::time::{SystemTime, UNIX_EPOCH};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Property list integers are 64-bit but may be signed or unsigned.
/// Values above `i64::MAX` only fit the unsigned form, so both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistInteger {
    Signed(i64),
    Unsigned(u64),
}

impl PlistInteger {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PlistInteger::Signed(v) => Some(*v),
            PlistInteger::Unsigned(v) => i64::try_from(*v).ok(),
        }
    }
}

impl From<plist::Integer> for PlistInteger {
    fn from(value: plist::Integer) -> Self {
        match value.as_signed() {
            Some(v) => PlistInteger::Signed(v),
            // `as_signed` only fails above i64::MAX, which always fits u64.
            None => PlistInteger::Unsigned(value.as_unsigned().unwrap_or(u64::MAX)),
        }
    }
}

impl Serialize for PlistInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PlistInteger::Signed(v) => serializer.serialize_i64(*v),
            PlistInteger::Unsigned(v) => serializer.serialize_u64(*v),
        }
    }
}

/// A fully materialized property list document.
/// Dictionaries keep the order their keys appeared in the source document.
#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    String(String),
    Integer(PlistInteger),
    Real(f64),
    Boolean(bool),
    Data(Vec<u8>),
    Date(SystemTime),
    /// Object reference used by keyed archives (`NSKeyedArchiver`).
    Uid(u64),
    Array(Vec<PlistValue>),
    Dictionary(IndexMap<String, PlistValue>),
}

impl PlistValue {
    pub fn as_dictionary(&self) -> Option<&IndexMap<String, PlistValue>> {
        match self {
            PlistValue::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.as_dictionary().and_then(|m| m.get(key))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            PlistValue::String(_) => "string",
            PlistValue::Integer(_) => "integer",
            PlistValue::Real(_) => "real",
            PlistValue::Boolean(_) => "boolean",
            PlistValue::Data(_) => "data",
            PlistValue::Date(_) => "date",
            PlistValue::Uid(_) => "uid",
            PlistValue::Array(_) => "array",
            PlistValue::Dictionary(_) => "dict",
        }
    }

    /// Indented JSON-like rendering, see [`render`].
    pub fn to_json_pretty(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out, 0);
        out
    }

    fn write_json(&self, out: &mut String, indent: usize) {
        match self {
            PlistValue::String(s) => write_escaped_string(out, s),
            PlistValue::Integer(PlistInteger::Signed(v)) => out.push_str(&v.to_string()),
            PlistValue::Integer(PlistInteger::Unsigned(v)) => out.push_str(&v.to_string()),
            PlistValue::Real(v) => write_real(out, *v),
            PlistValue::Boolean(v) => out.push_str(if *v { "true" } else { "false" }),
            PlistValue::Data(bytes) => write_escaped_string(out, &encode_data(bytes)),
            PlistValue::Date(date) => write_escaped_string(out, &format_date(*date)),
            PlistValue::Uid(uid) => {
                out.push_str("{\n");
                out.push_str(&" ".repeat(indent + statics::RENDER_INDENT));
                write_escaped_string(out, statics::UID_KEY);
                out.push_str(": ");
                out.push_str(&uid.to_string());
                out.push('\n');
                out.push_str(&" ".repeat(indent));
                out.push('}');
            }
            PlistValue::Array(values) => {
                if values.is_empty() {
                    out.push_str("[]");
                    return;
                }
                out.push_str("[\n");
                for (i, v) in values.iter().enumerate() {
                    out.push_str(&" ".repeat(indent + statics::RENDER_INDENT));
                    v.write_json(out, indent + statics::RENDER_INDENT);
                    if i + 1 != values.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                out.push_str(&" ".repeat(indent));
                out.push(']');
            }
            PlistValue::Dictionary(map) => {
                if map.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push_str("{\n");
                for (i, (k, v)) in map.iter().enumerate() {
                    out.push_str(&" ".repeat(indent + statics::RENDER_INDENT));
                    write_escaped_string(out, k);
                    out.push_str(": ");
                    v.write_json(out, indent + statics::RENDER_INDENT);
                    if i + 1 != map.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                out.push_str(&" ".repeat(indent));
                out.push('}');
            }
        }
    }
}

/// Render a decoded tree as indented JSON-like text.
///
/// - 2-space indentation, keys in document order
/// - non-ASCII kept literally (only quotes, backslashes and control characters are escaped)
/// - `<data>` as base64, `<date>` as RFC 3339 UTC, UIDs as `{"CF$UID": n}`
/// - non-finite reals as bare `NaN` / `Infinity` / `-Infinity`
///
/// This is the only text offered for saving or copying.
pub fn render(value: &PlistValue) -> String {
    value.to_json_pretty()
}

impl From<plist::Value> for PlistValue {
    fn from(value: plist::Value) -> Self {
        match value {
            plist::Value::String(s) => PlistValue::String(s),
            plist::Value::Integer(n) => PlistValue::Integer(n.into()),
            plist::Value::Real(v) => PlistValue::Real(v),
            plist::Value::Boolean(v) => PlistValue::Boolean(v),
            plist::Value::Data(bytes) => PlistValue::Data(bytes),
            plist::Value::Date(date) => PlistValue::Date(date.into()),
            plist::Value::Uid(uid) => PlistValue::Uid(uid.get()),
            plist::Value::Array(values) => {
                PlistValue::Array(values.into_iter().map(PlistValue::from).collect())
            }
            plist::Value::Dictionary(dict) => PlistValue::Dictionary(
                dict.into_iter()
                    .map(|(k, v)| (k, PlistValue::from(v)))
                    .collect(),
            ),
            // `plist::Value` is non-exhaustive; anything newer is kept visible as text.
            other => PlistValue::String(format!("{other:?}")),
        }
    }
}

fn write_real(out: &mut String, v: f64) {
    if v.is_nan() {
        out.push_str("NaN");
    } else if v.is_infinite() {
        if v.is_sign_negative() {
            out.push_str("-Infinity");
        } else {
            out.push_str("Infinity");
        }
    } else {
        let mut buf = ryu::Buffer::new();
        out.push_str(buf.format_finite(v));
    }
}

fn encode_data(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn format_date(date: SystemTime) -> String {
    let datetime = match date.duration_since(UNIX_EPOCH) {
        Ok(after) => time::Duration::try_from(after)
            .ok()
            .and_then(|d| OffsetDateTime::UNIX_EPOCH.checked_add(d)),
        Err(before) => time::Duration::try_from(before.duration())
            .ok()
            .and_then(|d| OffsetDateTime::UNIX_EPOCH.checked_sub(d)),
    };

    // RFC 3339 only covers years 0000-9999.
    datetime
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| format!("{date:?}"))
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if c.is_control() => {
                use std::fmt::Write as _;
                write!(out, "\\u{:04x}", c as u32).ok();
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl Serialize for PlistValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PlistValue::String(s) => serializer.serialize_str(s),
            PlistValue::Integer(n) => n.serialize(serializer),
            PlistValue::Real(v) => serializer.serialize_f64(*v),
            PlistValue::Boolean(v) => serializer.serialize_bool(*v),
            PlistValue::Data(bytes) => serializer.serialize_str(&encode_data(bytes)),
            PlistValue::Date(date) => serializer.serialize_str(&format_date(*date)),
            PlistValue::Uid(uid) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(statics::UID_KEY, uid)?;
                map.end()
            }
            PlistValue::Array(values) => values.serialize(serializer),
            PlistValue::Dictionary(map) => map.serialize(serializer),
        }
    }
}
