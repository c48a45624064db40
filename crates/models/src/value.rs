use serde::{Deserialize, Serialize};

/// Value universe of the persisted preference store.
/// Matches the scalar and string-list types platform preference stores allow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    StrList(Vec<String>),
}

impl From<bool> for PrefValue {
    fn from(v: bool) -> Self { Self::Bool(v) }
}

impl From<i64> for PrefValue {
    fn from(v: i64) -> Self { Self::Int(v) }
}

impl From<f64> for PrefValue {
    fn from(v: f64) -> Self { Self::Float(v) }
}

impl From<&str> for PrefValue {
    fn from(v: &str) -> Self { Self::Str(v.to_string()) }
}

impl From<String> for PrefValue {
    fn from(v: String) -> Self { Self::Str(v) }
}

impl From<Vec<String>> for PrefValue {
    fn from(v: Vec<String>) -> Self { Self::StrList(v) }
}
