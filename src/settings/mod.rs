// Settings - typed values edited through plain text fields

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Leading float, the way a lenient number field reads "12.5kg" as 12.5
static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(Infinity|(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?)").expect("valid float regex")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    List(Vec<String>),
    Number(f64),
    Text(String),
}

/// Coerce a text field's contents into the same kind of value as `original`
pub fn copy_type(original: &SettingValue, value: &str) -> SettingValue {
    match original {
        SettingValue::List(_) => SettingValue::List(
            value
                .split(',')
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        SettingValue::Number(_) => SettingValue::Number(parse_leading_float(value)),
        SettingValue::Text(_) => SettingValue::Text(value.to_string()),
    }
}

/// NaN when there's no number at the start
fn parse_leading_float(value: &str) -> f64 {
    LEADING_FLOAT
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
