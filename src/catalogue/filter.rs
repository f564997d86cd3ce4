use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::FLAG_CATEGORY;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("empty filter token")]
    Empty,
    #[error("filter '{0}' has no value after ':'")]
    MissingValue(String),
}

/// One step of the drill-down path, written as "category:value".
///
/// Tokens are split at the first ':' so values may contain colons
/// ("from:Re:Zero"). A bare token like "retro" is a flag filter on the
/// empty category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Filter {
    pub category: String,
    pub value: String,
}

impl Filter {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }

    pub fn parse(token: &str) -> Result<Self, FilterError> {
        if token.is_empty() {
            return Err(FilterError::Empty);
        }
        let (category, value) = token.split_once(':').unwrap_or((FLAG_CATEGORY, token));
        if value.is_empty() {
            return Err(FilterError::MissingValue(token.to_string()));
        }
        Ok(Self::new(category, value))
    }

    pub fn is_flag(&self) -> bool {
        self.category == FLAG_CATEGORY
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Filter {
    type Error = FilterError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::parse(&token)
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_flag() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{}:{}", self.category, self.value)
        }
    }
}
