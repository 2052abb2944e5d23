use std::collections::BTreeMap;

use serde::Serialize;

/// Named filters sent as the `params` object of a Tushare request.
///
/// Only keys that were actually supplied end up on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Adds `key` only when `value` is present and non-empty.
    #[must_use]
    pub fn with_optional(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.with(key, value),
            _ => self,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_values_skip_missing_and_empty() {
        let params = Params::new()
            .with_optional("ts_code", Some("000001.SZ"))
            .with_optional("start_date", None)
            .with_optional("end_date", Some(""));

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("ts_code"), Some("000001.SZ"));
        assert!(params.get("start_date").is_none());
        assert!(params.get("end_date").is_none());
    }

    #[test]
    fn serializes_as_flat_object() {
        let params = Params::new()
            .with("ts_code", "600000.SH")
            .with("end_date", "20240131");
        let value = serde_json::to_value(&params).expect("params serialize");

        assert_eq!(
            value,
            serde_json::json!({ "end_date": "20240131", "ts_code": "600000.SH" })
        );
    }
}
