//! Builders for query strings and form bodies.
//!
//! Both builders skip `None` values, so omitted optional parameters never
//! leave an empty `key=` pair or a dangling `&`.

use std::fmt::Display;

/// Ordered form fields for a POST body.
pub type FormFields = Vec<(&'static str, String)>;

/// Builds `Endpoint?key=value&...` with percent-encoded values.
#[derive(Debug, Clone)]
pub struct Query {
    endpoint: String,
    pairs: Vec<String>,
}

impl Query {
    /// Starts a query for the given endpoint name.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            pairs: Vec::new(),
        }
    }

    /// Appends `key=value`.
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push(format!(
            "{}={}",
            key,
            urlencoding::encode(&value.to_string())
        ));
        self
    }

    /// Appends `key=value` when `value` is present.
    pub fn opt<T: Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Finishes the path, with `?` only if at least one parameter was added.
    pub fn build(self) -> String {
        if self.pairs.is_empty() {
            self.endpoint
        } else {
            format!("{}?{}", self.endpoint, self.pairs.join("&"))
        }
    }
}

/// Builds form fields for a POST body.
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: FormFields,
}

impl Form {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    pub fn field(mut self, key: &'static str, value: impl Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// Adds a field when `value` is present.
    pub fn opt<T: Display>(self, key: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Number of fields added so far.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field was added.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the collected fields.
    pub fn build(self) -> FormFields {
        self.fields
    }
}
