//! Company creation parameters.

use super::common::require_text;
use crate::error::JitbitError;
use crate::query::Form;

/// A company to create.
#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    /// Company name.
    pub name: String,
    /// Email domain used to match incoming users to the company.
    pub email_domain: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl NewCompany {
    /// A company with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the email domain.
    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = Some(domain.into());
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        require_text(&self.name, "name")
    }

    pub(crate) fn to_form(&self) -> Form {
        Form::new()
            .field("name", &self.name)
            .opt("emailDomain", self.email_domain.as_deref())
            .opt("notes", self.notes.as_deref())
    }
}
