//! Ticket comment parameters.

use super::common::{require_id, require_text};
use crate::error::JitbitError;
use crate::query::Form;

/// A reply to post on a ticket.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Ticket to comment on.
    pub ticket_id: u64,
    /// Comment text.
    pub body: String,
    /// Visible to technicians only.
    pub for_techs_only: bool,
    /// Post as a system note instead of a reply.
    pub is_system: bool,
}

impl NewComment {
    /// A public reply.
    pub fn new(ticket_id: u64, body: impl Into<String>) -> Self {
        Self {
            ticket_id,
            body: body.into(),
            for_techs_only: false,
            is_system: false,
        }
    }

    /// Hides the comment from the ticket submitter.
    pub fn techs_only(mut self) -> Self {
        self.for_techs_only = true;
        self
    }

    /// Marks the comment as a system note.
    pub fn system(mut self) -> Self {
        self.is_system = true;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        require_id(self.ticket_id, "ticket_id")?;
        require_text(&self.body, "body")
    }

    pub(crate) fn to_form(&self) -> Form {
        Form::new()
            .field("id", self.ticket_id)
            .field("body", &self.body)
            .field("forTechsOnly", self.for_techs_only)
            .field("isSystem", self.is_system)
    }
}
