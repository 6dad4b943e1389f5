//! Ticket parameter types.
//!
//! Filters for `Tickets`, the body of a new ticket, partial ticket updates
//! and custom field values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::{join_tags, require_id, require_one_based, require_text};
use crate::error::JitbitError;
use crate::query::{Form, Query};

/// Which tickets `Tickets` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketListMode {
    /// Every ticket visible to the account.
    #[default]
    All,
    /// Tickets without a reply.
    Unanswered,
    /// Tickets not yet closed.
    Unclosed,
    /// Tickets assigned to the authenticated account.
    HandledByMe,
}

impl TicketListMode {
    /// All accepted values, in wire form.
    pub const VALUES: [&'static str; 4] = ["all", "unanswered", "unclosed", "handledbyme"];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketListMode::All => "all",
            TicketListMode::Unanswered => "unanswered",
            TicketListMode::Unclosed => "unclosed",
            TicketListMode::HandledByMe => "handledbyme",
        }
    }
}

impl fmt::Display for TicketListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketListMode {
    type Err = JitbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TicketListMode::All),
            "unanswered" => Ok(TicketListMode::Unanswered),
            "unclosed" => Ok(TicketListMode::Unclosed),
            "handledbyme" => Ok(TicketListMode::HandledByMe),
            other => Err(JitbitError::validation(format!(
                "mode must be one of {:?}, got {:?}",
                Self::VALUES,
                other
            ))),
        }
    }
}

/// Ticket priority as understood by Jitbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// -1
    Low,
    /// 0
    Normal,
    /// 1
    High,
    /// 2
    Critical,
}

impl Priority {
    /// Numeric id sent on the wire.
    pub fn id(&self) -> i32 {
        match self {
            Priority::Low => -1,
            Priority::Normal => 0,
            Priority::High => 1,
            Priority::Critical => 2,
        }
    }
}

impl TryFrom<i32> for Priority {
    type Error = JitbitError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Priority::Low),
            0 => Ok(Priority::Normal),
            1 => Ok(Priority::High),
            2 => Ok(Priority::Critical),
            other => Err(JitbitError::validation(format!(
                "priority must be one of -1, 0, 1, 2, got {}",
                other
            ))),
        }
    }
}

impl FromStr for Priority {
    type Err = JitbitError;

    /// Accepts a name (`low`, `normal`, `high`, `critical`) or a numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => s
                .parse::<i32>()
                .map_err(|_| {
                    JitbitError::validation(format!(
                        "priority must be low, normal, high, critical or -1..=2, got {:?}",
                        s
                    ))
                })
                .and_then(Priority::try_from),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Filters for listing tickets. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct TicketListParams {
    /// Listing mode.
    pub mode: Option<TicketListMode>,
    /// Only tickets in this category.
    pub category_id: Option<u64>,
    /// Only tickets in this section.
    pub section_id: Option<u64>,
    /// Only tickets with this status.
    pub status_id: Option<u64>,
    /// Only tickets submitted by this user.
    pub from_user_id: Option<u64>,
    /// Only tickets submitted by users of this company.
    pub from_company_id: Option<u64>,
    /// Only tickets handled by this technician.
    pub handled_by_user_id: Option<u64>,
    /// Only tickets carrying this tag.
    pub tag_name: Option<String>,
    /// Created on or after this date (`YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Created on or before this date.
    pub date_to: Option<String>,
    /// Updated on or after this date.
    pub updated_from: Option<String>,
    /// Updated on or before this date.
    pub updated_to: Option<String>,
    /// Page size.
    pub count: Option<u32>,
    /// 1-based offset.
    pub offset: Option<u32>,
}

impl TicketListParams {
    /// Empty filter set: the API's defaults apply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the listing mode.
    pub fn with_mode(mut self, mode: TicketListMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Filters by category.
    pub fn with_category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Filters by section.
    pub fn with_section(mut self, section_id: u64) -> Self {
        self.section_id = Some(section_id);
        self
    }

    /// Filters by status.
    pub fn with_status(mut self, status_id: u64) -> Self {
        self.status_id = Some(status_id);
        self
    }

    /// Filters by submitter.
    pub fn with_from_user(mut self, user_id: u64) -> Self {
        self.from_user_id = Some(user_id);
        self
    }

    /// Filters by submitter company.
    pub fn with_from_company(mut self, company_id: u64) -> Self {
        self.from_company_id = Some(company_id);
        self
    }

    /// Filters by handling technician.
    pub fn with_handled_by(mut self, user_id: u64) -> Self {
        self.handled_by_user_id = Some(user_id);
        self
    }

    /// Filters by tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = Some(tag.into());
        self
    }

    /// Filters by creation date range; either bound may be omitted.
    pub fn with_created_between(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Filters by last-update date range; either bound may be omitted.
    pub fn with_updated_between(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.updated_from = from;
        self.updated_to = to;
        self
    }

    /// Sets the page size.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the 1-based offset.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        if let Some(offset) = self.offset {
            require_one_based(offset, "offset")?;
        }
        Ok(())
    }

    pub(crate) fn to_path(&self) -> String {
        Query::new("Tickets")
            .opt("mode", self.mode)
            .opt("categoryid", self.category_id)
            .opt("sectionId", self.section_id)
            .opt("statusId", self.status_id)
            .opt("fromUserId", self.from_user_id)
            .opt("fromCompanyId", self.from_company_id)
            .opt("handledByUserID", self.handled_by_user_id)
            .opt("tagName", self.tag_name.as_deref())
            .opt("dateFrom", self.date_from.as_deref())
            .opt("dateTo", self.date_to.as_deref())
            .opt("updatedFrom", self.updated_from.as_deref())
            .opt("updatedTo", self.updated_to.as_deref())
            .opt("count", self.count)
            .opt("offset", self.offset)
            .build()
    }
}

/// A ticket to create.
#[derive(Debug, Clone)]
pub struct NewTicket {
    /// Category the ticket is filed under.
    pub category_id: u64,
    /// Ticket subject.
    pub subject: String,
    /// Ticket body.
    pub body: String,
    /// Priority.
    pub priority: Priority,
    /// Submit on behalf of this user instead of the authenticated account.
    pub user_id: Option<u64>,
    /// Tags to attach.
    pub tags: Vec<String>,
}

impl NewTicket {
    /// Creates a ticket with the four required fields.
    pub fn new(
        category_id: u64,
        subject: impl Into<String>,
        body: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            category_id,
            subject: subject.into(),
            body: body.into(),
            priority,
            user_id: None,
            tags: Vec::new(),
        }
    }

    /// Submits on behalf of another user.
    pub fn with_user(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        require_id(self.category_id, "category_id")?;
        require_text(&self.body, "body")?;
        require_text(&self.subject, "subject")?;
        if let Some(user_id) = self.user_id {
            require_id(user_id, "user_id")?;
        }
        Ok(())
    }

    pub(crate) fn to_form(&self) -> Form {
        Form::new()
            .field("categoryId", self.category_id)
            .field("body", &self.body)
            .field("subject", &self.subject)
            .field("priorityId", self.priority)
            .opt("userId", self.user_id)
            .opt("tags", join_tags(&self.tags))
    }
}

/// Partial update of an existing ticket. Fields left `None` are untouched.
#[derive(Debug, Clone, Default)]
pub struct TicketUpdate {
    /// Ticket to update.
    pub id: u64,
    /// New category.
    pub category_id: Option<u64>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New creation date.
    pub date: Option<String>,
    /// New submitter.
    pub user_id: Option<u64>,
    /// New due date.
    pub due_date: Option<String>,
    /// New assignee.
    pub assigned_user_id: Option<u64>,
    /// Time spent, in seconds.
    pub time_spent_in_seconds: Option<u64>,
    /// New status.
    pub status_id: Option<u64>,
    /// Replacement tag set.
    pub tags: Option<Vec<String>>,
    /// New subject.
    pub subject: Option<String>,
    /// New body.
    pub body: Option<String>,
}

impl TicketUpdate {
    /// Starts an update for the given ticket.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Moves the ticket to another category.
    pub fn with_category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Changes the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Changes the creation date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Reassigns the ticket to another submitter.
    pub fn with_user(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Changes the due date.
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Assigns the ticket to a technician.
    pub fn with_assignee(mut self, user_id: u64) -> Self {
        self.assigned_user_id = Some(user_id);
        self
    }

    /// Records time spent.
    pub fn with_time_spent(mut self, seconds: u64) -> Self {
        self.time_spent_in_seconds = Some(seconds);
        self
    }

    /// Changes the status.
    pub fn with_status(mut self, status_id: u64) -> Self {
        self.status_id = Some(status_id);
        self
    }

    /// Replaces the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Changes the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Changes the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        require_id(self.id, "ticket id")?;
        if self.to_form().len() <= 1 {
            return Err(JitbitError::validation(
                "ticket update must change at least one field",
            ));
        }
        Ok(())
    }

    pub(crate) fn to_form(&self) -> Form {
        // An explicitly empty tag list clears the tags.
        let tags = self
            .tags
            .as_ref()
            .map(|t| join_tags(t).unwrap_or_default());
        Form::new()
            .field("id", self.id)
            .opt("categoryId", self.category_id)
            .opt("priority", self.priority)
            .opt("date", self.date.as_deref())
            .opt("userId", self.user_id)
            .opt("dueDate", self.due_date.as_deref())
            .opt("assignedUserId", self.assigned_user_id)
            .opt("timeSpentInSeconds", self.time_spent_in_seconds)
            .opt("statusId", self.status_id)
            .opt("tags", tags)
            .opt("subject", self.subject.as_deref())
            .opt("body", self.body.as_deref())
    }
}

/// Value written by `SetCustomField`. Its meaning depends on the field type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CustomFieldValue {
    /// Checkbox fields.
    Bool(bool),
    /// Text and multiline fields.
    Text(String),
    /// Drop-down fields: the id of the selected option.
    OptionId(u64),
    /// Date fields, passed through as a string.
    Date(String),
}

impl fmt::Display for CustomFieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomFieldValue::Bool(b) => write!(f, "{}", b),
            CustomFieldValue::Text(s) | CustomFieldValue::Date(s) => f.write_str(s),
            CustomFieldValue::OptionId(id) => write!(f, "{}", id),
        }
    }
}
