//! User parameter types: listing, creation and updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::{require_id, require_one_based, require_text};
use crate::error::JitbitError;
use crate::query::{Form, Query};

/// Default page size for `Users`.
pub const DEFAULT_USER_PAGE_SIZE: u32 = 500;

/// Which users `Users` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserListMode {
    /// Everyone.
    #[default]
    All,
    /// Technicians only.
    Techs,
    /// Administrators only.
    Admins,
    /// Regular (non-technician) users only.
    Regular,
}

impl UserListMode {
    /// All accepted values, in wire form.
    pub const VALUES: [&'static str; 4] = ["all", "techs", "admins", "regular"];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserListMode::All => "all",
            UserListMode::Techs => "techs",
            UserListMode::Admins => "admins",
            UserListMode::Regular => "regular",
        }
    }
}

impl fmt::Display for UserListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserListMode {
    type Err = JitbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(UserListMode::All),
            "techs" => Ok(UserListMode::Techs),
            "admins" => Ok(UserListMode::Admins),
            "regular" => Ok(UserListMode::Regular),
            other => Err(JitbitError::validation(format!(
                "list_mode must be one of {:?}, got {:?}",
                Self::VALUES,
                other
            ))),
        }
    }
}

/// Paging for `Users`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserListParams {
    /// Page size.
    pub count: u32,
    /// 1-based page number.
    pub page: u32,
    /// Which users to list.
    pub list_mode: UserListMode,
}

impl Default for UserListParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_USER_PAGE_SIZE,
            page: 1,
            list_mode: UserListMode::All,
        }
    }
}

impl UserListParams {
    /// First page of 500 users, all modes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets the 1-based page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the listing mode.
    pub fn with_list_mode(mut self, list_mode: UserListMode) -> Self {
        self.list_mode = list_mode;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        require_one_based(self.page, "page")
    }

    pub(crate) fn to_path(&self) -> String {
        Query::new("Users")
            .param("count", self.count)
            .param("page", self.page)
            .param("listMode", self.list_mode)
            .build()
    }
}

/// A user to create.
///
/// Company and department are created on the remote side if they do not
/// exist yet.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Initial password.
    pub password: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Company name.
    pub company: String,
    /// Department name.
    pub department: String,
    /// Phone number.
    pub phone: String,
    /// Location.
    pub location: String,
    /// Ask Jitbit to send a welcome email.
    pub send_welcome_email: bool,
}

impl NewUser {
    /// Creates a user with the three required fields.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Sets first and last name.
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Sets the company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Requests a welcome email.
    pub fn with_welcome_email(mut self) -> Self {
        self.send_welcome_email = true;
        self
    }

    /// Name used in diagnostics: full name if set, otherwise the username.
    pub(crate) fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        require_text(&self.username, "username")?;
        require_text(&self.password, "password")?;
        require_email(&self.email)
    }

    pub(crate) fn to_form(&self) -> Form {
        Form::new()
            .field("username", &self.username)
            .field("password", &self.password)
            .field("email", &self.email)
            .field("firstName", &self.first_name)
            .field("lastName", &self.last_name)
            .field("phone", &self.phone)
            .field("location", &self.location)
            .field("company", &self.company)
            .field("department", &self.department)
            .field("sendWelcomeEmail", self.send_welcome_email)
    }
}

/// Update of an existing user. Fields left `None` are not sent.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// User to update.
    pub user_id: u64,
    /// New login name.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New company.
    pub company: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Disable or re-enable the account.
    pub disabled: Option<bool>,
}

impl UserUpdate {
    /// Starts an update for the given user.
    pub fn new(user_id: u64) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Changes the login name.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Changes the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Changes first and last name.
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    /// Changes the company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Changes the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Changes the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Changes the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Changes the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Replaces the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Disables or re-enables the account.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), JitbitError> {
        require_id(self.user_id, "user_id")?;
        if let Some(email) = &self.email {
            require_email(email)?;
        }
        if let Some(password) = &self.password {
            require_text(password, "password")?;
        }
        Ok(())
    }

    pub(crate) fn to_form(&self) -> Form {
        Form::new()
            .field("userId", self.user_id)
            .opt("username", self.username.as_deref())
            .opt("email", self.email.as_deref())
            .opt("firstName", self.first_name.as_deref())
            .opt("lastName", self.last_name.as_deref())
            .opt("phone", self.phone.as_deref())
            .opt("location", self.location.as_deref())
            .opt("company", self.company.as_deref())
            .opt("department", self.department.as_deref())
            .opt("password", self.password.as_deref())
            .opt("notes", self.notes.as_deref())
            .opt("disabled", self.disabled)
    }
}

/// Minimal email sanity check: non-empty local part and domain around one `@`.
pub(crate) fn require_email(email: &str) -> Result<(), JitbitError> {
    require_text(email, "email")?;
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(JitbitError::validation(format!(
            "email is not a valid address: {:?}",
            email.chars().take(100).collect::<String>()
        ))),
    }
}
