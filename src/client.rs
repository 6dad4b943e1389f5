//! HTTP client for the Jitbit Helpdesk API.
//!
//! This module provides [`JitbitClient`], which maps each remote endpoint to
//! one async method. Every method follows the same steps:
//!
//! 1. validate its arguments, returning `JitbitError::Validation` before
//!    anything is sent;
//! 2. hand an endpoint path (with query string) and an optional form body to
//!    the request primitive, [`JitbitClient::request`];
//! 3. interpret the status code and body for that endpoint.
//!
//! # Failure reporting
//!
//! Remote and transport failures are not returned as errors. They are
//! reported through the client's [`Diagnostics`] and surface as:
//!
//! - `None` for reads and creations,
//! - `false` for updates,
//! - `None` for status-returning writes when no response was received.
//!
//! The remote API does not reliably separate failure from success for
//! writes, so a `None` from a creation can mean either.
//!
//! There is no retry logic; each method performs exactly one HTTP call.
//!
//! # Security
//!
//! The password is sent only in the Basic `Authorization` header. Transport
//! error text, the only external text quoted in diagnostics and probe
//! errors, is redacted before it is reported.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

pub use reqwest::StatusCode;

use crate::config::Config;
use crate::diagnostics::{DiagnosticEvent, Diagnostics, TracingDiagnostics};
use crate::error::JitbitError;
use crate::models::{
    require_email, require_id, AssetListParams, AssetUpdate, CustomFieldValue, NewAsset, NewComment,
    NewCompany, NewTicket, NewUser, TicketListParams, TicketUpdate, UserListParams, UserUpdate,
};
use crate::query::{Form, FormFields, Query};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoint used to check credentials at construction time.
const AUTH_PROBE_ENDPOINT: &str = "Authorization";

/// Maximum length of response bodies quoted in diagnostics.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Status code and body of one HTTP exchange, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

/// Client for the Jitbit Helpdesk REST API.
///
/// Construction performs an authentication probe; a client value only exists
/// if the probe succeeded. After that the client is immutable and cheap to
/// clone.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = JitbitClient::new(&config).await?;
///
/// if let Some(ticket) = client.get_ticket(1000).await? {
///     println!("{}", ticket["Subject"]);
/// }
/// ```
#[derive(Clone)]
pub struct JitbitClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Base URL of the helpdesk, without the `/api` segment.
    base_url: String,

    /// Basic auth username.
    username: String,

    /// Basic auth password.
    /// SECURITY: Never log this value!
    password: String,

    /// Where failures and notable writes are reported.
    diagnostics: Arc<dyn Diagnostics>,
}

impl std::fmt::Debug for JitbitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JitbitClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl JitbitClient {
    /// Creates a client that reports through `tracing`, and verifies the
    /// credentials.
    ///
    /// Every HTTP call, the probe included, is bounded by a 30 second
    /// transport timeout. A timed-out probe fails construction; a timed-out
    /// endpoint call is a transport failure, reported and returned as
    /// `None`/`false`.
    ///
    /// # Errors
    ///
    /// - `JitbitError::HttpClient` if the HTTP client fails to initialize.
    /// - `JitbitError::Authentication` if the probe does not return 200.
    pub async fn new(config: &Config) -> Result<Self, JitbitError> {
        Self::with_diagnostics(config, Arc::new(TracingDiagnostics)).await
    }

    /// Creates a client reporting through the given diagnostics sink, and
    /// verifies the credentials.
    ///
    /// # Errors
    ///
    /// Same as [`JitbitClient::new`].
    pub async fn with_diagnostics(
        config: &Config,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<Self, JitbitError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(JitbitError::HttpClient)?;

        let client = Self {
            http,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password().to_string(),
            diagnostics,
        };

        if let Err(e) = client.test_credentials().await {
            client.report(DiagnosticEvent::warn(
                AUTH_PROBE_ENDPOINT,
                None,
                "Authorization failed for Jitbit API",
            ));
            return Err(e);
        }

        tracing::debug!(base_url = %client.base_url, "Jitbit client initialized");
        Ok(client)
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the authentication probe.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Authentication` unless the probe returns 200.
    async fn test_credentials(&self) -> Result<(), JitbitError> {
        match self.request(AUTH_PROBE_ENDPOINT, None).await {
            Ok(response) if response.status == StatusCode::OK => Ok(()),
            Ok(response) => Err(JitbitError::authentication(format!(
                "probe returned HTTP {}, check username and password",
                response.status.as_u16()
            ))),
            Err(e) => Err(JitbitError::authentication(format!(
                "probe could not reach {}: {}",
                self.base_url,
                e.sanitized_display(&self.password)
            ))),
        }
    }

    // ========================================================================
    // Request primitive
    // ========================================================================

    /// Performs one authenticated call to `<base>/api/<endpoint>`.
    ///
    /// `endpoint` may already carry a query string. With a form the call is
    /// a POST with an url-encoded body, otherwise a GET. The status code is
    /// not interpreted here.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Http` if no response was received.
    pub async fn request(
        &self,
        endpoint: &str,
        form: Option<&[(&'static str, String)]>,
    ) -> Result<RawResponse, JitbitError> {
        let url = format!("{}/api/{}", self.base_url, endpoint);
        let method = if form.is_some() { "POST" } else { "GET" };

        tracing::debug!(
            method = method,
            endpoint = %endpoint_name(endpoint),
            "Making Jitbit API request"
        );

        let req = match form {
            Some(fields) => self.http.post(&url).form(fields),
            None => self.http.get(&url),
        };

        let response = req
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(JitbitError::Http)?;
        let status = response.status();
        let body = response.text().await.map_err(JitbitError::Http)?;

        tracing::trace!(status = status.as_u16(), body = %body, "Jitbit API response");

        Ok(RawResponse { status, body })
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// Lists tickets matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `offset` is 0 (paging is 1-based).
    pub async fn list_tickets(&self, params: &TicketListParams) -> Result<Option<Value>, JitbitError> {
        params.validate()?;
        Ok(self.read(params.to_path()).await)
    }

    /// Gets one ticket. `None` if it does not exist or the read failed.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `id` is 0.
    pub async fn get_ticket(&self, id: u64) -> Result<Option<Value>, JitbitError> {
        require_id(id, "ticket id")?;
        Ok(self.read(Query::new("Ticket").param("id", id).build()).await)
    }

    /// Creates a ticket and returns its id.
    ///
    /// The API answers a creation with a bare number. Anything that does not
    /// parse as one yields `None`, whether the ticket was created or not.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if category, subject or body is
    /// missing.
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Option<u64>, JitbitError> {
        ticket.validate()?;
        let id = self
            .create("Ticket", ticket.to_form(), &format!("ticket {:?}", ticket.subject), None)
            .await;
        Ok(id)
    }

    /// Updates fields of an existing ticket. `true` on HTTP 200.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if the id is 0 or nothing changes.
    pub async fn update_ticket(&self, update: &TicketUpdate) -> Result<bool, JitbitError> {
        update.validate()?;
        Ok(self
            .update("UpdateTicket", update.to_form(), &format!("ticket {}", update.id))
            .await)
    }

    /// Sets a custom field on a ticket and returns the remote status code.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if either id is 0.
    pub async fn set_custom_field(
        &self,
        ticket_id: u64,
        field_id: u64,
        value: &CustomFieldValue,
    ) -> Result<Option<StatusCode>, JitbitError> {
        require_id(ticket_id, "ticket_id")?;
        require_id(field_id, "field_id")?;
        let form = Form::new()
            .field("ticketId", ticket_id)
            .field("fieldId", field_id)
            .field("value", value);
        Ok(self.post_status("SetCustomField", form).await)
    }

    /// Gets the custom field values of a ticket.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `ticket_id` is 0.
    pub async fn get_ticket_custom_fields(&self, ticket_id: u64) -> Result<Option<Value>, JitbitError> {
        require_id(ticket_id, "ticket_id")?;
        Ok(self
            .read(Query::new("TicketCustomFields").param("id", ticket_id).build())
            .await)
    }

    /// Subscribes a user to a ticket and returns the remote status code.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if either id is 0.
    pub async fn add_subscriber(
        &self,
        ticket_id: u64,
        user_id: u64,
    ) -> Result<Option<StatusCode>, JitbitError> {
        require_id(ticket_id, "ticket_id")?;
        require_id(user_id, "user_id")?;
        let form = Form::new()
            .field("ticketId", ticket_id)
            .field("userId", user_id);
        Ok(self.post_status("AddSubscriber", form).await)
    }

    /// Merges `second_id` into `id` and returns the decoded response.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if either id is 0 or both are equal.
    pub async fn merge_tickets(&self, id: u64, second_id: u64) -> Result<Option<Value>, JitbitError> {
        require_id(id, "id")?;
        require_id(second_id, "id2")?;
        if id == second_id {
            return Err(JitbitError::validation("cannot merge a ticket with itself"));
        }
        let form = Form::new().field("id", id).field("id2", second_id);
        Ok(self.post_json("MergeTickets", form).await)
    }

    /// Gets helpdesk statistics.
    pub async fn get_stats(&self) -> Option<Value> {
        self.read("Stats".to_string()).await
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Lists the comments of a ticket.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `ticket_id` is 0.
    pub async fn list_comments(&self, ticket_id: u64) -> Result<Option<Value>, JitbitError> {
        require_id(ticket_id, "ticket_id")?;
        Ok(self.read(Query::new("Comments").param("id", ticket_id).build()).await)
    }

    /// Posts a comment on a ticket. `true` on HTTP 200.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if the id is 0 or the body is empty.
    pub async fn add_comment(&self, comment: &NewComment) -> Result<bool, JitbitError> {
        comment.validate()?;
        Ok(self
            .update(
                "Comment",
                comment.to_form(),
                &format!("comment on ticket {}", comment.ticket_id),
            )
            .await)
    }

    /// Lists canned comment templates.
    pub async fn list_comment_templates(&self) -> Option<Value> {
        self.read("CommentTemplates".to_string()).await
    }

    // ========================================================================
    // Categories
    // ========================================================================

    /// Lists ticket categories.
    pub async fn list_categories(&self) -> Option<Value> {
        self.read("categories".to_string()).await
    }

    /// Lists custom fields defined for a category.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `category_id` is 0.
    pub async fn get_custom_fields_for_category(
        &self,
        category_id: u64,
    ) -> Result<Option<Value>, JitbitError> {
        require_id(category_id, "category_id")?;
        Ok(self
            .read(
                Query::new("CustomFieldsForCategory")
                    .param("categoryId", category_id)
                    .build(),
            )
            .await)
    }

    /// Lists technicians allowed to handle a category.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `category_id` is 0.
    pub async fn get_techs_for_category(&self, category_id: u64) -> Result<Option<Value>, JitbitError> {
        require_id(category_id, "category_id")?;
        Ok(self
            .read(Query::new("TechsForCategory").param("id", category_id).build())
            .await)
    }

    // ========================================================================
    // Users and companies
    // ========================================================================

    /// Lists users, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `page` is 0.
    pub async fn list_users(&self, params: &UserListParams) -> Result<Option<Value>, JitbitError> {
        params.validate()?;
        Ok(self.read(params.to_path()).await)
    }

    /// Looks a user up by email address.
    ///
    /// The address must be non-empty and have the `local@domain` shape, the
    /// same check `create_user` applies; anything else could never match a
    /// user.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `email` is empty or has no
    /// `local@domain` shape.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<Value>, JitbitError> {
        require_email(email)?;
        Ok(self
            .read(Query::new("UserByEmail").param("email", email.trim()).build())
            .await)
    }

    /// Creates a user and returns its id.
    ///
    /// Same id ambiguity as [`JitbitClient::create_ticket`]. An HTTP 500
    /// usually means the user already exists.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if username, password or email is
    /// missing.
    pub async fn create_user(&self, user: &NewUser) -> Result<Option<u64>, JitbitError> {
        user.validate()?;
        let id = self
            .create(
                "CreateUser",
                user.to_form(),
                &format!("user {}", user.display_name()),
                Some("it may be the user already exists"),
            )
            .await;
        Ok(id)
    }

    /// Updates a user. `true` on HTTP 200; the API returns nothing richer.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `user_id` is 0 or a given email
    /// is malformed.
    pub async fn update_user(&self, update: &UserUpdate) -> Result<bool, JitbitError> {
        update.validate()?;
        Ok(self
            .update("UpdateUser", update.to_form(), &format!("user {}", update.user_id))
            .await)
    }

    /// Lists companies.
    pub async fn list_companies(&self) -> Option<Value> {
        self.read("Companies".to_string()).await
    }

    /// Creates a company and returns its id.
    ///
    /// Same id ambiguity as [`JitbitClient::create_ticket`].
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if the name is empty.
    pub async fn create_company(&self, company: &NewCompany) -> Result<Option<u64>, JitbitError> {
        company.validate()?;
        let id = self
            .create(
                "Company",
                company.to_form(),
                &format!("company {:?}", company.name),
                None,
            )
            .await;
        Ok(id)
    }

    // ========================================================================
    // Knowledge base
    // ========================================================================

    /// Lists knowledge-base articles.
    pub async fn list_articles(&self) -> Option<Value> {
        self.read("Articles".to_string()).await
    }

    /// Gets one knowledge-base article.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `article_id` is 0.
    pub async fn get_article(&self, article_id: u64) -> Result<Option<Value>, JitbitError> {
        require_id(article_id, "article_id")?;
        Ok(self.read(format!("Article/{}", article_id)).await)
    }

    // ========================================================================
    // Assets
    // ========================================================================

    /// Lists assets matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `page` is 0 or a filter id is 0.
    pub async fn list_assets(&self, params: &AssetListParams) -> Result<Option<Value>, JitbitError> {
        params.validate()?;
        Ok(self.read(params.to_path()).await)
    }

    /// Gets one asset.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if `asset_id` is 0.
    pub async fn get_asset(&self, asset_id: u64) -> Result<Option<Value>, JitbitError> {
        require_id(asset_id, "asset_id")?;
        Ok(self.read(Query::new("Asset").param("id", asset_id).build()).await)
    }

    /// Creates an asset and returns its id.
    ///
    /// Same id ambiguity as [`JitbitClient::create_ticket`].
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if model name, manufacturer or type
    /// is missing, or an owner id is 0.
    pub async fn create_asset(&self, asset: &NewAsset) -> Result<Option<u64>, JitbitError> {
        asset.validate()?;
        let id = self
            .create(
                "Asset",
                asset.to_form(),
                &format!("asset {:?}", asset.model_name),
                None,
            )
            .await;
        Ok(id)
    }

    /// Updates fields of an existing asset. `true` on HTTP 200.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if the id is 0, a given text field
    /// is blank, or nothing changes.
    pub async fn update_asset(&self, update: &AssetUpdate) -> Result<bool, JitbitError> {
        update.validate()?;
        Ok(self
            .update("UpdateAsset", update.to_form(), &format!("asset {}", update.id))
            .await)
    }

    /// Assigns an asset to a user. `true` on HTTP 200.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if either id is 0.
    pub async fn assign_asset_to_user(&self, asset_id: u64, user_id: u64) -> Result<bool, JitbitError> {
        require_id(asset_id, "asset_id")?;
        require_id(user_id, "user_id")?;
        let form = Form::new().field("assetId", asset_id).field("userId", user_id);
        Ok(self
            .update(
                "AssignAssetToUser",
                form,
                &format!("asset {} to user {}", asset_id, user_id),
            )
            .await)
    }

    /// Links an asset to a ticket. `true` on HTTP 200.
    ///
    /// # Errors
    ///
    /// Returns `JitbitError::Validation` if either id is 0.
    pub async fn add_asset_to_ticket(&self, asset_id: u64, ticket_id: u64) -> Result<bool, JitbitError> {
        require_id(asset_id, "asset_id")?;
        require_id(ticket_id, "ticket_id")?;
        let form = Form::new().field("assetId", asset_id).field("ticketId", ticket_id);
        Ok(self
            .update(
                "AddAssetToTicket",
                form,
                &format!("asset {} to ticket {}", asset_id, ticket_id),
            )
            .await)
    }

    // ========================================================================
    // Response interpretation
    // ========================================================================

    fn report(&self, event: DiagnosticEvent) {
        self.diagnostics.report(event);
    }

    /// Calls the request primitive, reporting a transport failure.
    async fn send(&self, path: &str, form: Option<FormFields>) -> Option<RawResponse> {
        match self.request(path, form.as_deref()).await {
            Ok(response) => Some(response),
            Err(e) => {
                self.report(DiagnosticEvent::warn(
                    endpoint_name(path),
                    None,
                    format!("Request failed: {}", e.sanitized_display(&self.password)),
                ));
                None
            }
        }
    }

    /// GET returning decoded JSON on 200.
    async fn read(&self, path: String) -> Option<Value> {
        let response = self.send(&path, None).await?;
        self.decode(endpoint_name(&path), response)
    }

    /// POST returning decoded JSON on 200.
    async fn post_json(&self, endpoint: &str, form: Form) -> Option<Value> {
        let response = self.send(endpoint, Some(form.build())).await?;
        self.decode(endpoint, response)
    }

    fn decode(&self, endpoint: &str, response: RawResponse) -> Option<Value> {
        if response.status == StatusCode::OK {
            match serde_json::from_str(&response.body) {
                Ok(value) => return Some(value),
                Err(e) => {
                    self.report(DiagnosticEvent::warn(
                        endpoint,
                        Some(response.status.as_u16()),
                        format!(
                            "Failure for {}, invalid JSON ({}): {}",
                            endpoint,
                            e,
                            truncate_body(&response.body)
                        ),
                    ));
                    return None;
                }
            }
        }

        self.report(DiagnosticEvent::warn(
            endpoint,
            Some(response.status.as_u16()),
            format!(
                "Failure for {}, status: {}, content: {}",
                endpoint,
                response.status.as_u16(),
                truncate_body(&response.body)
            ),
        ));
        None
    }

    /// POST whose body is a bare numeric id on success.
    async fn create(
        &self,
        endpoint: &str,
        form: Form,
        subject: &str,
        server_error_hint: Option<&str>,
    ) -> Option<u64> {
        let response = self.send(endpoint, Some(form.build())).await?;
        let status = response.status.as_u16();

        if response.status == StatusCode::OK {
            if let Some(id) = parse_id(&response.body) {
                self.report(DiagnosticEvent::info(
                    endpoint,
                    Some(status),
                    format!("Jitbit {} created with id {}", subject, id),
                ));
                return Some(id);
            }
            self.report(DiagnosticEvent::warn(
                endpoint,
                Some(status),
                format!(
                    "Jitbit {} creation returned no id, response was {}",
                    subject,
                    truncate_body(&response.body)
                ),
            ));
            return None;
        }

        let message = match server_error_hint {
            Some(hint) if response.status == StatusCode::INTERNAL_SERVER_ERROR => {
                format!("500 error at Jitbit for {}, {}", subject, hint)
            }
            _ => format!(
                "Jitbit {} creation failed, response was {} {}",
                subject,
                truncate_body(&response.body),
                status
            ),
        };
        self.report(DiagnosticEvent::warn(endpoint, Some(status), message));
        None
    }

    /// POST whose only success signal is HTTP 200.
    async fn update(&self, endpoint: &str, form: Form, subject: &str) -> bool {
        let Some(response) = self.send(endpoint, Some(form.build())).await else {
            return false;
        };
        let status = response.status.as_u16();

        if response.status == StatusCode::OK {
            self.report(DiagnosticEvent::info(
                endpoint,
                Some(status),
                format!("Jitbit {} updated", subject),
            ));
            return true;
        }

        self.report(DiagnosticEvent::warn(
            endpoint,
            Some(status),
            format!(
                "Jitbit update of {} failed, response code was {}, {}",
                subject,
                status,
                truncate_body(&response.body)
            ),
        ));
        false
    }

    /// POST returning the status code as-is.
    async fn post_status(&self, endpoint: &str, form: Form) -> Option<StatusCode> {
        let response = self.send(endpoint, Some(form.build())).await?;
        if response.status != StatusCode::OK {
            self.report(DiagnosticEvent::warn(
                endpoint,
                Some(response.status.as_u16()),
                format!(
                    "{} returned status {}: {}",
                    endpoint,
                    response.status.as_u16(),
                    truncate_body(&response.body)
                ),
            ));
        }
        Some(response.status)
    }
}

/// Endpoint name without query string or path arguments.
fn endpoint_name(path: &str) -> &str {
    path.split(['?', '/']).next().unwrap_or(path)
}

/// Parses a creation response: a bare integer, optionally JSON-quoted.
fn parse_id(body: &str) -> Option<u64> {
    let body = body.trim();
    let body = body
        .strip_prefix('"')
        .and_then(|b| b.strip_suffix('"'))
        .unwrap_or(body);
    body.trim().parse().ok()
}

/// Shortens a body for diagnostics, respecting char boundaries.
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body.to_string();
    }
    let cut = body
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= MAX_ERROR_BODY_LEN)
        .last()
        .unwrap_or(0);
    format!("{}...[truncated]", &body[..cut])
}
