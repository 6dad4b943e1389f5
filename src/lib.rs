//! # Jitbit
//!
//! An async client for the Jitbit Helpdesk REST API: tickets, users,
//! companies, categories, knowledge-base articles, comments and assets.
//!
//! Each remote endpoint is one method on [`JitbitClient`](client::JitbitClient).
//! Methods validate their arguments, perform a single authenticated HTTP
//! call and decode the JSON response.
//!
//! ## Architecture
//!
//! - [`config`] - Connection settings from explicit values or environment variables
//! - [`error`] - Error type and password redaction
//! - [`client`] - The API client and its request primitive
//! - [`models`] - Parameter structures for endpoints with optional arguments
//! - [`diagnostics`] - Pluggable sink for failure reports
//! - [`query`] - Query string and form body builders
//!
//! ## Error policy
//!
//! - Bad credentials fail construction with `JitbitError::Authentication`.
//! - Bad arguments fail with `JitbitError::Validation` before any request.
//! - Remote failures (non-200, invalid JSON, missing id) are reported through
//!   [`Diagnostics`](diagnostics::Diagnostics) and returned as `None`/`false`.
//!
//! ## Configuration
//!
//! [`Config::from_env`](config::Config::from_env) reads:
//!
//! - `JITBIT_URL`: Base URL of the helpdesk
//! - `JITBIT_USERNAME`: Account username
//! - `JITBIT_PASSWORD`: Account password
//!
//! ## Example
//!
//! ```ignore
//! use jitbit::client::JitbitClient;
//! use jitbit::config::Config;
//! use jitbit::models::{NewTicket, Priority, TicketListMode, TicketListParams};
//!
//! async fn example() -> Result<(), jitbit::error::JitbitError> {
//!     let config = Config::new("https://support.example.com", "admin", "secret")?;
//!     let client = JitbitClient::new(&config).await?;
//!
//!     let params = TicketListParams::new()
//!         .with_mode(TicketListMode::Unclosed)
//!         .with_count(10);
//!     if let Some(tickets) = client.list_tickets(&params).await? {
//!         println!("{tickets:#}");
//!     }
//!
//!     let ticket = NewTicket::new(8, "Printer", "Out of toner", Priority::Normal);
//!     match client.create_ticket(&ticket).await? {
//!         Some(id) => println!("created #{id}"),
//!         None => println!("creation not confirmed"),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod query;

pub use client::JitbitClient;
pub use config::Config;
pub use error::JitbitError;
