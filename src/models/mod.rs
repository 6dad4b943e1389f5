//! Parameter types for Jitbit API endpoints.
//!
//! Each endpoint with optional arguments gets an explicit structure listing
//! every recognized field, with `None` meaning "omit from the request".
//! Closed vocabularies are enums whose `FromStr` rejects unknown values.

mod asset;
mod comment;
mod common;
mod company;
mod ticket;
mod user;

pub(crate) use common::require_id;
pub(crate) use user::require_email;

pub use asset::*;
pub use comment::*;
pub use company::*;
pub use ticket::*;
pub use user::*;
