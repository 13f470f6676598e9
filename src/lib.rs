//! A client for the Yoga Studio booking API.
//!
//! The [`SessionService`] keeps track of who is logged in and lets any
//! number of observers know when that changes. The [`views`] use it together
//! with the [`endpoints`] to log in, browse sessions and manage bookings.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod endpoints;
pub mod forms;
pub mod models;
mod session;
pub mod subject;
pub mod views;

pub use endpoints::{Backend, EndpointError};
pub use models::{LoginRequest, RegisterRequest, Session, Teacher, User};
pub use session::{SessionInformation, SessionService};

/// The default user agent to use when communicating with the backend.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
