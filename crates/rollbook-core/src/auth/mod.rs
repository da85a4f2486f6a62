//! Session handling for the people directory.
//!
//! This module provides:
//! - `Session`: the caller's login state, checked before every directory call
//! - `SessionData`: who is logged in, to which school, and until when
//!
//! The login itself happens outside this crate.

pub mod session;

pub use session::{Session, SessionData};
