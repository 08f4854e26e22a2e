//! Request middleware.

pub mod blocklist;
