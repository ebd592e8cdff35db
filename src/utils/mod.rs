//! Request helpers.

pub mod request_domain;
