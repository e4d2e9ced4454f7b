//! Resource endpoints of the super-admin API.
//!
//! One module per resource, each a set of free functions over [`ApiClient`].
//!
//! [`ApiClient`]: crate::client::ApiClient

pub mod audit;
pub mod billing;
pub mod calendar;
pub mod dashboard;
pub mod onboarding;
pub mod parent_request;
pub mod report;
pub mod role;
pub mod school;
pub mod school_admin;
pub mod security;
