//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod clients;
pub mod health;
pub mod orders;
#[cfg(test)]
pub(crate) mod test_support;
