//! REST API client module for the VA management backend.
//!
//! This module provides the `ApiClient` for listing VA, phone, and creator
//! records and for issuing the two lifecycle mutations (complete-onboarding
//! and offboard).

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
