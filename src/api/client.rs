//! API client for the VA management backend.
//!
//! This module provides the `ApiClient` struct for listing VA, phone, and
//! creator records and issuing the onboarding/offboarding mutations.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{Creator, NewPhone, OffboardingPayload, OnboardingPayload, Phone, Va};

use super::ApiError;

/// HTTP request timeout in seconds.
/// The backend is a small internal service; anything slower than this is
/// surfaced to the operator as a normal failure rather than left hanging.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// API client for the VA backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== List endpoints =====

    /// Fetch the active VA roster
    pub async fn fetch_vas(&self) -> Result<Vec<Va>> {
        let vas: Vec<Va> = self.get("/vas").await?;
        debug!(count = vas.len(), "VAs fetched");
        Ok(vas)
    }

    /// Fetch archived (offboarded) VAs.
    /// Used to offer them as phone-transfer sources/targets; a phone can
    /// change hands with a VA who has since left.
    pub async fn fetch_archived_vas(&self) -> Result<Vec<Va>> {
        let vas: Vec<Va> = self.get("/vas/archived/list").await?;
        debug!(count = vas.len(), "Archived VAs fetched");
        Ok(vas)
    }

    /// Fetch the phone inventory
    pub async fn fetch_phones(&self) -> Result<Vec<Phone>> {
        let phones: Vec<Phone> = self.get("/phones").await?;
        debug!(count = phones.len(), "Phones fetched");
        Ok(phones)
    }

    /// Fetch the creator list
    pub async fn fetch_creators(&self) -> Result<Vec<Creator>> {
        let creators: Vec<Creator> = self.get("/creators").await?;
        debug!(count = creators.len(), "Creators fetched");
        Ok(creators)
    }

    // ===== Lifecycle mutations =====

    /// Mark a VA's onboarding complete
    pub async fn complete_onboarding(&self, va_id: i64, payload: &OnboardingPayload) -> Result<Va> {
        debug!(va_id, phone_type = ?payload.phone_type, "Completing onboarding");
        self.post(&format!("/vas/{}/complete-onboarding", va_id), payload)
            .await
    }

    /// Create a phone record, assigned to a VA
    pub async fn create_phone(&self, phone: &NewPhone) -> Result<Phone> {
        debug!(va_id = phone.assigned_to_va_id, "Creating phone");
        self.post("/phones", phone).await
    }

    /// Offboard a VA
    pub async fn offboard(&self, va_id: i64, payload: &OffboardingPayload) -> Result<Va> {
        debug!(va_id, reason = %payload.reason, "Offboarding VA");
        self.post(&format!("/vas/{}/offboard", va_id), payload).await
    }
}
