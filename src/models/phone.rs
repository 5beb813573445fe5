use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A phone in the inventory as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phone {
    pub id: i64,
    pub phone_number: String,
    #[serde(default)]
    pub handout_date: Option<NaiveDate>,
    #[serde(default)]
    pub apple_id_email: Option<String>,
    #[serde(default)]
    pub proxy_ip: Option<String>,
    #[serde(default)]
    pub proxy_port: Option<u16>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assigned_to_va_id: Option<i64>,
}

/// Creation payload for `POST /phones`.
///
/// Only issued as part of completing an onboarding with a "new" phone, so
/// `assigned_to_va_id` is mandatory here even though inventory phones can
/// be unassigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPhone {
    pub phone_number: String,
    pub handout_date: Option<NaiveDate>,
    pub apple_id_email: Option<String>,
    pub apple_id_password: Option<String>,
    pub proxy_ip: Option<String>,
    pub proxy_port: Option<u16>,
    pub proxy_username: Option<String>,
    pub proxy_password: Option<String>,
    pub notes: Option<String>,
    pub assigned_to_va_id: i64,
}
