use serde::{Deserialize, Serialize};

/// A creator account; `assigned_va_id` points at the VA managing it.
/// Offboarding a VA vacates its creator assignments, so the creator list
/// is reloaded after every offboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub assigned_va_id: Option<i64>,
}
