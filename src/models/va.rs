use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a VA record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaStatus {
    Active,
    Archived,
}

impl std::fmt::Display for VaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaStatus::Active => write!(f, "active"),
            VaStatus::Archived => write!(f, "archived"),
        }
    }
}

/// A virtual assistant record as returned by the backend.
///
/// The roster cache holds active VAs only; archived VAs are fetched on
/// demand when a phone transfer source may be an offboarded VA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Va {
    pub id: i64,
    pub full_name: String,
    pub telegram_handle: String,
    pub va_type: String,
    pub status: VaStatus,
    #[serde(default)]
    pub onboarding_date: Option<NaiveDate>,
}

impl Va {
    /// Display label for selects; archived VAs are marked so the operator
    /// can tell a transfer source is no longer on the roster.
    pub fn select_label(&self) -> String {
        match self.status {
            VaStatus::Archived => format!("{} (Archived)", self.full_name),
            VaStatus::Active => self.full_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn va(id: i64, name: &str, status: VaStatus) -> Va {
        Va {
            id,
            full_name: name.to_string(),
            telegram_handle: name.to_lowercase().replace(' ', "_"),
            va_type: "content".to_string(),
            status,
            onboarding_date: None,
        }
    }

    #[test]
    fn test_select_label_marks_archived() {
        assert_eq!(va(1, "Maria Santos", VaStatus::Active).select_label(), "Maria Santos");
        assert_eq!(
            va(2, "Jose Cruz", VaStatus::Archived).select_label(),
            "Jose Cruz (Archived)"
        );
    }

    #[test]
    fn test_status_wire_format() {
        let json = r#"{"id":7,"full_name":"Maria Santos","telegram_handle":"maria_s","va_type":"content","status":"archived","onboarding_date":"2024-11-02"}"#;
        let parsed: Va = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, VaStatus::Archived);
        assert_eq!(
            parsed.onboarding_date,
            Some(NaiveDate::from_ymd_opt(2024, 11, 2).unwrap())
        );
    }

    #[test]
    fn test_onboarding_date_optional() {
        let json = r#"{"id":7,"full_name":"Maria Santos","telegram_handle":"maria_s","va_type":"content","status":"active"}"#;
        let parsed: Va = serde_json::from_str(json).unwrap();
        assert!(parsed.onboarding_date.is_none());
    }
}
