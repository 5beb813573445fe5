//! Request bodies for the two lifecycle mutations.
//!
//! Both payloads are derived from modal form state in `crate::forms`; the
//! invariant is that exactly one phone disposition applies per flow, driven
//! by a single selected option rather than independent fields.

use serde::{Deserialize, Serialize};

/// Phone provisioning choice during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneType {
    New,
    Transfer,
    #[default]
    None,
}

impl PhoneType {
    pub fn label(&self) -> &'static str {
        match self {
            PhoneType::New => "New phone",
            PhoneType::Transfer => "Transfer from another VA",
            PhoneType::None => "No phone",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            PhoneType::None => PhoneType::New,
            PhoneType::New => PhoneType::Transfer,
            PhoneType::Transfer => PhoneType::None,
        }
    }
}

/// Phone disposition choice during offboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneHandling {
    Transfer,
    Inventory,
    #[default]
    None,
}

impl PhoneHandling {
    pub fn label(&self) -> &'static str {
        match self {
            PhoneHandling::Transfer => "Transfer to another VA",
            PhoneHandling::Inventory => "Return to inventory",
            PhoneHandling::None => "No phone / keep",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            PhoneHandling::None => PhoneHandling::Transfer,
            PhoneHandling::Transfer => PhoneHandling::Inventory,
            PhoneHandling::Inventory => PhoneHandling::None,
        }
    }
}

/// Body for `POST /vas/{id}/complete-onboarding`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardingPayload {
    pub apple_code_provided: bool,
    pub proxy_configured: bool,
    pub training_materials_provided: bool,
    pub phone_type: PhoneType,
    pub phone_from_va_id: Option<i64>,
}

/// Body for `POST /vas/{id}/offboard`.
///
/// `phone_transferred_to_va_id` and `phone_returned_to_inventory` are
/// mutually exclusive; at most one is set, both may be empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffboardingPayload {
    pub reason: String,
    pub reason_details: String,
    pub final_payment: Option<f64>,
    pub phone_transferred_to_va_id: Option<i64>,
    pub phone_returned_to_inventory: bool,
    pub notes: String,
    pub offboarded_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_type_wire_format() {
        assert_eq!(serde_json::to_string(&PhoneType::New).unwrap(), "\"new\"");
        assert_eq!(serde_json::to_string(&PhoneType::Transfer).unwrap(), "\"transfer\"");
        assert_eq!(serde_json::to_string(&PhoneType::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_onboarding_payload_shape() {
        let payload = OnboardingPayload {
            apple_code_provided: true,
            proxy_configured: false,
            training_materials_provided: true,
            phone_type: PhoneType::Transfer,
            phone_from_va_id: Some(9),
        };
        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["phone_type"], "transfer");
        assert_eq!(json["phone_from_va_id"], 9);
        assert_eq!(json["apple_code_provided"], true);
        assert_eq!(json["proxy_configured"], false);
    }
}
