//! Complete-onboarding form state.
//!
//! One form instance exists per open modal; opening the modal always
//! constructs a fresh form, which is what forces the conditional phone
//! sections back to hidden regardless of prior modal state.

use chrono::NaiveDate;

use crate::models::{NewPhone, OnboardingPayload, PhoneType};

use super::select::SearchSelect;

/// Focusable fields, in tab order. Phone-section fields are skipped while
/// their section is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingField {
    AppleCode,
    ProxyConfigured,
    Training,
    PhoneType,
    PhoneFromVa,
    PhoneNumber,
    HandoutDate,
    AppleIdEmail,
    AppleIdPassword,
    ProxyIp,
    ProxyPort,
    ProxyUsername,
    ProxyPassword,
    PhoneNotes,
    Submit,
}

#[derive(Debug, Clone)]
pub struct OnboardingForm {
    pub va_id: i64,
    pub apple_code_provided: bool,
    pub proxy_configured: bool,
    pub training_materials_provided: bool,
    pub phone_type: PhoneType,
    pub transfer_select: SearchSelect,
    // Phone details, only submitted for PhoneType::New
    pub phone_number: String,
    pub handout_date: String,
    pub apple_id_email: String,
    pub apple_id_password: String,
    pub proxy_ip: String,
    pub proxy_port: String,
    pub proxy_username: String,
    pub proxy_password: String,
    pub phone_notes: String,
    pub focus: OnboardingField,
}

impl OnboardingForm {
    pub fn new(va_id: i64) -> Self {
        Self {
            va_id,
            apple_code_provided: false,
            proxy_configured: false,
            training_materials_provided: false,
            phone_type: PhoneType::None,
            transfer_select: SearchSelect::new("Select VA..."),
            phone_number: String::new(),
            handout_date: String::new(),
            apple_id_email: String::new(),
            apple_id_password: String::new(),
            proxy_ip: String::new(),
            proxy_port: String::new(),
            proxy_username: String::new(),
            proxy_password: String::new(),
            phone_notes: String::new(),
            focus: OnboardingField::AppleCode,
        }
    }

    pub fn shows_transfer_section(&self) -> bool {
        self.phone_type == PhoneType::Transfer
    }

    pub fn shows_phone_details(&self) -> bool {
        self.phone_type == PhoneType::New
    }

    /// Cycle the phone type, pulling focus back if the focused field's
    /// section just disappeared.
    pub fn cycle_phone_type(&mut self) {
        self.phone_type = self.phone_type.cycle();
        if !self.is_focusable(self.focus) {
            self.focus = OnboardingField::PhoneType;
        }
    }

    fn field_order() -> &'static [OnboardingField] {
        use OnboardingField::*;
        &[
            AppleCode,
            ProxyConfigured,
            Training,
            PhoneType,
            PhoneFromVa,
            PhoneNumber,
            HandoutDate,
            AppleIdEmail,
            AppleIdPassword,
            ProxyIp,
            ProxyPort,
            ProxyUsername,
            ProxyPassword,
            PhoneNotes,
            Submit,
        ]
    }

    fn is_focusable(&self, field: OnboardingField) -> bool {
        use OnboardingField::*;
        match field {
            PhoneFromVa => self.shows_transfer_section(),
            PhoneNumber | HandoutDate | AppleIdEmail | AppleIdPassword | ProxyIp | ProxyPort
            | ProxyUsername | ProxyPassword | PhoneNotes => self.shows_phone_details(),
            _ => true,
        }
    }

    pub fn focus_next(&mut self) {
        self.shift_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.shift_focus(-1);
    }

    fn shift_focus(&mut self, step: isize) {
        let order = Self::field_order();
        let len = order.len() as isize;
        let mut idx = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        loop {
            idx = (idx + step).rem_euclid(len);
            if self.is_focusable(order[idx as usize]) {
                self.focus = order[idx as usize];
                return;
            }
        }
    }

    /// Mutable access to the focused text field, if the focus is on one
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        use OnboardingField::*;
        match self.focus {
            PhoneNumber => Some(&mut self.phone_number),
            HandoutDate => Some(&mut self.handout_date),
            AppleIdEmail => Some(&mut self.apple_id_email),
            AppleIdPassword => Some(&mut self.apple_id_password),
            ProxyIp => Some(&mut self.proxy_ip),
            ProxyPort => Some(&mut self.proxy_port),
            ProxyUsername => Some(&mut self.proxy_username),
            ProxyPassword => Some(&mut self.proxy_password),
            PhoneNotes => Some(&mut self.phone_notes),
            _ => None,
        }
    }

    /// Toggle the focused checkbox; no-op if focus is elsewhere
    pub fn toggle_focused_checkbox(&mut self) {
        use OnboardingField::*;
        match self.focus {
            AppleCode => self.apple_code_provided = !self.apple_code_provided,
            ProxyConfigured => self.proxy_configured = !self.proxy_configured,
            Training => self.training_materials_provided = !self.training_materials_provided,
            _ => {}
        }
    }

    /// Minimal pre-submit check, mirroring per-field requiredness
    pub fn validate(&self) -> Result<(), String> {
        if self.phone_type == PhoneType::New && self.phone_number.trim().is_empty() {
            return Err("Phone number is required for a new phone".to_string());
        }
        Ok(())
    }

    pub fn to_payload(&self) -> OnboardingPayload {
        OnboardingPayload {
            apple_code_provided: self.apple_code_provided,
            proxy_configured: self.proxy_configured,
            training_materials_provided: self.training_materials_provided,
            phone_type: self.phone_type,
            phone_from_va_id: match self.phone_type {
                PhoneType::Transfer => self.transfer_select.selected_value(),
                _ => None,
            },
        }
    }

    /// Phone creation payload; `Some` only when a new phone was chosen
    pub fn phone_payload(&self) -> Option<NewPhone> {
        if self.phone_type != PhoneType::New {
            return None;
        }
        Some(NewPhone {
            phone_number: self.phone_number.trim().to_string(),
            handout_date: NaiveDate::parse_from_str(self.handout_date.trim(), "%Y-%m-%d").ok(),
            apple_id_email: non_empty(&self.apple_id_email),
            apple_id_password: non_empty(&self.apple_id_password),
            proxy_ip: non_empty(&self.proxy_ip),
            proxy_port: self.proxy_port.trim().parse().ok(),
            proxy_username: non_empty(&self.proxy_username),
            proxy_password: non_empty(&self.proxy_password),
            notes: non_empty(&self.phone_notes),
            assigned_to_va_id: self.va_id,
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_form_hides_conditional_sections() {
        let form = OnboardingForm::new(5);
        assert!(!form.shows_transfer_section());
        assert!(!form.shows_phone_details());
        assert_eq!(form.to_payload().phone_type, PhoneType::None);
    }

    #[test]
    fn test_transfer_payload_carries_selected_id() {
        let mut form = OnboardingForm::new(5);
        form.phone_type = PhoneType::Transfer;
        form.transfer_select.set_options([(9, "Jose Cruz (Archived)".to_string())]);
        form.transfer_select.cursor_down();
        form.transfer_select.choose_under_cursor();

        let payload = form.to_payload();
        assert_eq!(payload.phone_type, PhoneType::Transfer);
        assert_eq!(payload.phone_from_va_id, Some(9));
        // Transfer never creates a phone record
        assert!(form.phone_payload().is_none());
    }

    #[test]
    fn test_new_phone_payload_assigned_to_same_va() {
        let mut form = OnboardingForm::new(5);
        form.phone_type = PhoneType::New;
        form.phone_number = "555 123 4567".to_string();
        form.handout_date = "2025-06-01".to_string();
        form.proxy_port = "8080".to_string();
        form.apple_id_email = "  ".to_string(); // whitespace-only stays None

        let phone = form.phone_payload().expect("new phone expected");
        assert_eq!(phone.assigned_to_va_id, 5);
        assert_eq!(phone.phone_number, "555 123 4567");
        assert_eq!(phone.proxy_port, Some(8080));
        assert_eq!(
            phone.handout_date,
            Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        );
        assert!(phone.apple_id_email.is_none());

        // Payload for the onboarding call itself carries no transfer id
        assert_eq!(form.to_payload().phone_from_va_id, None);
    }

    #[test]
    fn test_validate_requires_number_for_new_phone() {
        let mut form = OnboardingForm::new(5);
        form.phone_type = PhoneType::New;
        assert!(form.validate().is_err());
        form.phone_number = "5551234567".to_string();
        assert!(form.validate().is_ok());

        // Not required for transfer/none
        form.phone_number.clear();
        form.phone_type = PhoneType::Transfer;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_focus_skips_hidden_sections() {
        let mut form = OnboardingForm::new(5);
        form.focus = OnboardingField::PhoneType;
        form.focus_next();
        // No phone sections visible, so focus lands on Submit
        assert_eq!(form.focus, OnboardingField::Submit);

        form.phone_type = PhoneType::Transfer;
        form.focus = OnboardingField::PhoneType;
        form.focus_next();
        assert_eq!(form.focus, OnboardingField::PhoneFromVa);
        form.focus_next();
        assert_eq!(form.focus, OnboardingField::Submit);
    }

    #[test]
    fn test_hiding_a_section_pulls_focus_back() {
        let mut form = OnboardingForm::new(5);
        form.phone_type = PhoneType::New;
        form.focus = OnboardingField::ProxyIp;
        form.cycle_phone_type(); // New -> Transfer, phone details hidden
        assert_eq!(form.focus, OnboardingField::PhoneType);
    }

    #[test]
    fn test_checkbox_toggling() {
        let mut form = OnboardingForm::new(5);
        form.focus = OnboardingField::Training;
        form.toggle_focused_checkbox();
        assert!(form.training_materials_provided);
        form.toggle_focused_checkbox();
        assert!(!form.training_materials_provided);
    }
}
