//! Offboarding form state.
//!
//! Phone disposition is mutually exclusive and derived from the single
//! `phone_handling` choice: the payload never sets both a transfer target
//! and the inventory flag.

use crate::models::{OffboardingPayload, PhoneHandling};

use super::select::SearchSelect;

/// Focusable fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffboardField {
    Reason,
    ReasonDetails,
    FinalPayment,
    PhoneHandling,
    TransferTo,
    Notes,
    OffboardedBy,
    Submit,
}

#[derive(Debug, Clone)]
pub struct OffboardForm {
    pub va_id: i64,
    pub reason: String,
    pub reason_details: String,
    pub final_payment: String,
    pub phone_handling: PhoneHandling,
    pub transfer_select: SearchSelect,
    pub notes: String,
    pub offboarded_by: String,
    pub focus: OffboardField,
}

impl OffboardForm {
    pub fn new(va_id: i64) -> Self {
        Self {
            va_id,
            reason: String::new(),
            reason_details: String::new(),
            final_payment: String::new(),
            phone_handling: PhoneHandling::None,
            transfer_select: SearchSelect::new("Select VA..."),
            notes: String::new(),
            offboarded_by: String::new(),
            focus: OffboardField::Reason,
        }
    }

    pub fn shows_transfer_section(&self) -> bool {
        self.phone_handling == PhoneHandling::Transfer
    }

    pub fn cycle_phone_handling(&mut self) {
        self.phone_handling = self.phone_handling.cycle();
        if self.focus == OffboardField::TransferTo && !self.shows_transfer_section() {
            self.focus = OffboardField::PhoneHandling;
        }
    }

    fn field_order() -> &'static [OffboardField] {
        use OffboardField::*;
        &[
            Reason,
            ReasonDetails,
            FinalPayment,
            PhoneHandling,
            TransferTo,
            Notes,
            OffboardedBy,
            Submit,
        ]
    }

    fn is_focusable(&self, field: OffboardField) -> bool {
        match field {
            OffboardField::TransferTo => self.shows_transfer_section(),
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

    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        use OffboardField::*;
        match self.focus {
            Reason => Some(&mut self.reason),
            ReasonDetails => Some(&mut self.reason_details),
            FinalPayment => Some(&mut self.final_payment),
            Notes => Some(&mut self.notes),
            OffboardedBy => Some(&mut self.offboarded_by),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.reason.trim().is_empty() {
            return Err("Offboarding reason is required".to_string());
        }
        Ok(())
    }

    pub fn to_payload(&self) -> OffboardingPayload {
        OffboardingPayload {
            reason: self.reason.trim().to_string(),
            reason_details: self.reason_details.trim().to_string(),
            final_payment: self.final_payment.trim().parse().ok(),
            phone_transferred_to_va_id: match self.phone_handling {
                PhoneHandling::Transfer => self.transfer_select.selected_value(),
                _ => None,
            },
            phone_returned_to_inventory: self.phone_handling == PhoneHandling::Inventory,
            notes: self.notes.trim().to_string(),
            offboarded_by: self.offboarded_by.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with_transfer_target(id: i64) -> OffboardForm {
        let mut form = OffboardForm::new(7);
        form.phone_handling = PhoneHandling::Transfer;
        form.transfer_select.set_options([(id, "Jose Cruz".to_string())]);
        form.transfer_select.cursor_down();
        form.transfer_select.choose_under_cursor();
        form
    }

    #[test]
    fn test_inventory_disposition() {
        let mut form = OffboardForm::new(7);
        form.phone_handling = PhoneHandling::Inventory;
        let payload = form.to_payload();
        assert!(payload.phone_returned_to_inventory);
        assert_eq!(payload.phone_transferred_to_va_id, None);
    }

    #[test]
    fn test_transfer_disposition() {
        let payload = form_with_transfer_target(42).to_payload();
        assert_eq!(payload.phone_transferred_to_va_id, Some(42));
        assert!(!payload.phone_returned_to_inventory);
    }

    #[test]
    fn test_no_disposition() {
        let form = OffboardForm::new(7);
        let payload = form.to_payload();
        assert_eq!(payload.phone_transferred_to_va_id, None);
        assert!(!payload.phone_returned_to_inventory);
    }

    #[test]
    fn test_switching_away_from_transfer_drops_target() {
        let mut form = form_with_transfer_target(42);
        form.phone_handling = PhoneHandling::Inventory;
        let payload = form.to_payload();
        // The stale select choice must not leak into the payload
        assert_eq!(payload.phone_transferred_to_va_id, None);
        assert!(payload.phone_returned_to_inventory);
    }

    #[test]
    fn test_final_payment_parsing() {
        let mut form = OffboardForm::new(7);
        assert_eq!(form.to_payload().final_payment, None);
        form.final_payment = "150.50".to_string();
        assert_eq!(form.to_payload().final_payment, Some(150.50));
        form.final_payment = "not a number".to_string();
        assert_eq!(form.to_payload().final_payment, None);
    }

    #[test]
    fn test_validate_requires_reason() {
        let mut form = OffboardForm::new(7);
        assert!(form.validate().is_err());
        form.reason = "resigned".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_focus_skips_hidden_transfer_select() {
        let mut form = OffboardForm::new(7);
        form.focus = OffboardField::PhoneHandling;
        form.focus_next();
        assert_eq!(form.focus, OffboardField::Notes);

        form.phone_handling = PhoneHandling::Transfer;
        form.focus = OffboardField::PhoneHandling;
        form.focus_next();
        assert_eq!(form.focus, OffboardField::TransferTo);
    }
}
