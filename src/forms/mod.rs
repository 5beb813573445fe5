//! Form state for the two modal workflows.
//!
//! Payload derivation lives here, separate from rendering and input
//! routing, so the submit semantics are unit-testable:
//!
//! - `select`: searchable VA picker used by both flows
//! - `onboarding`: complete-onboarding form and phone provisioning
//! - `offboard`: offboarding form with exclusive phone disposition

pub mod offboard;
pub mod onboarding;
pub mod select;

pub use offboard::{OffboardField, OffboardForm};
pub use onboarding::{OnboardingField, OnboardingForm};
pub use select::{SearchSelect, SelectOption};
