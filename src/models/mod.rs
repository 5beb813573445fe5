//! Data models for VA lifecycle entities.
//!
//! This module contains all the data structures used to represent
//! backend data including:
//!
//! - `Va`: virtual assistant records with lifecycle status
//! - `Phone`, `NewPhone`: device inventory and creation payload
//! - `Creator`: creator accounts with VA assignments
//! - `OnboardingPayload`, `OffboardingPayload`: mutation request bodies

pub mod creator;
pub mod payloads;
pub mod phone;
pub mod va;

pub use creator::Creator;
pub use payloads::{OffboardingPayload, OnboardingPayload, PhoneHandling, PhoneType};
pub use phone::{NewPhone, Phone};
pub use va::{Va, VaStatus};
