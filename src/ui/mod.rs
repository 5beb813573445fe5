//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering and layout
//! - `input`: Keyboard event handling
//! - `modals`: Onboarding/offboarding modal overlays
//! - `styles`: Color schemes and text styling
//! - `tabs`: Tab-specific content rendering (VAs, phones, creators)

pub mod input;
pub mod modals;
pub mod render;
pub mod styles;
pub mod tabs;
