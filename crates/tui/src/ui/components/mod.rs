//! UI components: the passcode entry panel.

pub mod component;
pub mod otp_entry;

pub use component::*;
pub use otp_entry::OtpEntryComponent;
