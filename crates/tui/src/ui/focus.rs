//! Focus node identifiers.
//!
//! Single source of truth for the names registered with `rat-focus`. Names
//! show up in focus debugging output and are used to restore focus by id.

use otp_entry_types::OTP_LENGTH;

/// Passcode panel focus nodes.
pub mod otp {
    /// Container node wrapping all slots.
    pub const CONTAINER: &str = "otp.container";

    /// One node per slot, in display order.
    pub const SLOTS: [&str; super::OTP_LENGTH] = ["otp.slot.0", "otp.slot.1", "otp.slot.2", "otp.slot.3", "otp.slot.4", "otp.slot.5"];
}

/// Focus node name for the slot at `index`, if it exists.
pub fn slot_node_id(index: usize) -> Option<&'static str> {
    otp::SLOTS.get(index).copied()
}
