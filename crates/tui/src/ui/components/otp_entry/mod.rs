mod otp_entry_component;
mod state;

pub use otp_entry_component::OtpEntryComponent;
pub use state::{CompletionCallback, EntryPhase, OtpEntryConfig, OtpEntryState};
