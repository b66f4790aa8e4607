//! Shared types for the otp-entry workspace: the digit buffer behind the
//! passcode slots and the message/effect vocabulary exchanged between the
//! widget and the runtime.

mod buffer;

pub use buffer::{EditRejection, OTP_LENGTH, OtpBuffer, is_digits};

/// Messages that can be sent to update the application state.
///
/// This enum defines the system events that reach components outside of raw
/// key and mouse input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Terminal resized
    Resize(u16, u16),
    /// Clipboard contents read on behalf of the slot at `index`
    ClipboardText { index: usize, text: String },
}

/// Side effects that can be triggered by state changes.
///
/// Components never touch the terminal, the clipboard or the process
/// lifecycle directly; they return effects and the runtime executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the system clipboard and paste it into the slot at `index`
    ReadClipboard { index: usize },
    /// Hand the completed code to the consumer and close the widget
    Submit(String),
    /// Close the widget without submitting
    Quit,
}
