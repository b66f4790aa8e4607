//! # otp-entry TUI
//!
//! A terminal widget that collects a six-digit one-time passcode through six
//! single-digit slots. Digits typed, deleted, or pasted into a slot are
//! spliced into one shared buffer; focus moves between slots the way a
//! browser passcode form behaves; and a caller-supplied callback runs every
//! time the buffer becomes a complete six-digit code.
//!
//! ## Architecture
//!
//! - `ui::components::otp_entry` holds the widget state (buffer, focus
//!   handles, completion callback) and the component that maps terminal
//!   events onto it.
//! - `ui::runtime` owns the terminal and the event loop, and executes the
//!   effects components return.
//! - `clipboard` exposes the typed clipboard capability used for Ctrl+V.

mod app;
mod clipboard;
mod ui;

use anyhow::Result;

pub use app::TuiOptions;
pub use clipboard::{ClipboardError, ClipboardSource, SystemClipboard};
pub use ui::components::otp_entry::{CompletionCallback, EntryPhase, OtpEntryConfig, OtpEntryState};

/// Runs the passcode entry UI until the user submits or cancels.
///
/// Returns the submitted code, or `None` if the user left without submitting.
///
/// # Errors
///
/// Terminal setup or teardown failures (raw mode, alternate screen) and
/// rendering I/O errors.
///
/// # Example
///
/// ```no_run
/// use otp_entry_tui::{OtpEntryConfig, TuiOptions, run};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let options = TuiOptions {
///         entry: OtpEntryConfig::new(|code| eprintln!("complete: {code}")),
///         ..TuiOptions::default()
///     };
///     if let Some(code) = run(options).await? {
///         println!("{code}");
///     }
///     Ok(())
/// }
/// ```
pub async fn run(options: TuiOptions) -> Result<Option<String>> {
    ui::runtime::run_app(options).await
}
