//! Utilities shared by the otp-entry crates: persisted preferences and path
//! helpers.

pub mod path_processing;
pub mod preferences;

pub use path_processing::expand_tilde;
pub use preferences::{PREFERENCES_PATH_ENV, PreferencesError, PreferencesPayload, UserPreferences};
