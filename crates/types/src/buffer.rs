//! Fixed-capacity digit buffer backing the one-time-passcode slots.
//!
//! The buffer is stored as the logical string the slots display: slot `i`
//! shows the character at byte `i`, or nothing when the string is shorter.
//! Every edit is expressed as a splice over that string, so edits at
//! positions past the end compact toward the front instead of leaving holes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of slots (and digits) in a complete passcode.
pub const OTP_LENGTH: usize = 6;

/// Reason an edit was discarded. The buffer is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditRejection {
    /// The inserted text contained something other than ASCII digits.
    #[error("input contains non-digit characters")]
    NonDigit,
    /// The spliced result would be longer than [`OTP_LENGTH`].
    #[error("edit would grow the passcode to {len} digits (max {max})", max = OTP_LENGTH)]
    Overflow { len: usize },
}

/// Returns `true` for the empty string or a string made only of ASCII digits.
pub fn is_digits(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

/// Ordered digits entered so far; never longer than [`OTP_LENGTH`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OtpBuffer {
    digits: String,
}

impl OtpBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// All slots are filled.
    pub fn is_complete(&self) -> bool {
        self.digits.len() == OTP_LENGTH
    }

    /// Digit displayed by the slot at `index`, if any.
    pub fn slot(&self, index: usize) -> Option<char> {
        self.digits.as_bytes().get(index).map(|byte| char::from(*byte))
    }

    /// Builds `self[0..start] + insert + self[end..]`.
    ///
    /// Both positions are clamped to the current length and `end` never
    /// precedes `start`. Fails without touching `self` when `insert` is not
    /// digit-only or the result would exceed [`OTP_LENGTH`].
    pub fn spliced(&self, start: usize, end: usize, insert: &str) -> Result<OtpBuffer, EditRejection> {
        if !is_digits(insert) {
            return Err(EditRejection::NonDigit);
        }
        let len = self.digits.len();
        let start = start.min(len);
        let end = end.clamp(start, len);

        let new_len = start + insert.len() + (len - end);
        if new_len > OTP_LENGTH {
            return Err(EditRejection::Overflow { len: new_len });
        }

        let mut digits = String::with_capacity(new_len);
        digits.push_str(&self.digits[..start]);
        digits.push_str(insert);
        digits.push_str(&self.digits[end..]);
        Ok(OtpBuffer { digits })
    }
}

impl fmt::Display for OtpBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl TryFrom<String> for OtpBuffer {
    type Error = EditRejection;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        OtpBuffer::new().spliced(0, 0, &value)
    }
}

impl TryFrom<&str> for OtpBuffer {
    type Error = EditRejection;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        OtpBuffer::new().spliced(0, 0, value)
    }
}

impl From<OtpBuffer> for String {
    fn from(buffer: OtpBuffer) -> Self {
        buffer.digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(digits: &str) -> OtpBuffer {
        OtpBuffer::try_from(digits).unwrap()
    }

    #[test]
    fn digit_check_is_ascii_only() {
        assert!(is_digits(""));
        assert!(is_digits("0123456789"));
        assert!(!is_digits("12a456"));
        assert!(!is_digits(" 1"));
        // Arabic-Indic digit three.
        assert!(!is_digits("\u{0663}"));
    }

    #[test]
    fn splice_replaces_single_position() {
        let next = buffer("12345").spliced(2, 3, "9").unwrap();
        assert_eq!(next.as_str(), "12945");
    }

    #[test]
    fn splice_past_end_compacts() {
        let next = buffer("12").spliced(4, 5, "7").unwrap();
        assert_eq!(next.as_str(), "127");
        assert_eq!(next.slot(2), Some('7'));
        assert_eq!(next.slot(4), None);
    }

    #[test]
    fn splice_with_inverted_range_inserts() {
        let next = buffer("1234").spliced(2, 1, "").unwrap();
        assert_eq!(next.as_str(), "1234");
    }

    #[test]
    fn overflow_is_rejected() {
        let full = buffer("123456");
        assert_eq!(full.spliced(6, 7, "7"), Err(EditRejection::Overflow { len: 7 }));
        assert_eq!(buffer("1234").spliced(2, 2, "999"), Err(EditRejection::Overflow { len: 7 }));
    }

    #[test]
    fn non_digit_is_rejected() {
        assert_eq!(buffer("12").spliced(0, 1, "x"), Err(EditRejection::NonDigit));
    }

    #[test]
    fn deserialize_validates_contents() {
        let parsed: OtpBuffer = serde_json::from_str("\"123456\"").unwrap();
        assert!(parsed.is_complete());
        assert!(serde_json::from_str::<OtpBuffer>("\"1234567\"").is_err());
        assert!(serde_json::from_str::<OtpBuffer>("\"12ab\"").is_err());
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"123456\"");
    }
}
