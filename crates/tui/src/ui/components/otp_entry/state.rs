//! State for the six-slot passcode entry widget.
//!
//! Owns the digit buffer, one focus handle per slot, and the completion
//! callback. Every handler is a synchronous transition on the buffer
//! followed by an optional focus move through the host's `rat_focus::Focus`.
//! Invalid input (non-digits, overflow past six characters) is dropped
//! silently; the previous buffer stays in place.

use std::fmt;

use otp_entry_types::{EditRejection, OTP_LENGTH, OtpBuffer, is_digits};
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, warn};

use crate::clipboard::ClipboardSource;
use crate::ui::focus;

/// Receives the full code every time the buffer changes into a complete state.
pub type CompletionCallback = Box<dyn FnMut(&str)>;

/// Options accepted when the widget is created.
pub struct OtpEntryConfig {
    pub on_verification_complete: CompletionCallback,
}

impl OtpEntryConfig {
    pub fn new(on_verification_complete: impl FnMut(&str) + 'static) -> Self {
        Self {
            on_verification_complete: Box::new(on_verification_complete),
        }
    }
}

impl Default for OtpEntryConfig {
    fn default() -> Self {
        Self::new(|_| {})
    }
}

/// The two observable states of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPhase {
    Incomplete,
    Complete,
}

pub struct OtpEntryState {
    buffer: OtpBuffer,
    slots: [Option<FocusFlag>; OTP_LENGTH],
    container: FocusFlag,
    on_verification_complete: CompletionCallback,
}

impl OtpEntryState {
    pub fn new(config: OtpEntryConfig) -> Self {
        Self {
            buffer: OtpBuffer::new(),
            slots: Default::default(),
            container: FocusFlag::new().with_name(focus::otp::CONTAINER),
            on_verification_complete: config.on_verification_complete,
        }
    }

    // ----- Buffer accessors -----

    pub fn buffer(&self) -> &OtpBuffer {
        &self.buffer
    }

    pub fn code(&self) -> &str {
        self.buffer.as_str()
    }

    /// Digit shown in the slot at `index`, or `None` when the slot is empty.
    pub fn slot_digit(&self, index: usize) -> Option<char> {
        self.buffer.slot(index)
    }

    /// The Verify action is only available once every slot holds a digit.
    pub fn can_submit(&self) -> bool {
        self.buffer.is_complete()
    }

    pub fn phase(&self) -> EntryPhase {
        if self.buffer.is_complete() {
            EntryPhase::Complete
        } else {
            EntryPhase::Incomplete
        }
    }

    /// Replace the completion callback. Only later completions reach it.
    pub fn set_on_verification_complete(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_verification_complete = Box::new(callback);
    }

    // ----- Focus handles -----

    /// Register the focus handle for the slot at `index` as it is mounted.
    pub fn mount_slot(&mut self, index: usize, handle: FocusFlag) {
        match self.slots.get_mut(index) {
            Some(slot) => *slot = Some(handle),
            None => debug!(index, "ignoring mount of out-of-range slot"),
        }
    }

    pub fn slot_handle(&self, index: usize) -> Option<&FocusFlag> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Move focus to the slot at `index`. Unknown or unmounted slots are a no-op.
    pub fn focus_slot(&self, focus: &Focus, index: usize) {
        if let Some(handle) = self.slot_handle(index) {
            focus.focus(handle);
        }
    }

    pub fn focused_slot(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|handle| handle.get()))
    }

    // ----- Event handlers -----

    /// A slot's value changed to `raw`.
    ///
    /// Replaces the character at `index` with `raw`. Non-digit input is
    /// ignored entirely; digit input always advances focus to the next slot,
    /// even when the splice itself is rejected for length.
    pub fn on_digit_input(&mut self, focus: &Focus, index: usize, raw: &str) {
        if !is_digits(raw) {
            debug!(index, "ignoring non-digit slot input");
            return;
        }
        let _ = self.apply(index, index + 1, raw);
        if index + 1 < OTP_LENGTH {
            self.focus_slot(focus, index + 1);
        }
    }

    /// Removes the character before `index`, shifting the rest left, and
    /// steps focus back one slot.
    pub fn on_backspace(&mut self, focus: &Focus, index: usize) {
        if index == 0 {
            return;
        }
        let _ = self.apply(index - 1, index, "");
        self.focus_slot(focus, index - 1);
    }

    pub fn on_arrow_left(&self, focus: &Focus, index: usize) {
        if index > 0 {
            self.focus_slot(focus, index - 1);
        }
    }

    pub fn on_arrow_right(&self, focus: &Focus, index: usize) {
        if index + 1 < OTP_LENGTH {
            self.focus_slot(focus, index + 1);
        }
    }

    /// Overwrites `text.len()` characters starting at `index` with `text`.
    ///
    /// The whole paste is dropped when it holds any non-digit or would push
    /// the buffer past six digits. On success focus lands just after the
    /// pasted run, or stays put when that is past the last slot.
    pub fn on_paste(&mut self, focus: &Focus, index: usize, text: &str) {
        if self.apply(index, index + text.len(), text).is_ok() {
            self.focus_slot(focus, index + text.len());
        }
    }

    /// Reads the clipboard and pastes its text at `index`.
    pub fn on_paste_from(&mut self, focus: &Focus, index: usize, clipboard: &mut dyn ClipboardSource) {
        match clipboard.read_text() {
            Ok(text) => self.on_paste(focus, index, &text),
            Err(error) => warn!(index, error = %error, "clipboard paste failed"),
        }
    }

    /// Splices the buffer and runs the completion check when the content changed.
    fn apply(&mut self, start: usize, end: usize, insert: &str) -> Result<bool, EditRejection> {
        let next = self.buffer.spliced(start, end, insert).inspect_err(|rejection| {
            debug!(start, end, reason = %rejection, "discarding passcode edit");
        })?;
        if next == self.buffer {
            return Ok(false);
        }
        self.buffer = next;
        self.notify_if_complete();
        Ok(true)
    }

    fn notify_if_complete(&mut self) {
        if self.buffer.is_complete() {
            debug!("passcode complete");
            (self.on_verification_complete)(self.buffer.as_str());
        }
    }
}

impl fmt::Debug for OtpEntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpEntryState")
            .field("len", &self.buffer.len())
            .field("focused_slot", &self.focused_slot())
            .finish_non_exhaustive()
    }
}

impl HasFocus for OtpEntryState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        for handle in self.slots.iter().flatten() {
            builder.leaf_widget(handle);
        }
        builder.end(start);
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::clipboard::ClipboardError;

    type Calls = Rc<RefCell<Vec<String>>>;

    fn mounted() -> (OtpEntryState, Focus, Calls) {
        let calls: Calls = Rc::default();
        let sink = calls.clone();
        let mut state = OtpEntryState::new(OtpEntryConfig::new(move |code| sink.borrow_mut().push(code.to_string())));
        for (index, name) in focus::otp::SLOTS.iter().enumerate() {
            state.mount_slot(index, FocusFlag::new().with_name(name));
        }
        let focus = FocusBuilder::build_for(&state);
        state.focus_slot(&focus, 0);
        (state, focus, calls)
    }

    fn with_code(state: &mut OtpEntryState, focus: &Focus, digits: &str) {
        state.on_paste(focus, 0, digits);
    }

    struct FixedClipboard(Result<String, ()>);

    impl ClipboardSource for FixedClipboard {
        fn read_text(&mut self) -> Result<String, ClipboardError> {
            self.0.clone().map_err(|_| ClipboardError::Unavailable("no display".into()))
        }
    }

    #[test]
    fn digit_input_fills_slot_and_advances_focus() {
        for index in 0..OTP_LENGTH {
            let (mut state, focus, _) = mounted();
            with_code(&mut state, &focus, &"0".repeat(index));
            state.on_digit_input(&focus, index, "7");

            assert_eq!(state.slot_digit(index), Some('7'));
            let expected_focus = if index < OTP_LENGTH - 1 { index + 1 } else { index };
            assert_eq!(state.focused_slot(), Some(expected_focus));
        }
    }

    #[test]
    fn last_slot_keeps_focus() {
        let (mut state, focus, _) = mounted();
        with_code(&mut state, &focus, "12345");
        state.on_digit_input(&focus, 5, "6");
        assert_eq!(state.focused_slot(), Some(5));
    }

    #[test]
    fn non_digit_input_changes_nothing() {
        let (mut state, focus, calls) = mounted();
        with_code(&mut state, &focus, "123");
        state.focus_slot(&focus, 1);
        for raw in ["a", " ", "1a", "-", "\u{0663}"] {
            state.on_digit_input(&focus, 1, raw);
            assert_eq!(state.code(), "123");
            assert_eq!(state.focused_slot(), Some(1));
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn digit_input_replaces_existing_character() {
        let (mut state, focus, _) = mounted();
        with_code(&mut state, &focus, "1234");
        state.on_digit_input(&focus, 1, "9");
        assert_eq!(state.code(), "1934");
    }

    #[test]
    fn empty_input_removes_character_and_still_advances() {
        let (mut state, focus, _) = mounted();
        with_code(&mut state, &focus, "1234");
        state.on_digit_input(&focus, 1, "");
        assert_eq!(state.code(), "134");
        assert_eq!(state.focused_slot(), Some(2));
    }

    #[test]
    fn multi_digit_input_that_overflows_is_discarded_but_focus_moves() {
        let (mut state, focus, calls) = mounted();
        with_code(&mut state, &focus, "123456");
        state.on_digit_input(&focus, 2, "99");
        assert_eq!(state.code(), "123456");
        assert_eq!(state.focused_slot(), Some(3));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn input_past_end_compacts_into_next_free_position() {
        let (mut state, focus, _) = mounted();
        with_code(&mut state, &focus, "12");
        state.on_digit_input(&focus, 4, "5");
        assert_eq!(state.code(), "125");
        assert_eq!(state.slot_digit(4), None);
    }

    #[test]
    fn paste_full_code_completes_once() {
        let (mut state, focus, calls) = mounted();
        state.on_paste(&focus, 0, "123456");
        assert_eq!(state.code(), "123456");
        assert_eq!(state.phase(), EntryPhase::Complete);
        assert_eq!(*calls.borrow(), vec!["123456".to_string()]);
    }

    #[test]
    fn paste_with_non_digit_is_discarded_at_any_index() {
        for index in 0..OTP_LENGTH {
            let (mut state, focus, calls) = mounted();
            state.focus_slot(&focus, index);
            state.on_paste(&focus, index, "12a456");
            assert_eq!(state.code(), "");
            assert_eq!(state.focused_slot(), Some(index));
            assert!(calls.borrow().is_empty());
        }
    }

    #[test]
    fn paste_overwrites_in_the_middle() {
        let (mut state, focus, _) = mounted();
        with_code(&mut state, &focus, "1234");
        state.on_paste(&focus, 1, "99");
        assert_eq!(state.code(), "1994");
        assert_eq!(state.focused_slot(), Some(3));
    }

    #[test]
    fn paste_overflow_rejects_everything() {
        let (mut state, focus, calls) = mounted();
        with_code(&mut state, &focus, "1234");
        state.focus_slot(&focus, 4);
        state.on_paste(&focus, 4, "567");
        assert_eq!(state.code(), "1234");
        assert_eq!(state.focused_slot(), Some(4));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn paste_reaching_last_slot_boundary_leaves_focus() {
        let (mut state, focus, _) = mounted();
        with_code(&mut state, &focus, "123");
        state.focus_slot(&focus, 3);
        state.on_paste(&focus, 3, "456");
        assert_eq!(state.code(), "123456");
        assert_eq!(state.focused_slot(), Some(3));
    }

    #[test]
    fn backspace_splices_out_previous_character() {
        let (mut state, focus, _) = mounted();
        with_code(&mut state, &focus, "12345");
        state.focus_slot(&focus, 3);
        state.on_backspace(&focus, 3);
        // buffer[0..2] + buffer[3..] = "12" + "45"
        assert_eq!(state.code(), "1245");
        assert_eq!(state.slot_digit(4), None);
        assert_eq!(state.focused_slot(), Some(2));
    }

    #[test]
    fn backspace_at_first_slot_is_noop() {
        let (mut state, focus, _) = mounted();
        with_code(&mut state, &focus, "123");
        state.focus_slot(&focus, 0);
        state.on_backspace(&focus, 0);
        assert_eq!(state.code(), "123");
        assert_eq!(state.focused_slot(), Some(0));
    }

    #[test]
    fn backspace_past_end_still_moves_focus() {
        let (mut state, focus, _) = mounted();
        with_code(&mut state, &focus, "12");
        state.focus_slot(&focus, 5);
        state.on_backspace(&focus, 5);
        assert_eq!(state.code(), "12");
        assert_eq!(state.focused_slot(), Some(4));
    }

    #[test]
    fn typing_six_digits_fires_once_on_the_sixth() {
        let (mut state, focus, calls) = mounted();
        for (index, digit) in ["4", "8", "1", "5", "1", "6"].into_iter().enumerate() {
            assert!(calls.borrow().is_empty(), "fired before slot {index}");
            state.on_digit_input(&focus, index, digit);
        }
        assert_eq!(*calls.borrow(), vec!["481516".to_string()]);
    }

    #[test]
    fn completion_rearms_after_backspace() {
        let (mut state, focus, calls) = mounted();
        state.on_paste(&focus, 0, "123456");
        state.on_backspace(&focus, 6);
        assert_eq!(state.phase(), EntryPhase::Incomplete);
        state.on_digit_input(&focus, 5, "9");
        assert_eq!(*calls.borrow(), vec!["123456".to_string(), "123459".to_string()]);
    }

    #[test]
    fn rewriting_same_digit_does_not_refire() {
        let (mut state, focus, calls) = mounted();
        state.on_paste(&focus, 0, "123456");
        state.on_digit_input(&focus, 2, "3");
        assert_eq!(calls.borrow().len(), 1);
        state.on_digit_input(&focus, 2, "7");
        assert_eq!(*calls.borrow(), vec!["123456".to_string(), "127456".to_string()]);
    }

    #[test]
    fn latest_callback_receives_completion() {
        let (mut state, focus, first) = mounted();
        let second: Calls = Rc::default();
        let sink = second.clone();
        state.set_on_verification_complete(move |code| sink.borrow_mut().push(code.to_string()));
        state.on_paste(&focus, 0, "654321");
        assert!(first.borrow().is_empty());
        assert_eq!(*second.borrow(), vec!["654321".to_string()]);
    }

    #[test]
    fn arrows_only_move_focus() {
        let (mut state, focus, _) = mounted();
        with_code(&mut state, &focus, "123");
        state.focus_slot(&focus, 2);

        state.on_arrow_left(&focus, 2);
        assert_eq!(state.focused_slot(), Some(1));
        state.on_arrow_right(&focus, 1);
        assert_eq!(state.focused_slot(), Some(2));
        assert_eq!(state.code(), "123");

        state.focus_slot(&focus, 0);
        state.on_arrow_left(&focus, 0);
        assert_eq!(state.focused_slot(), Some(0));

        state.focus_slot(&focus, 5);
        state.on_arrow_right(&focus, 5);
        assert_eq!(state.focused_slot(), Some(5));
        assert_eq!(state.code(), "123");
    }

    #[test]
    fn focus_accessors_are_bounds_checked() {
        let mut state = OtpEntryState::new(OtpEntryConfig::default());
        state.mount_slot(OTP_LENGTH, FocusFlag::new());
        assert!(state.slot_handle(OTP_LENGTH).is_none());
        assert!(state.slot_handle(0).is_none());

        state.mount_slot(0, FocusFlag::new().with_name(focus::otp::SLOTS[0]));
        let focus = FocusBuilder::build_for(&state);
        state.focus_slot(&focus, 3);
        state.focus_slot(&focus, 99);
        state.focus_slot(&focus, 0);
        assert_eq!(state.focused_slot(), Some(0));
    }

    #[test]
    fn clipboard_paste_uses_source_text() {
        let (mut state, focus, calls) = mounted();
        state.on_paste_from(&focus, 0, &mut FixedClipboard(Ok("246810".into())));
        assert_eq!(*calls.borrow(), vec!["246810".to_string()]);
    }

    #[test]
    fn clipboard_failure_leaves_state_untouched() {
        let (mut state, focus, calls) = mounted();
        with_code(&mut state, &focus, "12");
        state.on_paste_from(&focus, 2, &mut FixedClipboard(Err(())));
        assert_eq!(state.code(), "12");
        assert!(calls.borrow().is_empty());
    }
}
