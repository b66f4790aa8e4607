//! Component system for the passcode TUI.
//!
//! Components are self-contained UI elements that handle their own events and
//! render themselves into a provided `Rect`, reporting side effects back to
//! the runtime as [`Effect`]s instead of touching the terminal, clipboard, or
//! process lifecycle directly.

use crossterm::event::{KeyEvent, MouseEvent};
use otp_entry_types::{Effect, Msg};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::app::App;

/// A UI component with its own state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: the runtime routes key, mouse and application
///    messages through `handle_key_events`, `handle_mouse_events` and
///    `handle_message`.
/// 2. **Effects**: handlers return the effects the runtime should execute.
/// 3. **Rendering**: `render` draws the component into the frame area and may
///    remember hit-test areas for later mouse events.
pub(crate) trait Component {
    /// Handle an application-level message.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing,
    /// cursor placement, and caching areas used for hit-testing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the footer while this component is active.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Split `area` into the regions this component draws into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}
