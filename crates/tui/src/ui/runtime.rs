//! Runtime: terminal lifecycle, event loop and effect execution.
//!
//! Responsibilities
//! - Own the terminal lifecycle (raw mode, alternate screen, mouse capture,
//!   bracketed paste).
//! - Forward crossterm events from a dedicated blocking thread over a Tokio
//!   channel.
//! - Route events to the passcode component and execute returned `Effect`s.
//! - Render only when `App` marks itself dirty.
//!
//! Entry Point
//! - `run_app(options)` is called from `lib::run` and returns the submitted
//!   code, or `None` when the user leaves without submitting.

use std::ops::ControlFlow;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use otp_entry_types::{Effect, Msg};
use ratatui::{Terminal, prelude::*};
use tokio::{signal, sync::mpsc};
use tracing::{debug, info, warn};

use crate::app::{App, TuiOptions};
use crate::clipboard::{ClipboardSource, SystemClipboard};
use crate::ui::components::{Component, OtpEntryComponent};

type Tui = Terminal<CrosstermBackend<std::io::Stdout>>;

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(64);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        debug!("input receiver dropped; stopping input thread");
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Tui, app: &mut App, view: &mut OtpEntryComponent) -> Result<()> {
    terminal.draw(|frame| view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Translate a raw crossterm event into component calls.
fn handle_input_event(app: &mut App, view: &mut OtpEntryComponent, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => view.handle_message(app, Msg::Resize(width, height)),
        Event::Paste(text) => {
            let index = app.active_slot();
            view.handle_message(app, Msg::ClipboardText { index, text })
        }
        Event::FocusGained | Event::FocusLost => Vec::new(),
    }
}

/// Execute effects in order. `Break` carries the outcome of the session.
fn process_effects(
    app: &mut App,
    clipboard: &mut dyn ClipboardSource,
    effects: Vec<Effect>,
) -> ControlFlow<Option<String>> {
    for effect in effects {
        match effect {
            Effect::ReadClipboard { index } => {
                app.otp_entry.on_paste_from(&app.focus, index, clipboard);
                app.mark_dirty();
            }
            Effect::Submit(code) => {
                info!("passcode submitted");
                return ControlFlow::Break(Some(code));
            }
            Effect::Quit => {
                info!("passcode entry cancelled");
                return ControlFlow::Break(None);
            }
        }
    }

    if app.auto_submit && app.otp_entry.can_submit() {
        info!("passcode auto-submitted");
        return ControlFlow::Break(Some(app.otp_entry.code().to_string()));
    }
    ControlFlow::Continue(())
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    view: &mut OtpEntryComponent,
    clipboard: &mut dyn ClipboardSource,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<Option<String>> {
    loop {
        if app.take_dirty() {
            render(terminal, app, view)?;
        }

        let effects = tokio::select! {
            maybe_event = input_receiver.recv() => match maybe_event {
                Some(input_event) => handle_input_event(app, view, input_event),
                None => {
                    warn!("input channel closed; leaving passcode entry");
                    return Ok(None);
                }
            },
            _ = signal::ctrl_c() => vec![Effect::Quit],
        };

        if let ControlFlow::Break(outcome) = process_effects(app, clipboard, effects) {
            return Ok(outcome);
        }
    }
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop, and always restores the terminal before returning.
pub async fn run_app(options: TuiOptions) -> Result<Option<String>> {
    let mut input_receiver = spawn_input_thread();
    let mut app = App::new(options);
    let mut view = OtpEntryComponent::default();
    let mut clipboard = SystemClipboard::new();
    debug!(?app, "starting passcode entry");

    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, &mut app, &mut view, &mut clipboard, &mut input_receiver).await;
    cleanup_terminal(&mut terminal)?;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardError;
    use crate::ui::components::otp_entry::OtpEntryConfig;

    struct Pasteboard(&'static str);

    impl ClipboardSource for Pasteboard {
        fn read_text(&mut self) -> Result<String, ClipboardError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn submit_and_quit_end_the_session() {
        let mut app = App::new(TuiOptions::default());
        let mut clipboard = Pasteboard("");
        assert_eq!(
            process_effects(&mut app, &mut clipboard, vec![Effect::Submit("123456".into())]),
            ControlFlow::Break(Some("123456".into()))
        );
        assert_eq!(process_effects(&mut app, &mut clipboard, vec![Effect::Quit]), ControlFlow::Break(None));
        assert_eq!(process_effects(&mut app, &mut clipboard, Vec::new()), ControlFlow::Continue(()));
    }

    #[test]
    fn clipboard_effect_pastes_into_requested_slot() {
        let mut app = App::new(TuiOptions::default());
        let mut clipboard = Pasteboard("1234");
        let flow = process_effects(&mut app, &mut clipboard, vec![Effect::ReadClipboard { index: 0 }]);
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(app.otp_entry.code(), "1234");
        assert_eq!(app.active_slot(), 4);
    }

    #[test]
    fn auto_submit_breaks_once_complete() {
        let mut app = App::new(TuiOptions {
            auto_submit: true,
            entry: OtpEntryConfig::default(),
            ..TuiOptions::default()
        });
        let mut clipboard = Pasteboard("123456");
        let flow = process_effects(&mut app, &mut clipboard, vec![Effect::ReadClipboard { index: 0 }]);
        assert_eq!(flow, ControlFlow::Break(Some("123456".into())));
    }

    #[test]
    fn bracketed_paste_targets_active_slot() {
        let mut app = App::new(TuiOptions::default());
        let mut view = OtpEntryComponent::default();
        handle_input_event(&mut app, &mut view, Event::Paste("55".into()));
        handle_input_event(&mut app, &mut view, Event::Paste("66".into()));
        assert_eq!(app.otp_entry.code(), "5566");
    }
}
