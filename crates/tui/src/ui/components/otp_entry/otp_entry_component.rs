use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use otp_entry_types::{Effect, Msg, OTP_LENGTH};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{block, build_hint_spans, render_button, slot_digit_style};
use crate::ui::utils::centered_fixed_rect;

const TITLE: &str = "Phone Verification";
const INSTRUCTIONS: &str = "Please enter the 6 digit OTP sent to your phone number";
const SLOT_WIDTH: u16 = 5;
const SLOT_HEIGHT: u16 = 3;
const PANEL_WIDTH: u16 = 60;
const PANEL_HEIGHT: u16 = 14;

/// Six single-digit boxes plus a Verify button.
#[derive(Debug, Default, Clone)]
pub struct OtpEntryComponent {
    slot_areas: Vec<Rect>,
}

impl OtpEntryComponent {
    fn handle_digit_key(app: &mut App, index: usize, c: char) {
        let mut encoded = [0u8; 4];
        let raw: &str = c.encode_utf8(&mut encoded);
        app.otp_entry.on_digit_input(&app.focus, index, raw);
    }
}

impl Component for OtpEntryComponent {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::ClipboardText { index, text } => {
                app.otp_entry.on_paste(&app.focus, index, &text);
            }
            Msg::Resize(..) => {}
        }
        app.mark_dirty();
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        let mut effects = Vec::new();
        let index = app.active_slot();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => effects.push(Effect::Quit),
            KeyCode::Char('v') if ctrl => effects.push(Effect::ReadClipboard { index }),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Self::handle_digit_key(app, index, c);
            }
            // Clearing a slot's value is an input change to the empty string.
            KeyCode::Delete => app.otp_entry.on_digit_input(&app.focus, index, ""),
            KeyCode::Backspace => app.otp_entry.on_backspace(&app.focus, index),
            KeyCode::Left => app.otp_entry.on_arrow_left(&app.focus, index),
            KeyCode::Right => app.otp_entry.on_arrow_right(&app.focus, index),
            KeyCode::Tab => {
                app.focus.next();
            }
            KeyCode::BackTab => {
                app.focus.prev();
            }
            KeyCode::Enter => {
                if app.otp_entry.can_submit() {
                    effects.push(Effect::Submit(app.otp_entry.code().to_string()));
                }
            }
            KeyCode::Esc => effects.push(Effect::Quit),
            _ => return effects,
        }
        app.mark_dirty();
        effects
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let MouseEvent { kind, column, row, .. } = mouse;
        if kind == MouseEventKind::Down(MouseButton::Left) {
            let position = Position::new(column, row);
            if let Some(index) = self.slot_areas.iter().position(|area| area.contains(position)) {
                app.otp_entry.focus_slot(&app.focus, index);
                app.mark_dirty();
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let panel = centered_fixed_rect(PANEL_WIDTH, PANEL_HEIGHT, rect);
        let theme = &*app.ctx.theme;
        let container = block(theme, Some(TITLE), true);
        let inner = container.inner(panel);
        frame.render_widget(container, panel);

        let [instructions_rect, slots_rect, button_rect, hints_rect, ..] = self.get_preferred_layout(app, inner)[..] else {
            return;
        };

        frame.render_widget(
            Paragraph::new(INSTRUCTIONS).centered().style(theme.text_primary_style()),
            instructions_rect,
        );

        let slot_rects: [Rect; OTP_LENGTH] = Layout::horizontal([Constraint::Length(SLOT_WIDTH); OTP_LENGTH])
            .spacing(1)
            .flex(Flex::Center)
            .areas(slots_rect);
        let focused = app.otp_entry.focused_slot();
        for (index, slot_rect) in slot_rects.iter().enumerate() {
            let is_focused = focused == Some(index);
            let digit = app.otp_entry.slot_digit(index).map(String::from).unwrap_or_default();
            let slot_block = Block::bordered().border_style(theme.border_style(is_focused));
            let slot_inner = slot_block.inner(*slot_rect);
            frame.render_widget(
                Paragraph::new(digit)
                    .centered()
                    .style(slot_digit_style(theme, is_focused))
                    .block(slot_block),
                *slot_rect,
            );
            if is_focused && !slot_inner.is_empty() {
                frame.set_cursor_position((slot_inner.x + slot_inner.width / 2, slot_inner.y));
            }
        }
        self.slot_areas = slot_rects.to_vec();

        let [verify_rect] = Layout::horizontal([Constraint::Length(12)]).flex(Flex::Center).areas(button_rect);
        render_button(frame, verify_rect, "Verify", app.otp_entry.can_submit(), false, theme);

        let hints = Paragraph::new(Line::from(self.get_hint_spans(app))).centered();
        frame.render_widget(hints, hints_rect);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        build_hint_spans(
            &*app.ctx.theme,
            &[
                ("0-9", " digit  "),
                ("←/→", " move  "),
                ("Ctrl+V", " paste  "),
                ("Enter", " verify  "),
                ("Esc", " cancel"),
            ],
        )
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(2),           // Instructions
            Constraint::Length(SLOT_HEIGHT), // Slots
            Constraint::Length(1),           // Spacer
            Constraint::Length(3),           // Verify button
            Constraint::Min(0),              // Filler
            Constraint::Length(1),           // Hints
        ])
        .split(area)
        .iter()
        .enumerate()
        .filter(|(index, _)| matches!(index, 0 | 1 | 3 | 5))
        .map(|(_, rect)| *rect)
        .collect()
    }
}
