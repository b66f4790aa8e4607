//! Application state for the passcode TUI.
//!
//! `App` owns the widget state, the focus ring built from the mounted slot
//! handles, and the shared rendering context. Components receive `&mut App`
//! and report side effects; the runtime executes them.

use rat_focus::{Focus, FocusBuilder, FocusFlag};
use tracing::debug;

use crate::ui::components::otp_entry::{OtpEntryConfig, OtpEntryState};
use crate::ui::focus;
use crate::ui::theme::{self, Theme};

/// Cross-cutting shared context owned by the App.
#[derive(Debug)]
pub struct SharedCtx {
    /// Active theme used by every component
    pub theme: Box<dyn Theme>,
    /// Canonical id of the active theme
    pub theme_id: &'static str,
}

impl SharedCtx {
    pub fn new(preferred_theme: Option<&str>) -> Self {
        let loaded = theme::load(preferred_theme);
        debug!(
            theme = loaded.definition.id,
            label = loaded.definition.label,
            ansi_fallback = loaded.definition.is_ansi_fallback,
            "theme selected"
        );
        Self {
            theme: loaded.theme,
            theme_id: loaded.definition.id,
        }
    }
}

/// Options used to start the TUI.
pub struct TuiOptions {
    /// Theme id or alias; `TUI_THEME` still takes precedence
    pub preferred_theme: Option<String>,
    /// Submit as soon as all six digits are present
    pub auto_submit: bool,
    /// Options handed to the passcode widget
    pub entry: OtpEntryConfig,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            preferred_theme: None,
            auto_submit: false,
            entry: OtpEntryConfig::default(),
        }
    }
}

pub struct App {
    pub ctx: SharedCtx,
    pub otp_entry: OtpEntryState,
    pub focus: Focus,
    pub auto_submit: bool,
    dirty: bool,
}

impl App {
    pub fn new(options: TuiOptions) -> Self {
        let mut otp_entry = OtpEntryState::new(options.entry);
        for (index, name) in focus::otp::SLOTS.iter().enumerate() {
            otp_entry.mount_slot(index, FocusFlag::new().with_name(name));
        }
        // Slots are mounted once, so the focus ring never changes shape.
        let focus = FocusBuilder::build_for(&otp_entry);
        otp_entry.focus_slot(&focus, 0);

        Self {
            ctx: SharedCtx::new(options.preferred_theme.as_deref()),
            otp_entry,
            focus,
            auto_submit: options.auto_submit,
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Slot that events are routed to; falls back to the first slot.
    pub fn active_slot(&self) -> usize {
        self.otp_entry.focused_slot().unwrap_or(0)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("theme", &self.ctx.theme_id)
            .field("otp_entry", &self.otp_entry)
            .field("auto_submit", &self.auto_submit)
            .finish_non_exhaustive()
    }
}
