use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Center a box of at most `width` x `height` cells inside `area`.
///
/// The box shrinks to fit when the terminal is smaller than requested.
pub fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
