use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A rectangle centered horizontally and vertically within `area`.
pub fn centered_rect(area: Rect, width: Constraint, height: Constraint) -> Rect {
    let [area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
    let [area] = Layout::vertical([height]).flex(Flex::Center).areas(area);
    area
}
