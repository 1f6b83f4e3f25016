use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`, shrunk to fit if
/// `area` is too small
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}
