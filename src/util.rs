use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::path::PathBuf;

/// Return the largest sub-rectangle of `area` with at most the given size,
/// centered in `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return the directory in which the program's data files are kept by
/// default
pub(crate) fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("gridsnake"))
}
