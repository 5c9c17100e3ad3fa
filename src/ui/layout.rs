//! Floating panel anchored bottom-right, launcher button, centered modal.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{
    HEADER_HEIGHT, INPUT_MAX_LINES, LAUNCHER_LABEL, MARGIN_X, MIN_CHAT_LINES, PANEL_MAX_HEIGHT,
    PANEL_MAX_WIDTH, STATUS_HEIGHT,
};

#[derive(Clone, Debug)]
pub struct PanelRegions {
    pub header: Rect,
    pub chat: Rect,
    pub input: Rect,
    pub status: Rect,
}

/// Launcher button in the bottom-right corner (3 rows, bordered).
pub fn launcher(area: Rect) -> Rect {
    // The emoji is double width.
    let width = (LAUNCHER_LABEL.chars().count() as u16 + 3).min(area.width);
    let height = 3.min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    }
}

pub fn panel(area: Rect) -> Rect {
    let width = area.width.min(PANEL_MAX_WIDTH);
    let height = area.height.min(PANEL_MAX_HEIGHT);
    Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    }
}

/// Split the panel's inner area. The input takes one row per buffer line
/// (capped) plus its top border.
pub fn compute(inner: Rect, input_lines: usize) -> PanelRegions {
    let input_height = (input_lines.max(1) as u16).min(INPUT_MAX_LINES) + 1;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(MIN_CHAT_LINES),
            Constraint::Length(input_height),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(inner);
    let chat = Rect {
        x: inner.x + MARGIN_X,
        y: chunks[1].y,
        width: inner.width.saturating_sub(2 * MARGIN_X),
        height: chunks[1].height,
    };
    PanelRegions {
        header: chunks[0],
        chat,
        input: chunks[2],
        status: chunks[3],
    }
}

pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_hugs_bottom_right() {
        let area = Rect::new(0, 0, 120, 50);
        let p = panel(area);
        assert_eq!((p.right(), p.bottom()), (120, 50));
        assert_eq!((p.width, p.height), (PANEL_MAX_WIDTH, PANEL_MAX_HEIGHT));

        let small = panel(Rect::new(0, 0, 40, 10));
        assert_eq!(small, Rect::new(0, 0, 40, 10));
    }

    #[test]
    fn input_grows_then_caps() {
        let inner = Rect::new(0, 0, 60, 30);
        assert_eq!(compute(inner, 0).input.height, 2);
        assert_eq!(compute(inner, 3).input.height, 4);
        assert_eq!(compute(inner, 20).input.height, INPUT_MAX_LINES + 1);
    }
}
