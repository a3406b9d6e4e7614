//! Input normalization: click targets, hit testing, and pixel-to-cell math.
//!
//! The render pass registers a fresh set of rectangular click targets every
//! frame; the DOM mouse handler converts pixel coordinates into terminal
//! cells and hit-tests them here. Keyboard and pointer input both collapse
//! into [`InputEvent`] so the game dispatches one event type.

use ratzilla::ratatui::layout::Rect;

/// All input events, normalized from keyboard, mouse, and touch sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press.
    Key(char),
    /// A click/tap on a registered target, identified by a semantic action
    /// ID (see `game::actions`).
    Click(u16),
}

/// A rectangular screen region that triggers an action when tapped.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared between the render loop (which registers targets) and the mouse
/// handler (which hit-tests them).
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Drop all targets; called at the start of every frame.
    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a one-row target at `row`, clipped to `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Find the action under a terminal cell. Later-registered targets win
    /// on overlap, matching render order (overlays are drawn last).
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside =
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Convert pixel coordinates (relative to the grid container) into a
/// terminal cell. `None` when outside the grid or the grid has no size yet.
pub fn pixel_to_cell(
    click_x: f64,
    click_y: f64,
    grid_width: f64,
    grid_height: f64,
    cols: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if grid_width <= 0.0 || grid_height <= 0.0 || cols == 0 || rows == 0 {
        return None;
    }
    if click_x < 0.0 || click_y < 0.0 {
        return None;
    }
    let col = (click_x / (grid_width / cols as f64)) as u16;
    let row = (click_y / (grid_height / rows as f64)) as u16;
    if col >= cols || row >= rows {
        return None;
    }
    Some((col, row))
}

/// Below this column count the panels stack vertically.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 70
}
