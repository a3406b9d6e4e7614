//! Semantic action IDs for Case Clicker click targets.
//!
//! Each constant is a distinct clickable action in the UI. They are
//! registered during render and dispatched via `InputEvent::Click`.

/// The big collect button.
pub const CLICK_COIN: u16 = 0;
/// Dismiss the displayed notification.
pub const CLOSE_NOTICE: u16 = 1;

/// Open a case (base + case index 0..3).
pub const OPEN_CASE_BASE: u16 = 100;

/// Buy an upgrade slot (base + slot index).
pub const BUY_UPGRADE_BASE: u16 = 200;
