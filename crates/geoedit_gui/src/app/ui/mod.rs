//! UI panel modules extracted from the main app update loop.

/// Left panel with the mode form, delete and import actions.
pub(super) mod controls;
/// Central map canvas: tile grid, features and pointer routing.
pub(super) mod map_canvas;
/// Bottom status bar content.
pub(super) mod status_bar;
/// Transient toast notifications.
pub(super) mod toasts;
