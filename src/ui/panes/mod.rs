//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Program text with syntax highlighting and the current line marker
//! - [`variables`]: Variable table for the current step, changed values highlighted
//! - [`console`]: Console output accumulated up to the current step
//! - [`narration`]: The current step's action and reason
//! - [`status`]: Status bar with keybindings and playback state
//!
//! Each pane module exports a primary `render_*` function that takes the
//! frame, its area, the data to draw, and whether the pane has focus.

pub mod console;
pub mod narration;
pub mod source;
pub mod status;
pub mod variables;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

pub use console::render_console_pane;
pub use narration::render_narration_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use variables::render_variables_pane;

/// Bordered block whose border reflects focus
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `offset` so the last page stays full; resets to 0 when everything fits
pub(crate) fn clamp_scroll(offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        *offset = (*offset).min(total_items - visible_height);
    } else {
        *offset = 0;
    }
}
