//! Narration pane: what the current step did and why

use crate::snapshot::ExecutionStep;
use crate::ui::panes::pane_block;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Render the action tag, the executed line and the reason sentence
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    step: Option<&ExecutionStep>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Narration ", is_focused);

    let Some(step) = step else {
        let paragraph = Paragraph::new("(this program records no steps)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", step.action),
                Style::default()
                    .bg(DEFAULT_THEME.primary)
                    .fg(ratatui::style::Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  line {}", step.line_no),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ]),
        Line::from(Span::styled(
            step.source_line.as_str(),
            Style::default().fg(DEFAULT_THEME.secondary),
        )),
        Line::default(),
        Line::from(Span::styled(
            step.reason.as_str(),
            Style::default().fg(DEFAULT_THEME.fg),
        )),
    ];

    // Wrapped height is unknown up front, so only clamp to the logical line count
    *scroll_offset = (*scroll_offset).min(lines.len().saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
