//! Variables pane: the environment as recorded on the current step

use crate::memory::value::Value;
use crate::memory::Variables;
use crate::ui::panes::{clamp_scroll, pane_block};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// How a variable differs from the step before
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Unchanged,
    Updated,
    Created,
}

/// Compare `name` in the current step against the previous one
pub fn classify_change(name: &str, value: &Value, previous: Option<&Variables>) -> Change {
    match previous.and_then(|vars| vars.get(name)) {
        None => Change::Created,
        Some(old) if old == value => Change::Unchanged,
        Some(_) => Change::Updated,
    }
}

/// Render the variables pane.
///
/// `previous` is the variable table of the step before; `None` on the first step.
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    variables: Option<&Variables>,
    previous: Option<&Variables>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Variables ", is_focused);

    let Some(variables) = variables.filter(|vars| !vars.is_empty()) else {
        let paragraph = Paragraph::new("(no variables yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let name_width = variables.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let all_items: Vec<ListItem> = variables
        .iter()
        .map(|(name, value)| {
            let change = classify_change(name, value, previous);
            let value_style = match change {
                Change::Unchanged => Style::default().fg(DEFAULT_THEME.fg),
                Change::Updated => Style::default()
                    .fg(DEFAULT_THEME.changed)
                    .add_modifier(Modifier::BOLD),
                Change::Created => Style::default()
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD),
            };
            let marker = match change {
                Change::Unchanged => "  ",
                Change::Updated => "* ",
                Change::Created => "+ ",
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, value_style),
                Span::styled(
                    format!("{:width$}", name, width = name_width),
                    Style::default().fg(DEFAULT_THEME.primary),
                ),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(value.repr(), value_style),
                Span::styled(
                    format!("  {}", value.type_name()),
                    Style::default().fg(DEFAULT_THEME.type_name),
                ),
            ]))
        })
        .collect();

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_change() {
        let previous = Variables::from([("x", Value::Int(1)), ("y", Value::Int(2))]);
        assert_eq!(
            classify_change("x", &Value::Int(1), Some(&previous)),
            Change::Unchanged
        );
        assert_eq!(
            classify_change("y", &Value::Int(3), Some(&previous)),
            Change::Updated
        );
        assert_eq!(
            classify_change("z", &Value::Int(0), Some(&previous)),
            Change::Created
        );
        assert_eq!(classify_change("x", &Value::Int(1), None), Change::Created);
    }
}
