use crate::app::state::TemplatePickerState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::helpers::{centered_rect, hint_line, modal_title, open_modal};

pub struct TemplatePickerModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a TemplatePickerState,
}

impl Widget for TemplatePickerModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(80, 70, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }
        let theme = self.theme;
        let state = self.state;

        let inner = open_modal(buf, modal_area, area, modal_title(" TEMPLATES ", theme), theme);

        let message = if state.loading {
            Some("Loading templates...")
        } else if state.categories.is_empty() {
            Some("No templates available. Add a templates.json next to the command file.")
        } else {
            None
        };
        if let Some(message) = message {
            Paragraph::new(Span::styled(message, theme.dimmed))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        if inner.height < 3 {
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Category tabs
                Constraint::Min(0),    // Entries | detail
                Constraint::Length(1), // Hints
            ])
            .split(inner);

        // Category tabs
        let mut tabs = Vec::new();
        for (i, category) in state.categories.iter().enumerate() {
            let style = if i == state.category {
                theme.header_active
            } else {
                theme.header_item
            };
            tabs.push(Span::styled(format!(" {} ", category.category), style));
            tabs.push(Span::raw(" "));
        }
        buf.set_line(rows[0].x, rows[0].y, &Line::from(tabs), rows[0].width);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[1]);

        let entries: Vec<ListItem> = state
            .current_category()
            .map(|c| c.templates.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.name.clone(), theme.list_item),
                    Span::styled(format!("  {}", entry.kind), theme.button_kind),
                ]))
            })
            .collect();
        let mut list_state = ListState::default().with_selected(Some(state.selected));
        StatefulWidget::render(
            List::new(entries)
                .highlight_style(theme.list_selected)
                .block(Block::default().borders(Borders::RIGHT).border_style(theme.border)),
            cols[0],
            buf,
            &mut list_state,
        );

        if let Some(entry) = state.selected_entry() {
            let mut detail = vec![Line::from(Span::styled(
                entry.command.as_str(),
                theme.template_text,
            ))];
            if !entry.description.is_empty() {
                detail.push(Line::from(""));
                detail.push(Line::from(Span::styled(
                    entry.description.as_str(),
                    theme.dimmed,
                )));
            }
            let detail_area = Rect {
                x: cols[1].x + 1,
                width: cols[1].width.saturating_sub(1),
                ..cols[1]
            };
            Paragraph::new(detail)
                .wrap(Wrap { trim: false })
                .render(detail_area, buf);
        }

        let hints = hint_line(
            &[("j/k", "move"), ("h/l", "category"), ("Enter", "add"), ("Esc", "close")],
            theme,
        );
        buf.set_line(rows[2].x, rows[2].y, &hints, rows[2].width);
    }
}
