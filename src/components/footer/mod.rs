mod groups;
mod types;

use crate::app::state::AppState;
use crate::theme::Theme;
pub use types::{FooterGroup, FooterItem};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Footer<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Footer<'_> {
    fn status_span(&self) -> Span<'static> {
        let theme = self.theme;
        let state = self.state;
        if let Some(err) = &state.last_error {
            Span::styled(format!("  ERROR: {}  ", err.message), theme.status_error)
        } else if let Some(msg) = &state.status_message {
            Span::styled(format!("  {msg}  "), theme.status_info)
        } else if state.running.is_some() {
            Span::styled(format!("  {} RUNNING  ", state.spinner), theme.status_warn)
        } else {
            Span::styled("  READY  ", theme.status_ready)
        }
    }

    /// Hint spans for `group` that fit in `budget` columns. Items are
    /// dropped from the end, never truncated.
    fn group_spans(&self, group: &FooterGroup, budget: usize, labelled: bool) -> Vec<Span<'static>> {
        let theme = self.theme;
        let mut spans = Vec::new();
        let mut used = 0;

        if labelled {
            let label = format!("{}: ", group.name);
            used += label.len();
            spans.push(Span::styled(label, theme.footer_group_name));
        }

        for item in &group.items {
            let key = format!(" {} ", item.key);
            let desc = format!(" {} ", item.desc);
            let width = Span::raw(key.as_str()).width() + Span::raw(desc.as_str()).width() + 1;
            if used + width > budget {
                break;
            }
            let (key_style, val_style) = if item.highlighted {
                (theme.header_active, theme.header_active.add_modifier(Modifier::DIM))
            } else {
                (theme.footer_segment_key, theme.footer_segment_val)
            };
            spans.push(Span::styled(key, key_style));
            spans.push(Span::styled(desc, val_style));
            spans.push(Span::raw(" "));
            used += width;
        }

        // A label with nothing after it is noise.
        if labelled && spans.len() == 1 {
            spans.clear();
        }
        spans
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![self.status_span(), Span::raw("  ")];
        let available = area.width.saturating_sub(4) as usize;
        let labelled = area.width > 100;

        for group in groups::get_groups(self.state) {
            let used: usize = spans.iter().map(Span::width).sum();
            let group_spans = self.group_spans(&group, available.saturating_sub(used), labelled);
            if group_spans.is_empty() {
                break;
            }
            spans.extend(group_spans);
            spans.push(Span::raw("  "));
        }

        Paragraph::new(Line::from(spans))
            .style(self.theme.footer)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_never_overflow() {
        let state = AppState::default();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        Footer {
            state: &state,
            theme: &theme,
        }
        .render(area, &mut buf);

        let text: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(text.contains("READY"));
    }
}
