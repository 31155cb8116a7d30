use crate::app::state::{ErrorSeverity, ErrorState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow, hint_line};

pub struct ErrorModal<'a> {
    pub theme: &'a Theme,
    pub error: &'a ErrorState,
}

impl<'a> ErrorModal<'a> {
    fn decoration(&self) -> (&'static str, Style, &'static str) {
        match self.error.severity {
            ErrorSeverity::Info => (" INFO ", self.theme.header_item, "󰋼"),
            ErrorSeverity::Warning => (" WARNING ", self.theme.header_warn, "󱈸"),
            ErrorSeverity::Error => (" ERROR ", self.theme.status_error, "󰅚"),
            ErrorSeverity::Critical => (" CRITICAL ", self.theme.status_error, "󰀦"),
        }
    }

    fn body(&self, accent: Style, icon: &'static str) -> Vec<Line<'a>> {
        let theme = self.theme;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("{icon} "), accent),
                Span::styled(self.error.message.as_str(), theme.footer_segment_val),
            ]),
            Line::from(Span::styled(
                self.error.timestamp.format("at %H:%M:%S").to_string(),
                theme.dimmed,
            )),
        ];

        if !self.error.suggestions.is_empty() {
            lines.push(Line::from(""));
            lines.extend(self.error.suggestions.iter().map(|suggestion| {
                Line::from(vec![
                    Span::styled("• ", theme.header_item),
                    Span::styled(suggestion.as_str(), theme.footer_segment_key),
                ])
            }));
        }

        lines.push(Line::from(""));
        lines.push(hint_line(&[("Esc", "dismiss")], theme));
        lines
    }
}

impl Widget for ErrorModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, accent, icon) = self.decoration();
        let lines = self.body(accent, icon);

        // Borders plus one spare row for a wrapped message.
        let height = lines.len() as u16 + 3;
        let modal_area = centered_rect_fixed_height(60, height, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let border_type = match self.error.severity {
            ErrorSeverity::Info | ErrorSeverity::Warning => BorderType::Rounded,
            ErrorSeverity::Error | ErrorSeverity::Critical => BorderType::Double,
        };
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title, accent),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(accent);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(modal_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_are_listed() {
        let theme = Theme::default();
        let error = ErrorState::error("failed to start `sh`: not found");
        assert!(!error.suggestions.is_empty());

        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        ErrorModal {
            theme: &theme,
            error: &error,
        }
        .render(area, &mut buf);

        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("ERROR"));
        assert!(content.contains("failed to start"));
    }
}
