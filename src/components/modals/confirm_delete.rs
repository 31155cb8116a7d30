use crate::domain::models::CommandDefinition;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::helpers::{centered_rect_fixed_height, hint_line, modal_title, open_modal};

pub struct ConfirmDeleteModal<'a> {
    pub theme: &'a Theme,
    pub definition: &'a CommandDefinition,
}

impl Widget for ConfirmDeleteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect_fixed_height(50, 5, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }
        let inner = open_modal(
            buf,
            modal_area,
            area,
            modal_title(" DELETE COMMAND ", self.theme),
            self.theme,
        );

        let lines = vec![
            Line::from(vec![
                Span::raw("Delete "),
                Span::styled(self.definition.name.as_str(), self.theme.button_name),
                Span::raw("?"),
            ]),
            Line::from(""),
            hint_line(&[("y", "delete"), ("n", "keep")], self.theme),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
