use crate::app::state::AppTextArea;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::helpers::{centered_rect_fixed_height, modal_title, open_modal};

/// Single-line input box, used for the filter and for placeholder prompts.
pub struct TextInputModal<'a> {
    pub theme: &'a Theme,
    pub title: &'a str,
    pub text_area: &'a AppTextArea<'a>,
    /// Extra line shown under the input.
    pub hint: Option<&'a str>,
}

impl Widget for TextInputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = if self.hint.is_some() { 4 } else { 3 };
        let modal_area = centered_rect_fixed_height(60, height, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        let inner = open_modal(buf, modal_area, area, modal_title(self.title, self.theme), self.theme);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let input_area = Rect { height: 1, ..inner };
        Widget::render(self.text_area, input_area, buf);

        if let Some(hint) = self.hint {
            if inner.height > 1 {
                let line = Line::from(Span::styled(hint, self.theme.dimmed));
                buf.set_line(inner.x, inner.y + 1, &line, inner.width);
            }
        }
    }
}
