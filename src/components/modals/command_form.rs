use crate::app::state::{CommandFormState, FormField};
use crate::theme::{glyphs, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Widget,
};

use super::helpers::{centered_rect_fixed_height, hint_line, modal_title, open_modal};

const LABEL_WIDTH: u16 = 13;

pub struct CommandFormModal<'a> {
    pub theme: &'a Theme,
    pub form: &'a CommandFormState<'a>,
}

impl Widget for CommandFormModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fields = FormField::all();
        // One row per field, a spacer, the hints and the borders.
        let modal_area = centered_rect_fixed_height(70, fields.len() as u16 + 4, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        let title = if self.form.editing.is_some() {
            " EDIT COMMAND "
        } else {
            " ADD COMMAND "
        };
        let inner = open_modal(buf, modal_area, area, modal_title(title, self.theme), self.theme);

        let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(1)).collect();
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (field, row) in fields.iter().zip(rows.iter()).filter(|(_, r)| r.height > 0) {
            self.render_field(*field, *row, buf);
        }

        let hints = hint_line(
            &[("Tab", "next"), ("Enter", "save"), ("Esc", "cancel")],
            self.theme,
        );
        if let Some(hint_row) = rows.last().filter(|r| r.height > 0) {
            buf.set_line(hint_row.x, hint_row.y, &hints, hint_row.width);
        }
    }
}

impl CommandFormModal<'_> {
    fn render_field(&self, field: FormField, row: Rect, buf: &mut Buffer) {
        let focused = self.form.focus == field;
        let label_style = if focused {
            self.theme.header_active
        } else {
            self.theme.header_item
        };

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)])
            .split(row);

        let label = Line::from(Span::styled(format!(" {:<11}", field.label()), label_style));
        buf.set_line(cols[0].x, cols[0].y, &label, cols[0].width);

        let text_area = match field {
            FormField::Name => &self.form.name,
            FormField::Template => &self.form.template,
            FormField::Icon => &self.form.icon,
            FormField::Description => &self.form.description,
            FormField::Kind => {
                let style = if focused {
                    self.theme.list_selected
                } else {
                    self.theme.list_item
                };
                let kind = Line::from(vec![
                    Span::styled(format!(" ◂ {} ▸ ", self.form.kind), style),
                    Span::raw(" "),
                    Span::styled(
                        glyphs::icon_glyph(self.form.kind.label()),
                        self.theme.button_icon,
                    ),
                ]);
                buf.set_line(cols[1].x, cols[1].y, &kind, cols[1].width);
                return;
            }
        };

        if focused {
            Widget::render(text_area, cols[1], buf);
        } else {
            let value = Line::from(Span::styled(text_area.value(), self.theme.list_item));
            buf.set_line(cols[1].x, cols[1].y, &value, cols[1].width);
        }
    }
}
