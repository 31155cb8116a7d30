use crate::domain::models::CommandDefinition;
use crate::domain::placeholder::{split_template, TemplateSegment};
use crate::theme::{glyphs, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

/// The button list. Rows follow `visible`, which indexes into `commands`.
pub struct CommandPanel<'a> {
    pub commands: &'a [CommandDefinition],
    pub visible: &'a [usize],
    pub theme: &'a Theme,
    pub running: bool,
}

impl StatefulWidget for CommandPanel<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ListState) {
        let theme = self.theme;

        if self.visible.is_empty() {
            let hint = if self.commands.is_empty() {
                "No commands. Press a to add one or t for templates."
            } else {
                "Nothing matches the filter."
            };
            Paragraph::new(Line::from(Span::styled(hint, theme.dimmed)))
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .filter_map(|&i| self.commands.get(i))
            .map(|def| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {} ", glyphs::icon_glyph(def.icon_name())),
                        theme.button_icon,
                    ),
                    Span::styled(def.name.clone(), theme.button_name),
                    Span::styled(format!("  {}", def.kind), theme.button_kind),
                ]))
            })
            .collect();

        // Runs are serialized, so dim the selection while one is active.
        let highlight = if self.running {
            theme.highlight
        } else {
            theme.button_selected
        };

        StatefulWidget::render(
            List::new(items).highlight_style(highlight),
            area,
            buf,
            state,
        );
    }
}

/// Template and description of the selected command, placeholders highlighted.
pub struct CommandDetail<'a> {
    pub definition: Option<&'a CommandDefinition>,
    pub theme: &'a Theme,
}

impl Widget for CommandDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(def) = self.definition else {
            return;
        };
        let theme = self.theme;

        let template: Vec<Span> = split_template(&def.template)
            .into_iter()
            .map(|segment| match segment {
                TemplateSegment::Literal(text) => Span::styled(text, theme.template_text),
                TemplateSegment::Placeholder(text) => Span::styled(text, theme.placeholder),
            })
            .collect();

        let mut lines = vec![Line::from(template)];
        if let Some(description) = def.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(Line::from(Span::styled(description, theme.dimmed)));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CommandKind;

    fn render_panel(commands: &[CommandDefinition], visible: &[usize]) -> Buffer {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        let mut state = ListState::default().with_selected(Some(0));
        CommandPanel {
            commands,
            visible,
            theme: &theme,
            running: false,
        }
        .render(area, &mut buf, &mut state);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_panel_lists_visible_rows_only() {
        let commands = vec![
            CommandDefinition::new("List devices", "hdc list targets", CommandKind::Normal),
            CommandDefinition::new("Reboot", "hdc target boot", CommandKind::Normal),
        ];
        let buf = render_panel(&commands, &[1]);
        assert!(row_text(&buf, 0).contains("Reboot"));
        assert!(!row_text(&buf, 1).contains("List devices"));
    }

    #[test]
    fn test_empty_panel_shows_hint() {
        let buf = render_panel(&[], &[]);
        assert!(row_text(&buf, 0).contains("No commands"));
    }
}
