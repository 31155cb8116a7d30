use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Row, Table, Widget},
};

use super::helpers::{centered_rect, modal_title, open_modal};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j / ↓", "Select next command"),
            ("k / ↑", "Select previous command"),
            ("g / G", "First / last command"),
            ("/", "Filter by name or command"),
            ("C", "Clear the filter"),
        ],
    ),
    (
        "Running",
        &[
            ("Enter", "Run the selected command"),
            ("PgUp / PgDn", "Scroll output"),
            ("b", "Jump to the newest output"),
            ("c", "Clear output"),
        ],
    ),
    (
        "Managing",
        &[
            ("a", "Add a command"),
            ("e", "Edit the selected command"),
            ("d / Del", "Delete the selected command"),
            ("K / J", "Move command up / down"),
            ("t", "Add from templates"),
            ("r", "Reload the command file"),
        ],
    ),
    (
        "General",
        &[
            ("T", "Choose theme"),
            ("?", "Show this help"),
            ("Esc", "Close modal / dismiss error"),
            ("q / Ctrl+C", "Quit"),
        ],
    ),
];

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
}

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(70, 80, area);
        if help_area.width == 0 || help_area.height == 0 {
            return;
        }
        let inner = open_modal(
            buf,
            help_area,
            area,
            modal_title(" HELP - KEYBINDINGS ", self.theme),
            self.theme,
        );

        let key_style = self.theme.footer_segment_key;
        let desc_style = self.theme.list_item;
        let category_style = self.theme.header_item;

        let mut rows = Vec::new();
        for (i, (section, bindings)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                rows.push(Row::new(vec![Cell::from(""), Cell::from("")]));
            }
            rows.push(Row::new(vec![
                Cell::from(Span::styled(*section, category_style)),
                Cell::from(""),
            ]));
            for (key, desc) in *bindings {
                rows.push(Row::new(vec![
                    Cell::from(Span::styled(format!(" {key}"), key_style)),
                    Cell::from(Span::styled(*desc, desc_style)),
                ]));
            }
        }

        Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)])
            .render(inner, buf);
    }
}
