use crate::app::state::AppState;
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
    pub terminal_width: u16,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let theme = self.theme;

        // Segment background colors for separator transitions
        let logo_bg = theme.header_logo.bg.unwrap_or(Color::Reset);
        let stats_bg = theme.header_stats.bg.unwrap_or(Color::Reset);
        let item_bg = theme.header_item.bg.unwrap_or(Color::Reset);
        let base_bg = theme.header.bg.unwrap_or(Color::Reset);

        let visible = state.panel.visible.len();
        let total = state.commands.len();
        let count_text = if visible == total {
            format!(" {total} commands ")
        } else {
            format!(" {visible}/{total} commands ")
        };

        let mut spans = vec![
            Span::styled(format!(" {} CMDPANEL ", glyphs::PANEL), theme.header_logo),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(logo_bg).bg(stats_bg)),
            Span::styled(count_text, theme.header_stats),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(stats_bg).bg(item_bg)),
            Span::styled(
                format!(" {} {} ", glyphs::PROMPT, state.shell_program),
                theme.header_item,
            ),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(item_bg).bg(base_bg)),
            Span::raw(" "),
        ];

        if let Some(running) = &state.running {
            spans.push(Span::styled(
                format!(
                    " {} {} {} {}s ",
                    state.spinner,
                    glyphs::RUNNING,
                    running.name,
                    running.started.elapsed().as_secs()
                ),
                theme.header_active,
            ));
            spans.push(Span::raw(" "));
        }

        if !state.panel.filter.is_empty() {
            spans.push(Span::styled(
                format!(" FILTER: {} ", state.panel.filter),
                theme.header_warn,
            ));
        }

        // Fill rest of line
        spans.push(Span::styled(
            " ".repeat(self.terminal_width as usize),
            theme.header,
        ));

        Paragraph::new(Line::from(spans))
            .style(theme.header)
            .render(area, buf);
    }
}
