use crate::app::state::{OutputKind, OutputState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct OutputView<'a> {
    pub output: &'a OutputState,
    pub theme: &'a Theme,
}

impl Widget for OutputView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;

        if self.output.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "Output of executed commands appears here.",
                theme.dimmed,
            )))
            .render(area, buf);
            return;
        }

        let lines: Vec<Line> = self
            .output
            .window(area.height as usize)
            .map(|entry| {
                let style = match entry.kind {
                    OutputKind::Command => theme.output_command,
                    OutputKind::Stdout => keyword_style(&entry.text, theme.output_stdout, theme),
                    OutputKind::Stderr => keyword_style(&entry.text, theme.output_stderr, theme),
                    OutputKind::Info => theme.output_info,
                    OutputKind::Success => theme.output_success,
                    OutputKind::Warning => theme.output_warning,
                    OutputKind::Error => theme.output_error,
                };
                Line::from(vec![
                    Span::styled(entry.timestamp.format("%H:%M:%S ").to_string(), theme.timestamp),
                    Span::styled(entry.text.as_str(), style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}

// Tint process output that reports a failure, a warning or a success.
fn keyword_style(text: &str, base: Style, theme: &Theme) -> Style {
    let lower = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    if has(&["error", "failed", "exception"]) {
        theme.output_error
    } else if has(&["warning"]) {
        theme.output_warning
    } else if has(&["success", "completed"]) {
        theme.output_success
    } else {
        base
    }
}
