use crate::domain::models::OutputLine;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Oldest entries are dropped past this many lines.
pub const MAX_OUTPUT_LINES: usize = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Echo of the resolved command line.
    Command,
    Stdout,
    Stderr,
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputEntry {
    pub kind: OutputKind,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputState {
    pub entries: VecDeque<OutputEntry>,
    // Lines scrolled up from the tail; 0 follows new output.
    pub scroll: u16,
}

impl OutputState {
    pub fn push(&mut self, kind: OutputKind, text: impl Into<String>) {
        if self.entries.len() >= MAX_OUTPUT_LINES {
            self.entries.pop_front();
        }
        self.entries.push_back(OutputEntry {
            kind,
            text: text.into(),
            timestamp: Local::now(),
        });
        if self.scroll > 0 {
            // Keep the viewport on the same lines while the tail grows.
            self.scroll = self.scroll.saturating_add(1).min(self.max_scroll());
        }
    }

    pub fn push_line(&mut self, line: OutputLine) {
        let kind = if line.is_stderr() {
            OutputKind::Stderr
        } else {
            OutputKind::Stdout
        };
        self.push(kind, line.text);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_add(amount).min(self.max_scroll());
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.entries.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    /// Entries visible in a viewport `height` lines tall, honouring `scroll`.
    pub fn window(&self, height: usize) -> impl Iterator<Item = &OutputEntry> {
        let end = self.entries.len().saturating_sub(self.scroll as usize);
        let start = end.saturating_sub(height);
        self.entries.range(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_caps_length() {
        let mut output = OutputState::default();
        for i in 0..MAX_OUTPUT_LINES + 10 {
            output.push(OutputKind::Stdout, i.to_string());
        }
        assert_eq!(output.len(), MAX_OUTPUT_LINES);
        assert_eq!(output.entries.front().unwrap().text, "10");
    }

    #[test]
    fn test_window_follows_tail_and_scrolls() {
        let mut output = OutputState::default();
        for i in 0..10 {
            output.push(OutputKind::Stdout, i.to_string());
        }
        let tail: Vec<_> = output.window(3).map(|e| e.text.clone()).collect();
        assert_eq!(tail, vec!["7", "8", "9"]);

        output.scroll_up(2);
        let scrolled: Vec<_> = output.window(3).map(|e| e.text.clone()).collect();
        assert_eq!(scrolled, vec!["5", "6", "7"]);

        // New output keeps the scrolled viewport in place
        output.push(OutputKind::Stderr, "10");
        let pinned: Vec<_> = output.window(3).map(|e| e.text.clone()).collect();
        assert_eq!(pinned, vec!["5", "6", "7"]);

        output.scroll_down(100);
        assert_eq!(output.scroll, 0);
        output.scroll_up(1000);
        assert_eq!(output.scroll, 10);
    }

    #[test]
    fn test_stderr_lines_are_tagged() {
        let mut output = OutputState::default();
        output.push_line(OutputLine::stderr("boom"));
        output.push_line(OutputLine::stdout("ok"));
        assert_eq!(output.entries[0].kind, OutputKind::Stderr);
        assert_eq!(output.entries[1].kind, OutputKind::Stdout);
    }
}
