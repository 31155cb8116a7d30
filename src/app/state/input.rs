use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use std::ops::{Deref, DerefMut};
use crate::domain::placeholder::PromptMode;
use tui_textarea::{CursorMove, TextArea};

#[derive(Default)]
pub struct AppTextArea<'a>(pub TextArea<'a>);

impl AppTextArea<'_> {
    /// Single-line area pre-filled with `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let mut area = TextArea::new(vec![text.to_string()]);
        area.move_cursor(CursorMove::End);
        Self(area)
    }

    /// Content with line breaks dropped; every input here is a single line.
    pub fn value(&self) -> String {
        self.0.lines().join("")
    }
}

impl Clone for AppTextArea<'_> {
    fn clone(&self) -> Self {
        let mut area = TextArea::new(self.0.lines().to_vec());
        let (row, col) = self.0.cursor();
        area.move_cursor(CursorMove::Jump(row as u16, col as u16));
        area.set_placeholder_text(self.0.placeholder_text());
        Self(area)
    }
}

impl std::fmt::Debug for AppTextArea<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTextArea")
            .field("lines", &self.0.lines())
            .field("cursor", &self.0.cursor())
            .finish()
    }
}

impl PartialEq for AppTextArea<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.lines() == other.0.lines() && self.0.cursor() == other.0.cursor()
    }
}

impl<'a> Deref for AppTextArea<'a> {
    type Target = TextArea<'a>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AppTextArea<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Widget for &AppTextArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.0, area, buf);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputState<'a> {
    pub text_area: AppTextArea<'a>,
}

impl InputState<'_> {
    pub fn with_text(text: &str) -> Self {
        Self {
            text_area: AppTextArea::with_text(text),
        }
    }

    /// Empty input for one placeholder prompt, hinting at what is expected.
    pub fn for_prompt(mode: PromptMode) -> Self {
        let mut text_area = AppTextArea::default();
        match mode {
            PromptMode::Text => {}
            PromptMode::OpenPath => text_area.set_placeholder_text("path to an existing local file"),
            PromptMode::SavePath => {
                text_area.set_placeholder_text("leave empty to save in the working directory");
            }
        }
        Self { text_area }
    }
}
