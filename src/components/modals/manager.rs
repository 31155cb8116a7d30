use crate::app::state::{AppMode, AppState};
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::command_form::CommandFormModal;
use super::confirm_delete::ConfirmDeleteModal;
use super::error::ErrorModal;
use super::help::HelpModal;
use super::helpers::dim_area;
use super::template_picker::TemplatePickerModal;
use super::text_input::TextInputModal;
use super::theme_selection::ThemeSelectionModal;

pub struct ModalManager<'a> {
    pub theme: &'a Theme,
    pub app_state: &'a AppState<'a>,
}

impl Widget for ModalManager<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.app_state;
        let theme = self.theme;

        // --- Visual Dimming ---
        let is_modal_active = state.mode != AppMode::Normal || state.last_error.is_some();
        if is_modal_active {
            dim_area(buf, area);
        }

        match state.mode {
            AppMode::Normal => {}
            AppMode::Help => HelpModal { theme }.render(area, buf),
            AppMode::FilterInput => {
                if let Some(input) = &state.input {
                    TextInputModal {
                        theme,
                        title: " FILTER ",
                        text_area: &input.text_area,
                        hint: None,
                    }
                    .render(area, buf);
                }
            }
            AppMode::Prompt => {
                if let (Some(input), Some(spec)) =
                    (&state.input, state.prompt.as_ref().and_then(|p| p.spec()))
                {
                    let hint = state.prompt.as_ref().map(|p| {
                        format!(
                            "{} · step {} of {}",
                            p.definition.name,
                            p.step + 1,
                            p.placeholders.len()
                        )
                    });
                    TextInputModal {
                        theme,
                        title: &spec.title,
                        text_area: &input.text_area,
                        hint: hint.as_deref(),
                    }
                    .render(area, buf);
                }
            }
            AppMode::CommandForm => {
                if let Some(form) = &state.form {
                    CommandFormModal { theme, form }.render(area, buf);
                }
            }
            AppMode::TemplatePicker => {
                if let Some(picker) = &state.templates {
                    TemplatePickerModal {
                        theme,
                        state: picker,
                    }
                    .render(area, buf);
                }
            }
            AppMode::ThemeSelection => {
                if let Some(ts) = &state.theme_selection {
                    ThemeSelectionModal {
                        theme,
                        state: ts,
                        current: state.palette_type,
                    }
                    .render(area, buf);
                }
            }
            AppMode::ConfirmDelete => {
                if let Some(definition) = state.pending_delete.and_then(|i| state.commands.get(i)) {
                    ConfirmDeleteModal { theme, definition }.render(area, buf);
                }
            }
        }

        // --- Error Modal ---
        if let Some(err) = &state.last_error {
            ErrorModal { theme, error: err }.render(area, buf);
        }
    }
}
