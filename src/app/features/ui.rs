use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    persistence::{save_ui_settings, UiSettings},
    state::{AppMode, AppState, ErrorState, ThemeSelectionState},
};
use crate::theme::{PaletteType, Theme};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;

use super::{navigation, panel};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::CancelMode => cancel_mode(state),
        Action::ToggleHelp => {
            state.mode = if state.mode == AppMode::Help {
                AppMode::Normal
            } else {
                AppMode::Help
            };
        }
        Action::EnterThemeSelection => {
            state.mode = AppMode::ThemeSelection;
            state.theme_selection = Some(ThemeSelectionState::starting_at(state.palette_type));
        }
        Action::SelectThemeNext => {
            if let Some(ts) = &mut state.theme_selection {
                ts.selected_index = (ts.selected_index + 1) % ts.themes.len();
            }
        }
        Action::SelectThemePrev => {
            if let Some(ts) = &mut state.theme_selection {
                if ts.selected_index == 0 {
                    ts.selected_index = ts.themes.len() - 1;
                } else {
                    ts.selected_index -= 1;
                }
            }
        }
        Action::SwitchTheme(palette) => {
            state.palette_type = *palette;
            state.theme = Theme::from_palette_type(*palette);
            state.theme_selection = None;
            state.mode = AppMode::Normal;
            return UpdateResult::Handled(Some(Command::SaveSettings(*palette)));
        }
        Action::TextAreaInput(key) => match state.mode {
            AppMode::FilterInput => {
                let keyword = state.input.as_mut().map(|input| {
                    input.text_area.input(*key);
                    input.text_area.value()
                });
                if let Some(keyword) = keyword {
                    navigation::apply_filter(state, keyword);
                }
            }
            AppMode::Prompt => {
                if let Some(input) = &mut state.input {
                    input.text_area.input(*key);
                }
            }
            AppMode::CommandForm => {
                if let Some(area) = state.form.as_mut().and_then(|f| f.focused_text_area()) {
                    area.input(*key);
                }
            }
            _ => {}
        },
        Action::OperationCompleted(result) => match result {
            Ok(msg) => state.set_status(msg.clone()),
            Err(err) => state.set_error(ErrorState::error(err.clone())),
        },
        Action::ErrorOccurred(err) => state.set_error(ErrorState::error(err.clone())),
        Action::WarningOccurred(msg) => state.set_error(ErrorState::warning(msg.clone())),
        Action::Tick => state.tick(Instant::now()),
        Action::Resize(_, _) => {}
        Action::Quit => state.should_quit = true,
        _ => return UpdateResult::NotHandled,
    }
    UpdateResult::Handled(None)
}

fn cancel_mode(state: &mut AppState) {
    // Esc first dismisses an error and leaves the underlying mode alone.
    if state.last_error.take().is_some() {
        return;
    }

    match state.mode {
        AppMode::Prompt => panel::cancel_prompt(state),
        AppMode::FilterInput => navigation::clear_filter(state),
        AppMode::Normal if !state.panel.filter.is_empty() => navigation::clear_filter(state),
        _ => {}
    }

    state.mode = AppMode::Normal;
    state.input = None;
    state.prompt = None;
    state.form = None;
    state.templates = None;
    state.theme_selection = None;
    state.pending_delete = None;
}

/// Persist the chosen palette off the runtime.
pub fn save_settings_in_background(path: PathBuf, palette: PaletteType, tx: mpsc::Sender<Action>) {
    tokio::task::spawn_blocking(move || {
        let settings = UiSettings { theme: palette };
        if let Err(e) = save_ui_settings(&path, &settings) {
            let _ = tx.blocking_send(Action::ErrorOccurred(e.to_string()));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ErrorSeverity;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_escape_dismisses_error_before_mode() {
        let mut state = AppState::default();
        state.mode = AppMode::Help;
        state.last_error = Some(ErrorState::new("boom", ErrorSeverity::Error));

        update(&mut state, &Action::CancelMode);
        assert!(state.last_error.is_none());
        assert_eq!(state.mode, AppMode::Help);

        update(&mut state, &Action::CancelMode);
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn test_switch_theme_requests_save() {
        let mut state = AppState::default();
        update(&mut state, &Action::EnterThemeSelection);
        update(&mut state, &Action::SelectThemeNext);
        let palette = state.theme_selection.as_ref().unwrap().selected().unwrap();
        assert_eq!(palette, PaletteType::Nord);

        match update(&mut state, &Action::SwitchTheme(palette)) {
            UpdateResult::Handled(Some(Command::SaveSettings(PaletteType::Nord))) => {}
            other => panic!("Expected SaveSettings, got {other:?}"),
        }
        assert_eq!(state.theme, Theme::from_palette_type(PaletteType::Nord));
    }

    #[test]
    fn test_filter_typing_updates_visible_commands() {
        use crate::domain::models::{CommandDefinition, CommandKind};
        let mut state = AppState::new(
            vec![
                CommandDefinition::new("Device List", "hdc list targets", CommandKind::Normal),
                CommandDefinition::new("Reboot", "hdc target boot", CommandKind::Normal),
            ],
            PaletteType::default(),
        );
        navigation::update(&mut state, &Action::EnterFilterMode);
        for c in "boot".chars() {
            update(
                &mut state,
                &Action::TextAreaInput(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
        assert_eq!(state.panel.visible, vec![1]);

        update(&mut state, &Action::CancelMode);
        assert_eq!(state.panel.visible, vec![0, 1]);
        assert_eq!(state.mode, AppMode::Normal);
    }
}
