use crate::app::{
    action::Action,
    state::{AppMode, AppState, FormField},
    ui,
};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::{Rect, Size};

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    let key = match event {
        Event::Key(key) if key.kind == KeyEventKind::Release => return None,
        Event::Key(key) => key,
        Event::Resize(w, h) => return Some(Action::Resize(w, h)),
        Event::Mouse(mouse) => {
            if app_state.mode != AppMode::Normal || app_state.last_error.is_some() {
                return None;
            }
            let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
            return map_mouse(app_state, area, mouse.kind, mouse.column, mouse.row);
        }
        _ => return None,
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // An open error swallows everything but its dismissal.
    if app_state.last_error.is_some() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::CancelMode),
            _ => None,
        };
    }

    match app_state.mode {
        AppMode::Normal => app_state.keymap.get_action(key),
        AppMode::FilterInput => match key.code {
            KeyCode::Esc => Some(Action::CancelMode),
            KeyCode::Enter => Some(Action::SubmitInput),
            KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Up => Some(Action::SelectPrev),
            _ => Some(Action::TextAreaInput(key)),
        },
        AppMode::Prompt => match key.code {
            KeyCode::Esc => Some(Action::CancelMode),
            KeyCode::Enter => Some(Action::SubmitInput),
            _ => Some(Action::TextAreaInput(key)),
        },
        AppMode::CommandForm => map_form_key(app_state, key),
        AppMode::TemplatePicker => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CancelMode),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::TemplateNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::TemplatePrev),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Action::TemplateNextCategory),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => Some(Action::TemplatePrevCategory),
            KeyCode::Enter => Some(Action::TemplateSelect),
            _ => None,
        },
        AppMode::ThemeSelection => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CancelMode),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectThemeNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectThemePrev),
            KeyCode::Enter => app_state
                .theme_selection
                .as_ref()
                .and_then(|ts| ts.selected())
                .map(Action::SwitchTheme),
            _ => None,
        },
        AppMode::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('q' | '?') => Some(Action::ToggleHelp),
            _ => None,
        },
        AppMode::ConfirmDelete => match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::ConfirmDelete),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::CancelMode),
            _ => None,
        },
    }
}

fn map_form_key(app_state: &AppState<'_>, key: KeyEvent) -> Option<Action> {
    let on_kind = app_state
        .form
        .as_ref()
        .is_some_and(|f| f.focus == FormField::Kind);
    match key.code {
        KeyCode::Esc => Some(Action::CancelMode),
        KeyCode::Enter => Some(Action::SubmitInput),
        KeyCode::Tab | KeyCode::Down => Some(Action::FormNextField),
        KeyCode::BackTab | KeyCode::Up => Some(Action::FormPrevField),
        KeyCode::Left | KeyCode::Char('h') if on_kind => Some(Action::FormCycleKind(false)),
        KeyCode::Right | KeyCode::Char('l' | ' ') if on_kind => Some(Action::FormCycleKind(true)),
        _ if on_kind => None,
        _ => Some(Action::TextAreaInput(key)),
    }
}

fn map_mouse(
    app_state: &AppState<'_>,
    area: Rect,
    kind: MouseEventKind,
    column: u16,
    row: u16,
) -> Option<Action> {
    let layout = ui::get_layout(area);
    let panel_area = layout.body[0];
    let output_area = layout.body[1];
    let in_panel = contains(panel_area, column, row);
    let in_output = contains(output_area, column, row);

    match kind {
        MouseEventKind::ScrollUp if in_output => Some(Action::ScrollOutputUp(3)),
        MouseEventKind::ScrollDown if in_output => Some(Action::ScrollOutputDown(3)),
        MouseEventKind::ScrollUp if in_panel => Some(Action::SelectPrev),
        MouseEventKind::ScrollDown if in_panel => Some(Action::SelectNext),
        MouseEventKind::Down(MouseButton::Left) if in_panel => {
            // Rows start below the top border, one line per command.
            let list_rows = panel_area.height.saturating_sub(ui::DETAIL_HEIGHT + 2);
            let clicked = row.checked_sub(panel_area.y + 1).filter(|r| *r < list_rows)? as usize;
            let index = app_state.panel.list_state.offset() + clicked;
            (index < app_state.panel.visible.len()).then_some(Action::SelectIndex(index))
        }
        _ => None,
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ErrorState;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_ctrl_c_quits_in_any_mode() {
        let mut state = AppState::default();
        state.mode = AppMode::Prompt;
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(
            map_event_to_action(ctrl_c, &state, Size::new(80, 24)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_prompt_keys_go_to_text_area() {
        let mut state = AppState::default();
        state.mode = AppMode::Prompt;
        assert!(matches!(
            map_event_to_action(press(KeyCode::Char('q')), &state, Size::new(80, 24)),
            Some(Action::TextAreaInput(_))
        ));
        assert_eq!(
            map_event_to_action(press(KeyCode::Enter), &state, Size::new(80, 24)),
            Some(Action::SubmitInput)
        );
    }

    #[test]
    fn test_error_swallows_keys() {
        let mut state = AppState::default();
        state.last_error = Some(ErrorState::error("boom"));
        assert_eq!(
            map_event_to_action(press(KeyCode::Char('q')), &state, Size::new(80, 24)),
            None
        );
        assert_eq!(
            map_event_to_action(press(KeyCode::Esc), &state, Size::new(80, 24)),
            Some(Action::CancelMode)
        );
    }
}
