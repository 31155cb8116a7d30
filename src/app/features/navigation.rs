use crate::app::{
    action::{Action, UpdateResult},
    state::{AppMode, AppState, InputState},
};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::SelectNext => move_selection(state, 1),
        Action::SelectPrev => move_selection(state, -1),
        Action::SelectFirst => {
            if !state.panel.visible.is_empty() {
                state.panel.list_state.select(Some(0));
            }
        }
        Action::SelectLast => {
            if let Some(last) = state.panel.visible.len().checked_sub(1) {
                state.panel.list_state.select(Some(last));
            }
        }
        Action::SelectIndex(idx) => {
            if *idx < state.panel.visible.len() {
                state.panel.list_state.select(Some(*idx));
            }
        }
        Action::ScrollOutputUp(n) => state.output.scroll_up(*n),
        Action::ScrollOutputDown(n) => state.output.scroll_down(*n),
        Action::ScrollOutputBottom => state.output.scroll = 0,
        Action::EnterFilterMode => {
            state.mode = AppMode::FilterInput;
            state.input = Some(InputState::with_text(&state.panel.filter));
        }
        Action::SubmitInput if state.mode == AppMode::FilterInput => {
            state.mode = AppMode::Normal;
            state.input = None;
        }
        Action::ClearFilter => clear_filter(state),
        _ => return UpdateResult::NotHandled,
    }
    UpdateResult::Handled(None)
}

/// Re-run the filter after the keyword changed; the first match is selected.
pub fn apply_filter(state: &mut AppState, keyword: String) {
    state.panel.filter = keyword;
    state.panel.list_state.select(Some(0));
    state.panel.refresh(&state.commands);
}

pub fn clear_filter(state: &mut AppState) {
    let selected = state.panel.selected_command();
    state.panel.filter.clear();
    state.panel.refresh(&state.commands);
    if let Some(idx) = selected {
        state.panel.focus_command(idx);
    }
}

fn move_selection(state: &mut AppState, delta: isize) {
    let len = state.panel.visible.len();
    let current_index = state.panel.list_state.selected();
    if len > 0 {
        let new_index = calculate_new_index(current_index, delta, len);
        state.panel.list_state.select(Some(new_index));
    }
}

fn calculate_new_index(current: Option<usize>, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match current {
        Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        None => 0,
    }
}
