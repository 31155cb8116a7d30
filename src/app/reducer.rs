use super::{
    action::{Action, UpdateResult},
    command::Command,
    features::{manager, navigation, panel, ui},
    state::AppState,
};

type Feature = fn(&mut AppState, &Action) -> UpdateResult;

const FEATURES: [Feature; 4] = [navigation::update, panel::update, manager::update, ui::update];

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    for feature in FEATURES {
        if let UpdateResult::Handled(command) = feature(state, &action) {
            return command;
        }
    }
    tracing::trace!(?action, "unhandled action");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::command::StoreCommand;
    use crate::app::state::AppMode;
    use crate::domain::models::{CommandDefinition, CommandKind, Completion};
    use crate::theme::PaletteType;

    fn state() -> AppState<'static> {
        AppState::new(
            vec![
                CommandDefinition::new("Device List", "hdc list targets", CommandKind::Normal),
                CommandDefinition::new("Uninstall App", "hdc uninstall {package_name}", CommandKind::Normal),
            ],
            PaletteType::default(),
        )
    }

    #[test]
    fn test_scroll_output() {
        let mut state = state();
        for i in 0..20 {
            state
                .output
                .push(crate::app::state::OutputKind::Stdout, i.to_string());
        }

        update(&mut state, Action::ScrollOutputUp(5));
        assert_eq!(state.output.scroll, 5);

        update(&mut state, Action::ScrollOutputDown(10));
        assert_eq!(state.output.scroll, 0);

        update(&mut state, Action::ScrollOutputUp(15));
        update(&mut state, Action::ScrollOutputBottom);
        assert_eq!(state.output.scroll, 0);
    }

    #[test]
    fn test_prompt_flow_end_to_end() {
        let mut state = state();
        update(&mut state, Action::SelectNext);
        assert!(update(&mut state, Action::RunSelected).is_none());
        assert_eq!(state.mode, AppMode::Prompt);

        // Esc abandons the run
        update(&mut state, Action::CancelMode);
        assert_eq!(state.mode, AppMode::Normal);
        assert!(state.running.is_none());

        update(&mut state, Action::RunSelected);
        state
            .input
            .as_mut()
            .unwrap()
            .text_area
            .insert_str("com.example");
        let cmd = update(&mut state, Action::SubmitInput);
        assert!(matches!(cmd, Some(Command::Execute { .. })));

        update(&mut state, Action::ExecutionFinished(Completion::exited(0)));
        assert!(state.running.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("finished"));
    }

    #[test]
    fn test_external_change_reloads() {
        let mut state = state();
        assert_eq!(
            update(&mut state, Action::ExternalChangeDetected),
            Some(Command::Store(StoreCommand::Reload))
        );
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut state = state();
        update(&mut state, Action::Quit);
        assert!(state.should_quit);
    }
}
