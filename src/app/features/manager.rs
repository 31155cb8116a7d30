use crate::app::{
    action::{Action, UpdateResult},
    command::{Command, StoreCommand},
    state::{AppMode, AppState, CommandFormState, ErrorState, TemplatePickerState},
};
use crate::infrastructure::store::CommandStore;
use crate::infrastructure::templates::load_templates;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    let command = match action {
        Action::AddCommandIntent => {
            state.form = Some(CommandFormState::default());
            state.mode = AppMode::CommandForm;
            None
        }
        Action::EditCommandIntent => {
            if let Some(idx) = state.panel.selected_command() {
                if let Some(definition) = state.commands.get(idx) {
                    state.form = Some(CommandFormState::editing(idx, definition));
                    state.mode = AppMode::CommandForm;
                }
            }
            None
        }
        Action::DeleteCommandIntent => {
            if let Some(idx) = state.panel.selected_command() {
                state.pending_delete = Some(idx);
                state.mode = AppMode::ConfirmDelete;
            }
            None
        }
        Action::ConfirmDelete => {
            state.mode = AppMode::Normal;
            state
                .pending_delete
                .take()
                .map(|idx| Command::Store(StoreCommand::Remove(idx)))
        }
        Action::MoveCommandUp | Action::MoveCommandDown => {
            let up = *action == Action::MoveCommandUp;
            state
                .panel
                .selected_command()
                .map(|index| Command::Store(StoreCommand::Move { index, up }))
        }
        Action::FormNextField | Action::FormPrevField => {
            let forward = *action == Action::FormNextField;
            if let Some(form) = &mut state.form {
                form.focus = form.focus.step(forward);
            }
            None
        }
        Action::FormCycleKind(forward) => {
            if let Some(form) = &mut state.form {
                form.kind = form.kind.cycle(*forward);
            }
            None
        }
        Action::SubmitInput if state.mode == AppMode::CommandForm => submit_form(state),
        Action::OpenTemplates => {
            state.templates = Some(TemplatePickerState::loading());
            state.mode = AppMode::TemplatePicker;
            Some(Command::LoadTemplates)
        }
        Action::TemplatesLoaded(categories) => {
            if let Some(picker) = &mut state.templates {
                *picker = TemplatePickerState {
                    categories: categories.clone(),
                    ..Default::default()
                };
            }
            None
        }
        Action::TemplateNext => {
            if let Some(picker) = &mut state.templates {
                picker.next();
            }
            None
        }
        Action::TemplatePrev => {
            if let Some(picker) = &mut state.templates {
                picker.prev();
            }
            None
        }
        Action::TemplateNextCategory => {
            if let Some(picker) = &mut state.templates {
                picker.next_category();
            }
            None
        }
        Action::TemplatePrevCategory => {
            if let Some(picker) = &mut state.templates {
                picker.prev_category();
            }
            None
        }
        Action::TemplateSelect => {
            let definition = state
                .templates
                .as_ref()
                .and_then(TemplatePickerState::selected_entry)
                .map(|entry| entry.to_definition());
            if definition.is_some() {
                state.templates = None;
                state.mode = AppMode::Normal;
            }
            definition.map(|d| Command::Store(StoreCommand::Add(d)))
        }
        Action::ReloadCommands | Action::ExternalChangeDetected => {
            Some(Command::Store(StoreCommand::Reload))
        }
        Action::CommandsLoaded(commands, focus) => {
            let changed = state.commands != *commands;
            state.set_commands(commands.clone());
            if let Some(idx) = focus {
                state.panel.focus_command(*idx);
            }
            // Indices may have shifted under a pending confirmation.
            if changed && state.mode == AppMode::ConfirmDelete {
                state.pending_delete = None;
                state.mode = AppMode::Normal;
            }
            None
        }
        _ => return UpdateResult::NotHandled,
    };
    UpdateResult::Handled(command)
}

fn submit_form(state: &mut AppState) -> Option<Command> {
    let form = state.form.as_ref()?;
    match form.to_definition() {
        Ok(definition) => {
            let op = match form.editing {
                Some(idx) => StoreCommand::Update(idx, definition),
                None => StoreCommand::Add(definition),
            };
            state.form = None;
            state.mode = AppMode::Normal;
            Some(Command::Store(op))
        }
        Err(msg) => {
            state.set_error(ErrorState::warning(msg));
            None
        }
    }
}

/// Apply a mutation to the store and persist it.
///
/// The in-memory change is kept even when saving fails; the failure is
/// reported alongside the refreshed snapshot.
pub fn apply(store: &mut CommandStore, op: StoreCommand) -> Vec<Action> {
    let outcome = match op {
        StoreCommand::Add(definition) => {
            let message = format!("Added {}", definition.name);
            store.add(definition);
            Ok((message, store.len().checked_sub(1)))
        }
        StoreCommand::Update(idx, definition) => {
            let message = format!("Updated {}", definition.name);
            store.update(idx, definition).map(|()| (message, Some(idx)))
        }
        StoreCommand::Remove(idx) => store.remove(idx).map(|removed| {
            let focus = store.len().checked_sub(1).map(|last| idx.min(last));
            (format!("Removed {}", removed.name), focus)
        }),
        StoreCommand::Move { index, up } => {
            let moved = if up {
                store.move_up(index)
            } else {
                store.move_down(index)
            };
            moved.map(|new_index| (String::from("Reordered commands"), Some(new_index)))
        }
        StoreCommand::Reload if store.has_unsaved_changes() => {
            tracing::warn!(path = %store.path().display(), "file changed on disk with unsaved edits pending");
            return vec![Action::WarningOccurred(format!(
                "{} changed on disk. Keeping the unsaved edits in memory.",
                store.path().display()
            ))];
        }
        StoreCommand::Reload => {
            return match store.reload() {
                Ok(()) => {
                    tracing::info!(path = %store.path().display(), count = store.len(), "commands reloaded");
                    vec![Action::CommandsLoaded(store.snapshot(), None)]
                }
                Err(e) => vec![Action::ErrorOccurred(e.to_string())],
            };
        }
    };

    match outcome {
        Ok((message, focus)) => {
            let saved = match store.save() {
                Ok(()) => Ok(message),
                Err(e) => Err(format!("{message}, but it was not saved: {e}")),
            };
            vec![
                Action::CommandsLoaded(store.snapshot(), focus),
                Action::OperationCompleted(saved),
            ]
        }
        Err(e) => vec![Action::ErrorOccurred(e.to_string())],
    }
}

/// Read the template library off the runtime and report it back.
pub fn load_templates_in_background(path: PathBuf, tx: mpsc::Sender<Action>) {
    tokio::task::spawn_blocking(move || {
        let action = match load_templates(&path) {
            Ok(categories) => Action::TemplatesLoaded(categories),
            Err(e) => Action::ErrorOccurred(e.to_string()),
        };
        let _ = tx.blocking_send(action);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CommandDefinition, CommandKind};
    use crate::infrastructure::templates::{TemplateCategory, TemplateEntry};
    use crate::theme::PaletteType;

    fn definitions() -> Vec<CommandDefinition> {
        vec![
            CommandDefinition::new("A", "echo a", CommandKind::Normal),
            CommandDefinition::new("B", "echo b", CommandKind::Normal),
            CommandDefinition::new("C", "echo c", CommandKind::Normal),
        ]
    }

    fn store_in(dir: &tempfile::TempDir) -> CommandStore {
        let mut store = CommandStore::with_defaults(dir.path().join("commands.json"));
        while !store.is_empty() {
            store.remove(0).unwrap();
        }
        for d in definitions() {
            store.add(d);
        }
        store
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut state = AppState::new(definitions(), PaletteType::default());
        state.panel.list_state.select(Some(1));

        assert!(matches!(update(&mut state, &Action::DeleteCommandIntent), UpdateResult::Handled(None)));
        assert_eq!(state.mode, AppMode::ConfirmDelete);

        match update(&mut state, &Action::ConfirmDelete) {
            UpdateResult::Handled(Some(Command::Store(StoreCommand::Remove(1)))) => {}
            other => panic!("Expected Remove(1), got {other:?}"),
        }
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn test_form_submit_adds_or_updates() {
        let mut state = AppState::new(definitions(), PaletteType::default());
        update(&mut state, &Action::AddCommandIntent);
        // Empty form is rejected and stays open
        assert!(matches!(update(&mut state, &Action::SubmitInput), UpdateResult::Handled(None)));
        assert_eq!(state.mode, AppMode::CommandForm);

        let form = state.form.as_mut().unwrap();
        form.name.insert_str("Reboot");
        form.template.insert_str("hdc target boot");
        match update(&mut state, &Action::SubmitInput) {
            UpdateResult::Handled(Some(Command::Store(StoreCommand::Add(def)))) => {
                assert_eq!(def.name, "Reboot");
            }
            other => panic!("Expected Add, got {other:?}"),
        }

        state.last_error = None;
        state.panel.list_state.select(Some(2));
        update(&mut state, &Action::EditCommandIntent);
        match update(&mut state, &Action::SubmitInput) {
            UpdateResult::Handled(Some(Command::Store(StoreCommand::Update(2, def)))) => {
                assert_eq!(def.name, "C");
            }
            other => panic!("Expected Update(2), got {other:?}"),
        }
    }

    #[test]
    fn test_template_select_appends() {
        let mut state = AppState::new(definitions(), PaletteType::default());
        let cmd = update(&mut state, &Action::OpenTemplates);
        assert!(matches!(cmd, UpdateResult::Handled(Some(Command::LoadTemplates))));

        update(
            &mut state,
            &Action::TemplatesLoaded(vec![TemplateCategory {
                category: "Apps".to_string(),
                templates: vec![TemplateEntry {
                    name: "Install App".to_string(),
                    command: "hdc install {local_path}".to_string(),
                    kind: CommandKind::Upload,
                    description: String::new(),
                }],
            }]),
        );
        match update(&mut state, &Action::TemplateSelect) {
            UpdateResult::Handled(Some(Command::Store(StoreCommand::Add(def)))) => {
                assert_eq!(def.icon, "upload");
            }
            other => panic!("Expected Add, got {other:?}"),
        }
        assert!(state.templates.is_none());
    }

    #[test]
    fn test_apply_persists_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let actions = apply(&mut store, StoreCommand::Move { index: 2, up: true });
        assert_eq!(actions.len(), 2);
        match &actions[0] {
            Action::CommandsLoaded(commands, Some(1)) => assert_eq!(commands[1].name, "C"),
            other => panic!("Expected CommandsLoaded, got {other:?}"),
        }
        assert!(matches!(actions[1], Action::OperationCompleted(Ok(_))));

        let reloaded = CommandStore::load(dir.path().join("commands.json")).unwrap();
        assert_eq!(reloaded.commands()[1].name, "C");

        let actions = apply(&mut store, StoreCommand::Remove(2));
        assert!(matches!(actions[0], Action::CommandsLoaded(_, Some(1))));

        let actions = apply(&mut store, StoreCommand::Remove(9));
        assert!(matches!(actions[0], Action::ErrorOccurred(_)));
    }

    #[test]
    fn test_reload_replaces_list_or_keeps_it_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.save().unwrap();

        let mut edited = CommandStore::with_defaults(store.path());
        while !edited.is_empty() {
            edited.remove(0).unwrap();
        }
        edited.add(CommandDefinition::new("Only", "echo only", CommandKind::Normal));
        edited.save().unwrap();

        match apply(&mut store, StoreCommand::Reload).as_slice() {
            [Action::CommandsLoaded(commands, None)] => {
                assert_eq!(commands.len(), 1);
                assert_eq!(commands[0].name, "Only");
            }
            other => panic!("Expected CommandsLoaded, got {other:?}"),
        }

        std::fs::write(store.path(), "{ not json").unwrap();
        let actions = apply(&mut store, StoreCommand::Reload);
        assert!(matches!(actions.as_slice(), [Action::ErrorOccurred(_)]));
        assert_eq!(store.len(), 1);
        assert_eq!(store.commands()[0].name, "Only");
    }

    #[test]
    fn test_failed_save_keeps_edit_and_holds_off_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.json");
        // A non-empty directory in place of the file makes the rename fail.
        std::fs::create_dir_all(path.join("blocker")).unwrap();
        let mut store = CommandStore::with_defaults(&path);
        let before = store.len();

        let actions = apply(
            &mut store,
            StoreCommand::Add(CommandDefinition::new("Extra", "echo extra", CommandKind::Normal)),
        );
        match actions.as_slice() {
            [Action::CommandsLoaded(commands, Some(focus)), Action::OperationCompleted(Err(msg))] => {
                assert_eq!(commands.len(), before + 1);
                assert_eq!(*focus, before);
                assert!(msg.contains("Added Extra, but it was not saved"));
            }
            other => panic!("Expected snapshot and save failure, got {other:?}"),
        }
        assert!(store.has_unsaved_changes());

        let actions = apply(&mut store, StoreCommand::Reload);
        assert!(matches!(actions.as_slice(), [Action::WarningOccurred(_)]));
        assert_eq!(store.len(), before + 1);
        assert_eq!(store.commands()[before].name, "Extra");
    }

    #[test]
    fn test_reload_cancels_pending_delete_only_when_list_changed() {
        let mut state = AppState::new(definitions(), PaletteType::default());
        state.panel.list_state.select(Some(1));
        update(&mut state, &Action::DeleteCommandIntent);

        update(&mut state, &Action::CommandsLoaded(definitions(), None));
        assert_eq!(state.mode, AppMode::ConfirmDelete);
        assert_eq!(state.pending_delete, Some(1));

        let mut changed = definitions();
        changed.remove(0);
        update(&mut state, &Action::CommandsLoaded(changed, None));
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(state.pending_delete, None);
    }
}
