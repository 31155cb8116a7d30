use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState, ErrorState, InputState, OutputKind, PromptState, RunningCommand},
};
use crate::domain::models::{CommandDefinition, CommandKind, Completion, ExecEvent, TERMINATED_CODE};
use crate::domain::placeholder::{
    default_download_path, prompts_for, quote_value, resolve, Placeholder, PlaceholderValues,
    PromptMode, ReservedPlaceholder, TIMESTAMP_FORMAT,
};
use crate::domain::runner::CommandRunner;
use anyhow::Result;
use chrono::Local;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::RunSelected => UpdateResult::Handled(start_run(state)),
        Action::SubmitInput if state.mode == AppMode::Prompt => {
            UpdateResult::Handled(submit_prompt(state))
        }
        Action::OutputReceived(line) => {
            state.output.push_line(line.clone());
            UpdateResult::Handled(None)
        }
        Action::ExecutionFinished(completion) => {
            finish_run(state, completion);
            UpdateResult::Handled(None)
        }
        Action::ExecutionRejected(reason) => {
            state.running = None;
            state.output.push(OutputKind::Warning, reason.clone());
            state.set_error(ErrorState::warning(reason.clone()));
            UpdateResult::Handled(None)
        }
        Action::ClearOutput => {
            state.output.clear();
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn start_run(state: &mut AppState) -> Option<Command> {
    if let Some(running) = &state.running {
        let message = format!("\"{}\" is already running", running.name);
        state.set_error(ErrorState::warning(message));
        return None;
    }

    let definition = state.selected_definition()?.clone();
    let placeholders = prompts_for(&definition.template, definition.kind);
    if placeholders.is_empty() {
        return execute(state, &definition, &PlaceholderValues::new());
    }

    let prompt = PromptState::new(definition, placeholders);
    state.input = prompt.spec().map(|spec| InputState::for_prompt(spec.mode));
    state.prompt = Some(prompt);
    state.mode = AppMode::Prompt;
    None
}

// Upload paths and the download source are required; leaving one empty
// abandons the run.
fn cancels_when_empty(kind: CommandKind, placeholder: &Placeholder) -> bool {
    use ReservedPlaceholder::{LocalPath, RemotePath};
    matches!(
        (kind, placeholder),
        (CommandKind::Upload, Placeholder::Reserved(LocalPath | RemotePath))
            | (CommandKind::Download, Placeholder::Reserved(RemotePath))
    )
}

fn submit_prompt(state: &mut AppState) -> Option<Command> {
    let value = state
        .input
        .as_ref()
        .map(|i| i.text_area.value().trim().to_string())
        .unwrap_or_default();

    let (kind, current, remote) = {
        let prompt = state.prompt.as_ref()?;
        let remote = prompt
            .values
            .get_reserved(ReservedPlaceholder::RemotePath)
            .map(str::to_string);
        (prompt.definition.kind, prompt.current()?.clone(), remote)
    };

    let value = match current.prompt(kind).mode {
        PromptMode::SavePath if value.is_empty() => {
            let path = default_download_path(remote.as_deref().unwrap_or(""), &state.working_dir);
            path.display().to_string()
        }
        PromptMode::OpenPath if !value.is_empty() && !local_file_exists(state, &value) => {
            state.set_error(ErrorState::warning(format!("File not found: {value}")));
            return None;
        }
        _ if value.is_empty() && cancels_when_empty(kind, &current) => {
            cancel_prompt(state);
            return None;
        }
        _ => value,
    };

    match (kind, &current) {
        (CommandKind::Upload, Placeholder::Reserved(ReservedPlaceholder::LocalPath)) => {
            state.output.push(OutputKind::Info, format!("Selected file: {value}"));
        }
        (CommandKind::Download, Placeholder::Reserved(ReservedPlaceholder::LocalPath)) => {
            state.output.push(OutputKind::Info, format!("Saving to: {value}"));
        }
        _ => {}
    }

    let prompt = state.prompt.as_mut()?;
    if !prompt.accept(quote_value(&value)) {
        state.input = prompt.spec().map(|spec| InputState::for_prompt(spec.mode));
        return None;
    }

    let prompt = state.prompt.take()?;
    state.input = None;
    state.mode = AppMode::Normal;
    execute(state, &prompt.definition, &prompt.values)
}

// A quoted path is checked without its quotes and passed on as typed.
fn local_file_exists(state: &AppState, value: &str) -> bool {
    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    state.working_dir.join(unquoted).is_file()
}

/// Abandon the prompt sequence without running anything.
pub fn cancel_prompt(state: &mut AppState) {
    if let Some(prompt) = state.prompt.take() {
        state
            .output
            .push(OutputKind::Info, format!("Cancelled {}", prompt.definition.name));
    }
    state.input = None;
    state.mode = AppMode::Normal;
}

fn execute(
    state: &mut AppState,
    definition: &CommandDefinition,
    values: &PlaceholderValues,
) -> Option<Command> {
    let now = Local::now();
    let command_line = match resolve(&definition.template, definition.kind, values, now.naive_local()) {
        Ok(line) => line,
        Err(e) => {
            state.set_error(ErrorState::warning(e.to_string()));
            return None;
        }
    };

    if definition.kind == CommandKind::Screenshot {
        state.output.push(
            OutputKind::Info,
            format!("Screenshot timestamp: {}", now.format(TIMESTAMP_FORMAT)),
        );
    }
    state.output.push(OutputKind::Command, format!("$ {command_line}"));
    state.output.scroll = 0;
    state.running = Some(RunningCommand {
        name: definition.name.clone(),
        started: Instant::now(),
    });
    state.set_status(format!("Running {}", definition.name));

    Some(Command::Execute {
        name: definition.name.clone(),
        command_line,
    })
}

fn finish_run(state: &mut AppState, completion: &Completion) {
    let (name, elapsed) = state
        .running
        .take()
        .map_or((String::from("command"), 0.0), |r| {
            (r.name, r.started.elapsed().as_secs_f64())
        });

    match completion.check(&state.shell_program) {
        Ok(()) => {
            state.output.push(
                OutputKind::Success,
                format!("✔ {name} finished in {elapsed:.1}s"),
            );
            state.set_status(format!("{name} finished"));
        }
        Err(_) if completion.exit_code == TERMINATED_CODE => {
            state
                .output
                .push(OutputKind::Warning, format!("{name} was terminated by a signal"));
            state.set_status(format!("{name} terminated"));
        }
        Err(e) if e.is_warning() => {
            state.output.push(OutputKind::Warning, format!("{name}: {e}"));
            state.set_status(format!("{name} exited with status {}", completion.exit_code));
        }
        Err(e) => {
            state.output.push(OutputKind::Error, e.to_string());
            state.set_error(ErrorState::error(e.to_string()));
        }
    }
}

/// Start the command and forward its events to the loop.
pub fn handle_command(
    command: Command,
    runner: Arc<dyn CommandRunner>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    if let Command::Execute { name, command_line } = command {
        tokio::spawn(async move {
            tracing::info!(%name, command = %command_line, "executing");
            let mut stream = match runner.start(&command_line) {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!(%name, error = %e, "execution rejected");
                    let _ = tx.send(Action::ExecutionRejected(e.to_string())).await;
                    return;
                }
            };

            while let Some(event) = stream.next().await {
                let action = match event {
                    ExecEvent::Output(line) => Action::OutputReceived(line),
                    ExecEvent::Finished(completion) => {
                        if completion.is_spawn_failure() {
                            tracing::warn!(%name, error = ?completion.spawn_error, "shell could not be started");
                        } else {
                            tracing::info!(
                                %name,
                                exit_code = completion.exit_code,
                                success = completion.is_success(),
                                "execution finished"
                            );
                        }
                        Action::ExecutionFinished(completion)
                    }
                };
                if tx.send(action).await.is_err() {
                    break;
                }
            }
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::OutputLine;
    use crate::domain::runner::MockCommandRunner;
    use crate::error::PanelError;
    use crate::theme::PaletteType;
    use futures::stream;

    fn state_with(definition: CommandDefinition) -> AppState<'static> {
        let mut state = AppState::new(vec![definition], PaletteType::default());
        state.working_dir = std::path::PathBuf::from("/work");
        state
    }

    fn type_and_submit(state: &mut AppState, text: &str) -> Option<Command> {
        if let Some(input) = &mut state.input {
            input.text_area.insert_str(text);
        }
        match update(state, &Action::SubmitInput) {
            UpdateResult::Handled(cmd) => cmd,
            UpdateResult::NotHandled => panic!("SubmitInput not handled in prompt mode"),
        }
    }

    fn run(state: &mut AppState) -> Option<Command> {
        match update(state, &Action::RunSelected) {
            UpdateResult::Handled(cmd) => cmd,
            UpdateResult::NotHandled => None,
        }
    }

    #[test]
    fn test_command_without_placeholders_runs_immediately() {
        let mut state = state_with(CommandDefinition::new(
            "Device List",
            "hdc list targets",
            CommandKind::Normal,
        ));
        let cmd = run(&mut state);
        assert_eq!(
            cmd,
            Some(Command::Execute {
                name: "Device List".to_string(),
                command_line: "hdc list targets".to_string(),
            })
        );
        assert!(state.running.is_some());
        assert_eq!(state.output.entries.back().unwrap().kind, OutputKind::Command);
    }

    #[test]
    fn test_second_run_is_rejected_while_running() {
        let mut state = state_with(CommandDefinition::new("Device List", "hdc list targets", CommandKind::Normal));
        assert!(run(&mut state).is_some());
        assert!(run(&mut state).is_none());
        let err = state.last_error.as_ref().unwrap();
        assert!(err.message.contains("already running"));
    }

    #[test]
    fn test_download_prompts_remote_first_and_defaults_destination() {
        let mut state = state_with(CommandDefinition::new(
            "Download File",
            "hdc file recv {remote_path} {local_path}",
            CommandKind::Download,
        ));
        assert!(run(&mut state).is_none());
        assert_eq!(state.mode, AppMode::Prompt);
        assert_eq!(
            state.prompt.as_ref().unwrap().current(),
            Some(&Placeholder::Reserved(ReservedPlaceholder::RemotePath))
        );

        assert!(type_and_submit(&mut state, "/data/log/hilog.txt").is_none());
        let cmd = type_and_submit(&mut state, "");
        assert_eq!(
            cmd,
            Some(Command::Execute {
                name: "Download File".to_string(),
                command_line: "hdc file recv \"/data/log/hilog.txt\" \"/work/hilog.txt\"".to_string(),
            })
        );
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn test_empty_upload_path_cancels() {
        let mut state = state_with(CommandDefinition::new(
            "Upload File",
            "hdc file send {local_path} {remote_path}",
            CommandKind::Upload,
        ));
        run(&mut state);
        assert!(type_and_submit(&mut state, "   ").is_none());
        assert_eq!(state.mode, AppMode::Normal);
        assert!(state.prompt.is_none());
        assert!(state.running.is_none());
        assert!(state.output.entries.back().unwrap().text.starts_with("Cancelled"));
    }

    #[test]
    fn test_missing_upload_file_reprompts() {
        let mut state = state_with(CommandDefinition::new(
            "Upload File",
            "hdc file send {local_path} {remote_path}",
            CommandKind::Upload,
        ));
        run(&mut state);
        assert!(type_and_submit(&mut state, "/definitely/not/here.bin").is_none());
        assert_eq!(state.mode, AppMode::Prompt);
        assert_eq!(state.prompt.as_ref().unwrap().step, 0);
        assert!(state.last_error.is_some());
    }

    #[test]
    fn test_quoted_upload_path_with_spaces_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("my file.bin");
        std::fs::write(&file, b"payload").unwrap();

        let mut state = state_with(CommandDefinition::new(
            "Upload File",
            "hdc file send {local_path} {remote_path}",
            CommandKind::Upload,
        ));
        run(&mut state);
        let quoted = format!("\"{}\"", file.display());
        assert!(type_and_submit(&mut state, &quoted).is_none());
        assert!(state.last_error.is_none());
        assert_eq!(state.prompt.as_ref().unwrap().step, 1);

        let cmd = type_and_submit(&mut state, "/data/local/tmp");
        assert_eq!(
            cmd,
            Some(Command::Execute {
                name: "Upload File".to_string(),
                command_line: format!("hdc file send {quoted} \"/data/local/tmp\""),
            })
        );
    }

    #[test]
    fn test_custom_values_are_quoted() {
        let mut state = state_with(CommandDefinition::new(
            "Uninstall App",
            "hdc uninstall {package_name}",
            CommandKind::Normal,
        ));
        run(&mut state);
        let cmd = type_and_submit(&mut state, "com.example.app");
        assert_eq!(
            cmd,
            Some(Command::Execute {
                name: "Uninstall App".to_string(),
                command_line: "hdc uninstall \"com.example.app\"".to_string(),
            })
        );
    }

    #[test]
    fn test_screenshot_needs_no_prompt() {
        let mut state = state_with(CommandDefinition::new(
            "Screenshot",
            "hdc shell snapshot_display -f /data/local/tmp/screenshot_{timestamp}.jpeg",
            CommandKind::Screenshot,
        ));
        match run(&mut state) {
            Some(Command::Execute { command_line, .. }) => {
                assert!(!command_line.contains("{timestamp}"));
            }
            other => panic!("Expected Execute, got {other:?}"),
        }
    }

    #[test]
    fn test_completion_outcomes() {
        let mut state = state_with(CommandDefinition::new("Device List", "hdc list targets", CommandKind::Normal));
        run(&mut state);
        update(&mut state, &Action::OutputReceived(OutputLine::stderr("[Fail]")));
        update(&mut state, &Action::ExecutionFinished(Completion::exited(1)));
        assert!(state.running.is_none());
        assert!(state.last_error.is_none());
        assert_eq!(state.output.entries.back().unwrap().kind, OutputKind::Warning);

        run(&mut state);
        update(
            &mut state,
            &Action::ExecutionFinished(Completion::spawn_failed("No such file or directory")),
        );
        assert_eq!(state.output.entries.back().unwrap().kind, OutputKind::Error);
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn test_handle_command_forwards_events() {
        let mut mock = MockCommandRunner::new();
        mock.expect_start()
            .withf(|command: &str| command == "hdc list targets")
            .returning(|_| {
                Ok(stream::iter(vec![
                    ExecEvent::Output(OutputLine::stdout("device-1")),
                    ExecEvent::Finished(Completion::exited(0)),
                ])
                .boxed())
            });

        let (tx, mut rx) = mpsc::channel(4);
        handle_command(
            Command::Execute {
                name: "Device List".to_string(),
                command_line: "hdc list targets".to_string(),
            },
            Arc::new(mock),
            tx,
        )
        .unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            Action::OutputReceived(OutputLine::stdout("device-1"))
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            Action::ExecutionFinished(Completion::exited(0))
        );
    }

    #[tokio::test]
    async fn test_handle_command_reports_busy_runner() {
        let mut mock = MockCommandRunner::new();
        mock.expect_start().returning(|_| Err(PanelError::Busy));

        let (tx, mut rx) = mpsc::channel(1);
        handle_command(
            Command::Execute {
                name: "Device List".to_string(),
                command_line: "hdc list targets".to_string(),
            },
            Arc::new(mock),
            tx,
        )
        .unwrap();

        match rx.recv().await.unwrap() {
            Action::ExecutionRejected(msg) => assert!(msg.contains("already running")),
            other => panic!("Expected ExecutionRejected, got {other:?}"),
        }
    }
}
