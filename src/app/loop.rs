use crate::app::{
    action::Action,
    command::Command,
    features::{manager, panel, ui as ui_feature},
    input::map_event_to_action,
    reducer,
    state::AppState,
    ui,
};
use crate::config::AppPaths;
use crate::domain::runner::CommandRunner;
use crate::infrastructure::store::CommandStore;

use anyhow::Result;
use crossterm::event::{self, Event};
use notify::{RecursiveMode, Watcher};
use ratatui::{backend::Backend, Terminal};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);
const DEBOUNCE: Duration = Duration::from_millis(500);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    store: CommandStore,
    runner: Arc<dyn CommandRunner>,
    paths: AppPaths,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, store, runner, paths, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    mut store: CommandStore,
    runner: Arc<dyn CommandRunner>,
    paths: AppPaths,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // Commands file watcher. Kept alive for the whole loop.
    let _watcher = watch_commands_file(store.path(), action_tx.clone())?;

    let mut queue = VecDeque::new();

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = res?;
                map_event_to_action(event, &app_state, terminal.size()?)
            },

            // Async Results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update (Reducer) ---
        // Store results feed straight back into the reducer, in order, before
        // the next frame.
        queue.extend(action);
        while let Some(action) = queue.pop_front() {
            if action == Action::Quit {
                return Ok(());
            }

            let command = reducer::update(&mut app_state, action);

            if app_state.should_quit {
                return Ok(());
            }

            match command {
                Some(Command::Store(op)) => queue.extend(manager::apply(&mut store, op)),
                Some(cmd) => handle_command(cmd, runner.clone(), &paths, action_tx.clone())?,
                None => {}
            }
        }
    }
}

pub(crate) fn handle_command(
    command: Command,
    runner: Arc<dyn CommandRunner>,
    paths: &AppPaths,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::Execute { .. } => panel::handle_command(command, runner, tx)?,
        Command::LoadTemplates => manager::load_templates_in_background(paths.templates.clone(), tx),
        Command::SaveSettings(palette) => {
            ui_feature::save_settings_in_background(paths.ui_settings.clone(), palette, tx);
        }
        Command::Store(op) => {
            tracing::warn!(?op, "store command outside the runtime loop");
        }
    }
    Ok(())
}

/// Watch the directory holding `path` and report debounced changes to the
/// file itself as `ExternalChangeDetected`. Returns `None` when the directory
/// does not exist yet.
fn watch_commands_file(
    path: &Path,
    action_tx: mpsc::Sender<Action>,
) -> Result<Option<notify::RecommendedWatcher>> {
    let Some(dir) = path.parent().filter(|d| d.is_dir()) else {
        return Ok(None);
    };
    let file_name = path.file_name().map(ToOwned::to_owned);

    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let touches_file = event
                .paths
                .iter()
                .any(|p| p.file_name().map(ToOwned::to_owned) == file_name);
            if touches_file {
                let _ = notify_tx.try_send(());
            }
        }
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;

    tokio::spawn(async move {
        let mut pending = false;

        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(DEBOUNCE) => {
                        tracing::debug!("commands file changed on disk");
                        let _ = action_tx.send(Action::ExternalChangeDetected).await;
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    Ok(Some(watcher))
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
