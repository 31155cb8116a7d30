use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use cmdpanel::app::{
    persistence::load_ui_settings,
    r#loop::run_loop,
    state::{AppState, ErrorState},
};
use cmdpanel::config::AppConfig;
use cmdpanel::domain::runner::CommandRunner;
use cmdpanel::infrastructure::{executor::ShellExecutor, store::CommandStore};
use cmdpanel::logging;

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    // Everything that can fail hard happens BEFORE terminal setup so the
    // terminal is never left in raw mode.
    let (config, paths) = AppConfig::load()?;
    logging::init(&paths.log, config.log_filter.as_deref())?;
    tracing::info!(config_dir = %paths.config_dir.display(), "starting cmdpanel");

    // A broken command file must not take the panel down; run on the
    // defaults and say so. Nothing is written until the user edits.
    let (store, load_error) = match CommandStore::load(&paths.commands) {
        Ok(store) => (store, None),
        Err(e) => {
            tracing::error!(error = %e, "command list unreadable, using defaults");
            (CommandStore::with_defaults(&paths.commands), Some(e))
        }
    };

    let runner: Arc<dyn CommandRunner> = Arc::new(ShellExecutor::new(config.shell.clone()));
    let settings = load_ui_settings(&paths.ui_settings);

    let mut app_state = AppState::new(store.snapshot(), settings.theme);
    app_state.shell_program = runner.shell_program();
    if let Some(e) = load_error {
        app_state.set_error(ErrorState::warning(format!(
            "{e}. Using the built-in commands for this session."
        )));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, store, runner, paths).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "event loop failed");
        println!("{err:?}");
    }

    Ok(())
}
