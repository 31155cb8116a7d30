use crate::app::state::{AppMode, AppState};
use crate::components::command_panel::{CommandDetail, CommandPanel};
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modals::ModalManager;
use crate::components::output_view::OutputView;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};

/// Rows given to the selected command's template and description.
pub const DETAIL_HEIGHT: u16 = 5;

pub struct AppLayout {
    pub main: Vec<Rect>,
    /// Panel on the left, output on the right.
    pub body: Vec<Rect>,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area)
        .to_vec();

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main[1])
        .to_vec();

    AppLayout { main, body }
}

fn titled_block<'a>(title: &'a str, focused: bool, app_state: &AppState) -> Block<'a> {
    let theme = &app_state.theme;
    let (border, title_style) = if focused {
        (theme.border_focus, theme.header_active)
    } else {
        (theme.border, theme.header_item)
    };
    Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(title, title_style),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
}

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let layout = get_layout(area);

    // --- Header ---
    f.render_widget(
        Header {
            state: app_state,
            theme: &app_state.theme,
            terminal_width: area.width,
        },
        layout.main[0],
    );

    // --- Left: Command Panel ---
    let panel_focused = matches!(app_state.mode, AppMode::Normal | AppMode::FilterInput);
    let panel_area = layout.body[0];
    if panel_area.width > 0 && panel_area.height > 0 {
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(DETAIL_HEIGHT)])
            .split(panel_area);

        let list_block = titled_block("COMMANDS", panel_focused, app_state);
        let list_inner = list_block.inner(sections[0]);
        f.render_widget(list_block, sections[0]);
        f.render_stateful_widget(
            CommandPanel {
                commands: &app_state.commands,
                visible: &app_state.panel.visible,
                theme: &app_state.theme,
                running: app_state.running.is_some(),
            },
            list_inner,
            &mut app_state.panel.list_state,
        );

        let detail_block = titled_block("DETAILS", false, app_state);
        let detail_inner = detail_block.inner(sections[1]);
        f.render_widget(detail_block, sections[1]);
        f.render_widget(
            CommandDetail {
                definition: app_state.selected_definition(),
                theme: &app_state.theme,
            },
            detail_inner,
        );
    }

    // --- Right: Output ---
    let output_area = layout.body[1];
    if output_area.width > 0 && output_area.height > 0 {
        let title = if app_state.output.scroll > 0 {
            "OUTPUT (scrolled)"
        } else {
            "OUTPUT"
        };
        let output_block = titled_block(title, app_state.running.is_some(), app_state);
        let output_inner = output_block.inner(output_area);
        f.render_widget(output_block, output_area);
        f.render_widget(
            OutputView {
                output: &app_state.output,
                theme: &app_state.theme,
            },
            output_inner,
        );
    }

    // --- Footer ---
    f.render_widget(
        Footer {
            state: app_state,
            theme: &app_state.theme,
        },
        layout.main[2],
    );

    // --- Modals ---
    f.render_widget(
        ModalManager {
            theme: &app_state.theme,
            app_state,
        },
        area,
    );
}
