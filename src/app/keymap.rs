use super::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Bindings for the panel in normal mode. Modal keys live in `input.rs`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    pub global: HashMap<KeyEvent, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut global = HashMap::new();

        // --- Navigation ---
        global.insert(ch('j'), Action::SelectNext);
        global.insert(key(KeyCode::Down), Action::SelectNext);
        global.insert(ch('k'), Action::SelectPrev);
        global.insert(key(KeyCode::Up), Action::SelectPrev);
        global.insert(ch('g'), Action::SelectFirst);
        global.insert(key(KeyCode::Home), Action::SelectFirst);
        global.insert(ch('G'), Action::SelectLast);
        global.insert(key(KeyCode::End), Action::SelectLast);
        global.insert(key(KeyCode::PageUp), Action::ScrollOutputUp(10));
        global.insert(key(KeyCode::PageDown), Action::ScrollOutputDown(10));
        global.insert(ch('b'), Action::ScrollOutputBottom);

        // --- Panel ---
        global.insert(key(KeyCode::Enter), Action::RunSelected);
        global.insert(ch('c'), Action::ClearOutput);
        global.insert(ch('r'), Action::ReloadCommands);
        global.insert(ch('/'), Action::EnterFilterMode);
        global.insert(ch('C'), Action::ClearFilter);

        // --- Management ---
        global.insert(ch('a'), Action::AddCommandIntent);
        global.insert(ch('e'), Action::EditCommandIntent);
        global.insert(ch('d'), Action::DeleteCommandIntent);
        global.insert(key(KeyCode::Delete), Action::DeleteCommandIntent);
        global.insert(ch('K'), Action::MoveCommandUp);
        global.insert(ch('J'), Action::MoveCommandDown);
        global.insert(ch('t'), Action::OpenTemplates);

        // --- General ---
        global.insert(ch('T'), Action::EnterThemeSelection);
        global.insert(ch('?'), Action::ToggleHelp);
        global.insert(ch('q'), Action::Quit);
        global.insert(key(KeyCode::Esc), Action::CancelMode);

        Self { global }
    }
}

impl KeyMap {
    pub fn get_action(&self, event: KeyEvent) -> Option<Action> {
        self.global.get(&normalize(event)).cloned()
    }
}

// Terminals report `K` as Char('K') with SHIFT; the map stores it without.
fn normalize(event: KeyEvent) -> KeyEvent {
    let modifiers = match event.code {
        KeyCode::Char(_) => event.modifiers.difference(KeyModifiers::SHIFT),
        _ => event.modifiers,
    };
    KeyEvent::new(event.code, modifiers)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ch(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}
