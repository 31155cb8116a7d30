use crate::domain::models::CommandDefinition;
use crate::infrastructure::store::filter_indices;
use ratatui::widgets::ListState;

/// Selection and filter over the command list. `visible` holds indices into
/// the command snapshot; the list selection indexes `visible`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    pub list_state: ListState,
    pub visible: Vec<usize>,
    pub filter: String,
}

impl PanelState {
    pub fn selected_command(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|i| self.visible.get(i).copied())
    }

    /// Recompute `visible` for `commands`, keeping the selection in range.
    pub fn refresh(&mut self, commands: &[CommandDefinition]) {
        self.visible = filter_indices(commands, &self.filter);

        let selected = match (self.list_state.selected(), self.visible.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);
    }

    /// Select the row showing command `index`, if it is visible.
    pub fn focus_command(&mut self, index: usize) {
        if let Some(row) = self.visible.iter().position(|i| *i == index) {
            self.list_state.select(Some(row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CommandKind;

    fn commands() -> Vec<CommandDefinition> {
        vec![
            CommandDefinition::new("Device List", "hdc list targets", CommandKind::Normal),
            CommandDefinition::new("Upload File", "hdc file send {local_path} {remote_path}", CommandKind::Upload),
            CommandDefinition::new("Reboot", "hdc target boot", CommandKind::Normal),
        ]
    }

    #[test]
    fn test_refresh_filters_and_clamps() {
        let mut panel = PanelState::default();
        panel.refresh(&commands());
        assert_eq!(panel.visible, vec![0, 1, 2]);
        assert_eq!(panel.list_state.selected(), Some(0));

        panel.list_state.select(Some(2));
        panel.filter = "FILE".to_string();
        panel.refresh(&commands());
        assert_eq!(panel.visible, vec![1]);
        assert_eq!(panel.selected_command(), Some(1));

        panel.filter = "nothing matches".to_string();
        panel.refresh(&commands());
        assert!(panel.visible.is_empty());
        assert_eq!(panel.selected_command(), None);
    }

    #[test]
    fn test_refresh_agrees_with_store_filter() {
        let mut store = crate::infrastructure::store::CommandStore::with_defaults("unused.json");
        let mut panel = PanelState::default();
        for keyword in ["", "  FILE ", "hdc shell", "zzz"] {
            panel.filter = keyword.to_string();
            panel.refresh(store.commands());
            assert_eq!(panel.visible, store.filter(keyword));
        }
        store.add(CommandDefinition::new("Reboot", "hdc target boot", CommandKind::Normal));
        panel.filter = "reboot".to_string();
        panel.refresh(store.commands());
        assert_eq!(panel.visible, vec![store.len() - 1]);
    }

    #[test]
    fn test_focus_command() {
        let mut panel = PanelState::default();
        panel.refresh(&commands());
        panel.focus_command(2);
        assert_eq!(panel.selected_command(), Some(2));
    }
}
