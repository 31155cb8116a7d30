//! The persisted, ordered list of command definitions.

use crate::domain::models::{CommandDefinition, CommandKind};
use crate::error::{PanelError, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CommandDocument {
    commands: Vec<CommandDefinition>,
}

/// On-disk shapes accepted by `load`. Older files were a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCommands {
    Document(CommandDocument),
    Legacy(Vec<CommandDefinition>),
}

impl StoredCommands {
    fn into_commands(self) -> Vec<CommandDefinition> {
        match self {
            StoredCommands::Document(doc) => doc.commands,
            StoredCommands::Legacy(commands) => commands,
        }
    }
}

#[must_use]
pub fn default_commands() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("Device List", "hdc list targets", CommandKind::Normal)
            .with_icon("device"),
        CommandDefinition::new(
            "Device Info",
            "hdc shell param get const.product.model",
            CommandKind::Normal,
        )
        .with_icon("info"),
        CommandDefinition::new(
            "Upload File",
            "hdc file send {local_path} {remote_path}",
            CommandKind::Upload,
        ),
        CommandDefinition::new(
            "Download File",
            "hdc file recv {remote_path} {local_path}",
            CommandKind::Download,
        ),
        CommandDefinition::new("Install App", "hdc install {local_path}", CommandKind::Upload)
            .with_icon("install"),
        CommandDefinition::new(
            "Uninstall App",
            "hdc uninstall {package_name}",
            CommandKind::Normal,
        )
        .with_icon("uninstall"),
        CommandDefinition::new(
            "Screenshot",
            "hdc shell snapshot_display -f /data/local/tmp/screenshot_{timestamp}.jpeg && hdc file recv /data/local/tmp/screenshot_{timestamp}.jpeg screenshot_{timestamp}.jpeg",
            CommandKind::Screenshot,
        ),
    ]
}

/// Owns the command list. Mutations stay in memory until `save`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandStore {
    path: PathBuf,
    commands: Vec<CommandDefinition>,
    // Set by a mutation, cleared by a successful save or reload.
    unsaved: bool,
}

impl CommandStore {
    /// Read the list from `path`. When the file does not exist the default
    /// list is written there and returned.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no command list found, writing defaults");
            let mut store = Self::with_defaults(path);
            store.save()?;
            return Ok(store);
        }

        let commands = read_commands(&path)?;
        tracing::info!(path = %path.display(), count = commands.len(), "loaded command list");
        Ok(Self {
            path,
            commands,
            unsaved: false,
        })
    }

    /// Default list bound to `path`, not yet written.
    pub fn with_defaults(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            commands: default_commands(),
            unsaved: false,
        }
    }

    /// Re-read the file, replacing the in-memory list. On error the current
    /// list is kept.
    pub fn reload(&mut self) -> Result<()> {
        self.commands = read_commands(&self.path)?;
        self.unsaved = false;
        Ok(())
    }

    /// Write the whole list. The file is replaced by rename, so readers see
    /// either the old or the new contents.
    pub fn save(&mut self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).map_err(|e| PanelError::persistence(&self.path, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)
            .map_err(|e| PanelError::persistence(&self.path, e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            let doc = CommandDocument {
                commands: self.commands.clone(),
            };
            serde_json::to_writer_pretty(&mut writer, &doc)
                .map_err(|e| PanelError::persistence(&self.path, e))?;
            writer
                .write_all(b"\n")
                .and_then(|()| writer.flush())
                .map_err(|e| PanelError::persistence(&self.path, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| PanelError::persistence(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| PanelError::persistence(&self.path, e.error))?;

        tracing::debug!(path = %self.path.display(), count = self.commands.len(), "saved command list");
        self.unsaved = false;
        Ok(())
    }

    /// True while a mutation has not reached the file.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn commands(&self) -> &[CommandDefinition] {
        &self.commands
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<CommandDefinition> {
        self.commands.clone()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CommandDefinition> {
        self.commands.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn add(&mut self, definition: CommandDefinition) {
        self.commands.push(definition);
        self.unsaved = true;
    }

    pub fn update(&mut self, index: usize, definition: CommandDefinition) -> Result<()> {
        let slot = self
            .commands
            .get_mut(index)
            .ok_or(PanelError::NoSuchCommand(index))?;
        *slot = definition;
        self.unsaved = true;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<CommandDefinition> {
        if index >= self.commands.len() {
            return Err(PanelError::NoSuchCommand(index));
        }
        self.unsaved = true;
        Ok(self.commands.remove(index))
    }

    /// Swap with the previous entry. Returns the new index; the first entry stays put.
    pub fn move_up(&mut self, index: usize) -> Result<usize> {
        if index >= self.commands.len() {
            return Err(PanelError::NoSuchCommand(index));
        }
        if index == 0 {
            return Ok(0);
        }
        self.commands.swap(index, index - 1);
        self.unsaved = true;
        Ok(index - 1)
    }

    /// Swap with the next entry. Returns the new index; the last entry stays put.
    pub fn move_down(&mut self, index: usize) -> Result<usize> {
        if index >= self.commands.len() {
            return Err(PanelError::NoSuchCommand(index));
        }
        if index + 1 == self.commands.len() {
            return Ok(index);
        }
        self.commands.swap(index, index + 1);
        self.unsaved = true;
        Ok(index + 1)
    }

    #[must_use]
    pub fn filter(&self, keyword: &str) -> Vec<usize> {
        filter_indices(&self.commands, keyword)
    }
}

/// Indices of commands whose name or template contains `keyword`, ignoring case.
#[must_use]
pub fn filter_indices(commands: &[CommandDefinition], keyword: &str) -> Vec<usize> {
    let keyword = keyword.trim().to_lowercase();
    commands
        .iter()
        .enumerate()
        .filter(|(_, c)| c.matches_keyword(&keyword))
        .map(|(i, _)| i)
        .collect()
}

fn read_commands(path: &Path) -> Result<Vec<CommandDefinition>> {
    let content = std::fs::read_to_string(path).map_err(|e| PanelError::persistence(path, e))?;
    serde_json::from_str::<StoredCommands>(&content)
        .map(StoredCommands::into_commands)
        .map_err(|e| PanelError::persistence(path, format!("invalid command list: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("commands.json")
    }

    #[test]
    fn test_missing_file_bootstraps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_in(&dir);

        let store = CommandStore::load(&path).unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.commands(), default_commands().as_slice());
        assert!(path.exists());

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(on_disk["commands"].is_array());
    }

    #[test]
    fn test_deleted_file_is_recreated() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_in(&dir);
        CommandStore::load(&path).unwrap();

        std::fs::remove_file(&path).unwrap();
        let store = CommandStore::load(&path).unwrap();
        assert!(!store.is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_save_load_round_trip_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_in(&dir);

        let mut store = CommandStore::load(&path).unwrap();
        store.add(
            CommandDefinition::new("Reboot", "hdc target boot", CommandKind::Normal)
                .with_description("Restart the device"),
        );
        store.save().unwrap();

        let mut first = CommandStore::load(&path).unwrap();
        first.save().unwrap();
        let second = CommandStore::load(&path).unwrap();

        assert_eq!(first.commands(), second.commands());
        assert_eq!(second.commands().last().unwrap().name, "Reboot");
    }

    #[test]
    fn test_legacy_array_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_in(&dir);
        std::fs::write(
            &path,
            r#"[{"name": "List", "command": "hdc list targets", "type": "normal", "icon": "device"}]"#,
        )
        .unwrap();

        let store = CommandStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.commands()[0].icon, "device");
    }

    #[test]
    fn test_corrupt_file_is_persistence_error_and_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_in(&dir);
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            CommandStore::load(&path),
            Err(PanelError::Persistence { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = store_in(&dir);
        std::fs::create_dir_all(path.join("blocker")).unwrap();

        let mut store = CommandStore::with_defaults(&path);
        store.add(CommandDefinition::new("Extra", "echo hi", CommandKind::Normal));
        let before = store.len();

        assert!(matches!(store.save(), Err(PanelError::Persistence { .. })));
        assert_eq!(store.len(), before);
        assert!(store.has_unsaved_changes());
    }

    #[test]
    fn test_update_and_remove_bounds() {
        let mut store = CommandStore::with_defaults("unused.json");
        let replacement = CommandDefinition::new("X", "echo x", CommandKind::Normal);

        store.update(0, replacement.clone()).unwrap();
        assert_eq!(store.get(0), Some(&replacement));
        assert!(matches!(
            store.update(99, replacement),
            Err(PanelError::NoSuchCommand(99))
        ));

        let removed = store.remove(0).unwrap();
        assert_eq!(removed.name, "X");
        assert!(matches!(store.remove(99), Err(PanelError::NoSuchCommand(99))));
    }

    #[test]
    fn test_move_up_and_down() {
        let mut store = CommandStore::with_defaults("unused.json");
        let first = store.commands()[0].name.clone();
        let second = store.commands()[1].name.clone();

        assert_eq!(store.move_up(0).unwrap(), 0);
        assert_eq!(store.move_down(0).unwrap(), 1);
        assert_eq!(store.commands()[0].name, second);
        assert_eq!(store.commands()[1].name, first);

        let last = store.len() - 1;
        assert_eq!(store.move_down(last).unwrap(), last);
        assert_eq!(store.move_up(1).unwrap(), 0);
        assert_eq!(store.commands()[0].name, first);
        assert!(store.move_up(store.len()).is_err());
    }

    #[test]
    fn test_filter_matches_name_or_template() {
        let store = CommandStore::with_defaults("unused.json");
        let hits = store.filter("  UPLOAD ");
        assert_eq!(hits.len(), 1);
        assert_eq!(store.commands()[hits[0]].name, "Upload File");

        let recv = store.filter("file recv");
        assert!(recv.iter().any(|&i| store.commands()[i].name == "Download File"));
        assert_eq!(store.filter("").len(), store.len());
    }
}
