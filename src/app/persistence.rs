use crate::error::{PanelError, Result};
use crate::theme::PaletteType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Interface preferences kept across sessions in `ui_settings.toml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default)]
    pub theme: PaletteType,
}

/// Missing or unreadable settings fall back to the defaults.
pub fn load_ui_settings(path: &Path) -> UiSettings {
    if !path.exists() {
        return UiSettings::default();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable ui settings");
            UiSettings::default()
        }),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read ui settings");
            UiSettings::default()
        }
    }
}

pub fn save_ui_settings(path: &Path, settings: &UiSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PanelError::persistence(path, e))?;
    }
    let content = toml::to_string(settings).map_err(|e| PanelError::persistence(path, e))?;
    std::fs::write(path, content).map_err(|e| PanelError::persistence(path, e))
}
