use crate::domain::models::{CommandDefinition, CommandKind};
use crate::error::{PanelError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    pub command: String,
    #[serde(rename = "type", default)]
    pub kind: CommandKind,
    #[serde(default)]
    pub description: String,
}

impl TemplateEntry {
    /// Command to append to the store; its icon follows the kind.
    #[must_use]
    pub fn to_definition(&self) -> CommandDefinition {
        let definition = CommandDefinition::new(&self.name, &self.command, self.kind);
        if self.description.is_empty() {
            definition
        } else {
            definition.with_description(&self.description)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateCategory {
    pub category: String,
    #[serde(default)]
    pub templates: Vec<TemplateEntry>,
}

/// Read the categorized template library. A missing file is an empty library.
pub fn load_templates(path: &Path) -> Result<Vec<TemplateCategory>> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no template library found");
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| PanelError::persistence(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| PanelError::persistence(path, format!("invalid template library: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_library_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_templates(&dir.path().join("templates.json"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_library_parses_and_converts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("templates.json");
        std::fs::write(
            &path,
            r#"[
                {"category": "Logs", "templates": [
                    {"name": "Dump hilog", "command": "hdc hilog", "type": "normal", "description": "Stream device logs"},
                    {"name": "Pull log", "command": "hdc file recv {remote_path} {local_path}", "type": "download", "description": ""}
                ]},
                {"category": "Empty"}
            ]"#,
        )
        .unwrap();

        let library = load_templates(&path).unwrap();
        assert_eq!(library.len(), 2);
        assert!(library[1].templates.is_empty());

        let dump = library[0].templates[0].to_definition();
        assert_eq!(dump.icon, "normal");
        assert_eq!(dump.description.as_deref(), Some("Stream device logs"));

        let pull = library[0].templates[1].to_definition();
        assert_eq!(pull.kind, CommandKind::Download);
        assert_eq!(pull.icon, "download");
        assert!(pull.description.is_none());
    }

    #[test]
    fn test_invalid_library_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("templates.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(load_templates(&path).is_err());
    }
}
