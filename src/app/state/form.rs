use super::input::AppTextArea;
use crate::domain::models::{CommandDefinition, CommandKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Template,
    Kind,
    Icon,
    Description,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Name,
            FormField::Template,
            FormField::Kind,
            FormField::Icon,
            FormField::Description,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Template => "Command",
            FormField::Kind => "Type",
            FormField::Icon => "Icon",
            FormField::Description => "Description",
        }
    }

    pub fn step(self, forward: bool) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % all.len()
        } else {
            (idx + all.len() - 1) % all.len()
        };
        all[next]
    }
}

/// Add/edit form for one command. `editing` is the store index being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandFormState<'a> {
    pub editing: Option<usize>,
    pub name: AppTextArea<'a>,
    pub template: AppTextArea<'a>,
    pub kind: CommandKind,
    pub icon: AppTextArea<'a>,
    pub description: AppTextArea<'a>,
    pub focus: FormField,
}

impl Default for CommandFormState<'_> {
    fn default() -> Self {
        Self {
            editing: None,
            name: AppTextArea::default(),
            template: AppTextArea::default(),
            kind: CommandKind::Normal,
            icon: AppTextArea::default(),
            description: AppTextArea::default(),
            focus: FormField::Name,
        }
    }
}

impl<'a> CommandFormState<'a> {
    pub fn editing(index: usize, definition: &CommandDefinition) -> Self {
        Self {
            editing: Some(index),
            name: AppTextArea::with_text(&definition.name),
            template: AppTextArea::with_text(&definition.template),
            kind: definition.kind,
            icon: AppTextArea::with_text(&definition.icon),
            description: AppTextArea::with_text(definition.description.as_deref().unwrap_or("")),
            focus: FormField::Name,
        }
    }

    /// Text area behind the focused field; `None` on the kind selector.
    pub fn focused_text_area(&mut self) -> Option<&mut AppTextArea<'a>> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Template => Some(&mut self.template),
            FormField::Icon => Some(&mut self.icon),
            FormField::Description => Some(&mut self.description),
            FormField::Kind => None,
        }
    }

    /// Build the definition. Name and command are required; an empty icon
    /// falls back to the kind name.
    pub fn to_definition(&self) -> Result<CommandDefinition, String> {
        let name = self.name.value().trim().to_string();
        let template = self.template.value().trim().to_string();
        if name.is_empty() || template.is_empty() {
            return Err("Command name and content must not be empty".to_string());
        }

        let mut definition = CommandDefinition::new(name, template, self.kind);
        let icon = self.icon.value().trim().to_string();
        if !icon.is_empty() {
            definition = definition.with_icon(icon);
        }
        let description = self.description.value().trim().to_string();
        if !description.is_empty() {
            definition = definition.with_description(description);
        }
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycle_wraps() {
        assert_eq!(FormField::Name.step(true), FormField::Template);
        assert_eq!(FormField::Name.step(false), FormField::Description);
        assert_eq!(FormField::Description.step(true), FormField::Name);
    }

    #[test]
    fn test_to_definition_requires_name_and_command() {
        let mut form = CommandFormState::default();
        form.name.insert_str("Reboot");
        assert!(form.to_definition().is_err());

        form.template.insert_str("hdc target boot");
        let def = form.to_definition().unwrap();
        assert_eq!(def.icon, "normal");
        assert_eq!(def.description, None);
    }

    #[test]
    fn test_editing_round_trips_fields() {
        let original = CommandDefinition::new("Logs", "hdc hilog", CommandKind::Normal)
            .with_icon("log")
            .with_description("Stream device logs");
        let form = CommandFormState::editing(3, &original);
        assert_eq!(form.editing, Some(3));
        assert_eq!(form.to_definition().unwrap(), original);
    }
}
