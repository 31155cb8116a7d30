use crate::domain::models::CommandDefinition;
use crate::domain::placeholder::{Placeholder, PlaceholderValues, PromptSpec};

/// Values being collected for one run, one placeholder at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptState {
    pub definition: CommandDefinition,
    pub placeholders: Vec<Placeholder>,
    pub step: usize,
    pub values: PlaceholderValues,
}

impl PromptState {
    pub fn new(definition: CommandDefinition, placeholders: Vec<Placeholder>) -> Self {
        Self {
            definition,
            placeholders,
            step: 0,
            values: PlaceholderValues::new(),
        }
    }

    pub fn current(&self) -> Option<&Placeholder> {
        self.placeholders.get(self.step)
    }

    pub fn spec(&self) -> Option<PromptSpec> {
        self.current().map(|p| p.prompt(self.definition.kind))
    }

    /// Record `value` for the current placeholder. Returns true once every value is in.
    pub fn accept(&mut self, value: impl Into<String>) -> bool {
        if let Some(placeholder) = self.placeholders.get(self.step).cloned() {
            self.values.insert(&placeholder, value);
            self.step += 1;
        }
        self.step >= self.placeholders.len()
    }
}
