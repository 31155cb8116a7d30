use crate::infrastructure::templates::{TemplateCategory, TemplateEntry};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplatePickerState {
    pub categories: Vec<TemplateCategory>,
    pub category: usize,
    pub selected: usize,
    pub loading: bool,
}

impl TemplatePickerState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    pub fn current_category(&self) -> Option<&TemplateCategory> {
        self.categories.get(self.category)
    }

    pub fn selected_entry(&self) -> Option<&TemplateEntry> {
        self.current_category()
            .and_then(|c| c.templates.get(self.selected))
    }

    pub fn next(&mut self) {
        let len = self.current_category().map_or(0, |c| c.templates.len());
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn prev(&mut self) {
        let len = self.current_category().map_or(0, |c| c.templates.len());
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn next_category(&mut self) {
        if !self.categories.is_empty() {
            self.category = (self.category + 1) % self.categories.len();
            self.selected = 0;
        }
    }

    pub fn prev_category(&mut self) {
        let len = self.categories.len();
        if len > 0 {
            self.category = (self.category + len - 1) % len;
            self.selected = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CommandKind;

    fn entry(name: &str) -> TemplateEntry {
        TemplateEntry {
            name: name.to_string(),
            command: format!("hdc {name}"),
            kind: CommandKind::Normal,
            description: String::new(),
        }
    }

    #[test]
    fn test_navigation_wraps_within_category() {
        let mut picker = TemplatePickerState {
            categories: vec![
                TemplateCategory {
                    category: "Device".to_string(),
                    templates: vec![entry("a"), entry("b")],
                },
                TemplateCategory {
                    category: "Empty".to_string(),
                    templates: vec![],
                },
            ],
            ..Default::default()
        };

        picker.prev();
        assert_eq!(picker.selected_entry().unwrap().name, "b");
        picker.next();
        assert_eq!(picker.selected_entry().unwrap().name, "a");

        picker.next_category();
        assert_eq!(picker.category, 1);
        assert!(picker.selected_entry().is_none());
        picker.next();
        assert_eq!(picker.selected, 0);

        picker.next_category();
        assert_eq!(picker.category, 0);
    }
}
