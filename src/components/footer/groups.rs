use super::types::{FooterGroup, FooterItem};
use crate::app::state::{AppMode, AppState, FormField};

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    if state.last_error.is_some() {
        return vec![FooterGroup {
            name: "ERROR",
            items: vec![FooterItem::new("Esc", "dismiss")],
        }];
    }

    match state.mode {
        AppMode::Normal => {
            let mut groups = vec![
                FooterGroup {
                    name: "NAV",
                    items: vec![
                        FooterItem::new("j/k", "move"),
                        FooterItem::new("Enter", "run"),
                        FooterItem::new("/", "filter"),
                        FooterItem {
                            key: "C",
                            desc: "unfilter",
                            highlighted: !state.panel.filter.is_empty(),
                        },
                    ],
                },
                FooterGroup {
                    name: "EDIT",
                    items: vec![
                        FooterItem::new("a", "add"),
                        FooterItem::new("e", "edit"),
                        FooterItem::new("d", "del"),
                        FooterItem::new("J/K", "reorder"),
                        FooterItem::new("t", "templates"),
                    ],
                },
            ];
            if !state.output.is_empty() {
                groups.push(FooterGroup {
                    name: "OUTPUT",
                    items: vec![
                        FooterItem::new("PgUp/Dn", "scroll"),
                        FooterItem {
                            key: "b",
                            desc: "bottom",
                            highlighted: state.output.scroll > 0,
                        },
                        FooterItem::new("c", "clear"),
                    ],
                });
            }
            groups.push(FooterGroup {
                name: "APP",
                items: vec![
                    FooterItem::new("T", "theme"),
                    FooterItem::new("?", "help"),
                    FooterItem::new("q", "quit"),
                ],
            });
            groups
        }
        AppMode::FilterInput => vec![FooterGroup {
            name: "FILTER",
            items: vec![
                FooterItem::new("Enter", "apply"),
                FooterItem::new("↑/↓", "move"),
                FooterItem::new("Esc", "clear"),
            ],
        }],
        AppMode::Prompt => vec![FooterGroup {
            name: "PROMPT",
            items: vec![
                FooterItem::new("Enter", "confirm"),
                FooterItem::new("Esc", "cancel"),
            ],
        }],
        AppMode::CommandForm => {
            let on_kind = state
                .form
                .as_ref()
                .is_some_and(|f| f.focus == FormField::Kind);
            let mut items = vec![
                FooterItem::new("Tab", "next field"),
                FooterItem::new("Enter", "save"),
                FooterItem::new("Esc", "cancel"),
            ];
            if on_kind {
                items.insert(1, FooterItem::new("←/→", "type"));
            }
            vec![FooterGroup {
                name: "FORM",
                items,
            }]
        }
        AppMode::TemplatePicker => vec![FooterGroup {
            name: "TEMPLATES",
            items: vec![
                FooterItem::new("j/k", "move"),
                FooterItem::new("h/l", "category"),
                FooterItem::new("Enter", "use"),
                FooterItem::new("Esc", "cancel"),
            ],
        }],
        AppMode::ThemeSelection => vec![FooterGroup {
            name: "THEME",
            items: vec![
                FooterItem::new("j/k", "move"),
                FooterItem::new("Enter", "apply"),
                FooterItem::new("Esc", "cancel"),
            ],
        }],
        AppMode::Help => vec![FooterGroup {
            name: "HELP",
            items: vec![FooterItem::new("Esc", "close")],
        }],
        AppMode::ConfirmDelete => vec![FooterGroup {
            name: "DELETE",
            items: vec![
                FooterItem {
                    key: "y",
                    desc: "delete",
                    highlighted: true,
                },
                FooterItem::new("n", "keep"),
            ],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ErrorState;

    #[test]
    fn test_error_overrides_mode_groups() {
        let mut state = AppState::default();
        state.mode = AppMode::Prompt;
        state.last_error = Some(ErrorState::error("boom"));
        let groups = get_groups(&state);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "ERROR");
    }

    #[test]
    fn test_output_group_only_with_output() {
        let mut state = AppState::default();
        assert!(!get_groups(&state).iter().any(|g| g.name == "OUTPUT"));

        state.output.push(crate::app::state::OutputKind::Info, "hello");
        assert!(get_groups(&state).iter().any(|g| g.name == "OUTPUT"));
    }
}
