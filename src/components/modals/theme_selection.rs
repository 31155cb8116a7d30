use crate::app::state::ThemeSelectionState;
use crate::theme::{PaletteType, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, Widget},
};

use super::helpers::{centered_rect_fixed_height, modal_title, open_modal};

pub struct ThemeSelectionModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a ThemeSelectionState,
    pub current: PaletteType,
}

impl Widget for ThemeSelectionModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.state.themes.len() as u16 + 2;
        let modal_area = centered_rect_fixed_height(40, height, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        let inner = open_modal(
            buf,
            modal_area,
            area,
            modal_title(" SELECT THEME ", self.theme),
            self.theme,
        );

        let items: Vec<ListItem> = self
            .state
            .themes
            .iter()
            .enumerate()
            .map(|(i, palette)| {
                let selected = i == self.state.selected_index;
                let style = if selected {
                    self.theme.list_selected
                } else {
                    self.theme.list_item
                };
                let prefix = if selected { "> " } else { "  " };
                let marker = if *palette == self.current { " (active)" } else { "" };

                ListItem::new(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(palette.label(), style),
                    Span::styled(marker, self.theme.dimmed),
                ]))
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}
