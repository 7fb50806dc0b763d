//! Game board widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use trivia_core::ClueStore;

use crate::ui::layout::board_grid;
use crate::ui::theme::GameTheme;
use crate::view::BoardView;

/// The grid of categories and clue values
pub struct BoardWidget<'a> {
    view: &'a BoardView,
    store: &'a ClueStore,
    theme: &'a GameTheme,
    selected: Option<(usize, usize)>,
    loading: bool,
}

impl<'a> BoardWidget<'a> {
    pub fn new(view: &'a BoardView, store: &'a ClueStore, theme: &'a GameTheme) -> Self {
        Self {
            view,
            store,
            theme,
            selected: None,
            loading: false,
        }
    }

    pub fn selected(mut self, selected: Option<(usize, usize)>) -> Self {
        self.selected = selected;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.view.columns.is_empty() {
            let text = if self.loading {
                "Fetching categories..."
            } else {
                "No categories loaded."
            };
            Paragraph::new(Line::from(text))
                .style(self.theme.system_style())
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL))
                .render(area, buf);
            return;
        }

        let grid = board_grid(area, self.view.columns.len(), self.view.rows());

        for (col, (column, cells)) in self.view.columns.iter().zip(&grid).enumerate() {
            Paragraph::new(column.title.to_uppercase())
                .style(self.theme.category_style())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL))
                .render(cells[0], buf);

            for (row, cell_area) in cells.iter().skip(1).enumerate() {
                let Some(cell) = column.cells.get(row) else {
                    continue;
                };
                let used = self.store.is_used(&cell.id);
                let selected = self.selected == Some((col, row));
                let style = self.theme.cell_style(used, selected);

                Paragraph::new(format!("${}", cell.value))
                    .style(style)
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(if selected {
                                self.theme.border_style(true)
                            } else {
                                Style::default()
                            }),
                    )
                    .render(*cell_area, buf);
            }
        }
    }
}
