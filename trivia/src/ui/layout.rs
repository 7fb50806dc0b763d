//! Layout calculations for the trivia TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen areas
pub struct AppLayout {
    pub title_area: Rect,
    pub board_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(8),    // Board
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        Self {
            title_area: chunks[0],
            board_area: chunks[1],
            status_bar: chunks[2],
            hotkey_bar: chunks[3],
        }
    }
}

/// Split the board into one column per category plus a header row.
pub fn board_grid(area: Rect, columns: usize, rows: usize) -> Vec<Vec<Rect>> {
    if columns == 0 {
        return Vec::new();
    }

    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
        .split(area);

    column_areas
        .iter()
        .map(|column| {
            let mut constraints = vec![Constraint::Length(3)];
            constraints.extend(vec![Constraint::Ratio(1, rows.max(1) as u32); rows]);
            Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(*column)
                .to_vec()
        })
        .collect()
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_grid_shape() {
        let grid = board_grid(Rect::new(0, 0, 100, 30), 5, 5);
        assert_eq!(grid.len(), 5);
        assert!(grid.iter().all(|column| column.len() == 6));
        assert_eq!(grid[0][0].height, 3);
    }

    #[test]
    fn test_board_grid_empty() {
        assert!(board_grid(Rect::new(0, 0, 100, 30), 0, 5).is_empty());
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect_fixed(60, 12, area);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 10);

        let popup = centered_rect_fixed(20, 4, area);
        assert_eq!((popup.x, popup.y), (10, 3));
    }
}
