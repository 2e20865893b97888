// Render module - UI rendering functions

pub mod chooser_panel;
pub mod grid_view;

pub use chooser_panel::{anchored_rect, render_chooser};
pub use grid_view::render_grid;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::core::App;
use crate::ui::Styles;

/// Render the entire application
pub fn render_app(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    render_grid(f, app, chunks[0]);
    render_footer(f, app, chunks[1]);

    // The popup draws over the grid
    render_chooser(f, &app.chooser, chunks[0]);
}

/// Render the footer key legend
fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.chooser.is_search_focused() {
        "Esc/Enter: Done | Backspace: Delete | type to filter"
    } else if app.chooser.is_column_chooser_visible() {
        if app.chooser.is_select_mode() {
            "q: Quit | Esc: Close | ↑/↓: Navigate | Space: Toggle | a: Select All | ←/→: Expand | /: Search | m: Mode"
        } else {
            "q: Quit | Esc: Close | ↑/↓: Navigate | Enter: Restore Column | /: Search | m: Mode"
        }
    } else {
        "q: Quit | ←/→: Focus Column | d: Hide Column | c: Column Chooser | m: Mode | r: Refresh"
    };

    let footer = Paragraph::new(help_text).style(Styles::footer());
    f.render_widget(footer, area);
}
