// UI module
// Event loop and input dispatch for the grid chooser

pub mod styles;

use anyhow::Result;
use crossterm::event;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::time::Duration;

use crate::core::{App, AppEvent, EventHandler, InputContext};
use crate::render::render_app;

pub use styles::Styles;

/// Run the main application event loop
pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Render the UI
        terminal.draw(|f| render_app(f, app))?;

        // Deferred follow-ups that must land after a completed draw
        app.chooser.after_render();

        // Handle events
        if event::poll(Duration::from_millis(250))? {
            let event = event::read()?;
            let context = InputContext {
                chooser_visible: app.chooser.is_column_chooser_visible(),
                search_focused: app.chooser.is_search_focused(),
            };
            let app_event = EventHandler::handle(event, context);

            handle_event(app, app_event);
        }

        // Check if we should quit
        if app.should_quit {
            return Ok(());
        }
    }
}

/// Handle an application event
fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Quit => app.quit(),
        AppEvent::Back => {
            if app.chooser.is_search_focused() {
                app.chooser.blur_search();
            } else if app.chooser.is_column_chooser_visible() {
                app.chooser.hide_column_chooser();
            } else {
                app.quit();
            }
        }
        AppEvent::SelectPrevious => app.chooser.cursor_up(),
        AppEvent::SelectNext => app.chooser.cursor_down(),
        AppEvent::PrevColumn => app.focus_prev_column(),
        AppEvent::NextColumn => app.focus_next_column(),
        AppEvent::ToggleChooser => app.toggle_chooser(),
        AppEvent::ToggleSelected => {
            app.chooser.toggle_at_cursor(&mut app.engine);
            // A drag-mode restore notifies outside the synchronizer
            app.route_column_events();
        }
        AppEvent::ToggleExpand => app.chooser.toggle_expand_at_cursor(),
        AppEvent::ToggleSelectAll => app.chooser.toggle_select_all(&mut app.engine),
        AppEvent::ToggleMode => app.toggle_mode(),
        AppEvent::HideFocusedColumn => app.hide_focused_column(),
        AppEvent::Refresh => app.refresh_columns(),
        AppEvent::FocusSearch => app.chooser.focus_search(),
        AppEvent::SearchInput(c) => app.chooser.search_input(c),
        AppEvent::SearchBackspace => app.chooser.search_backspace(),
        AppEvent::ScrollUp(amount) => {
            for _ in 0..amount {
                app.chooser.cursor_up();
            }
        }
        AppEvent::ScrollDown(amount) => {
            for _ in 0..amount {
                app.chooser.cursor_down();
            }
        }
        AppEvent::None => {}
    }
}
