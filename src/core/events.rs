// Event Handling
// Application event types and handler infrastructure

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

/// Application events that can be handled
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Quit the application
    Quit,

    /// Go back / escape current mode
    Back,

    /// Move the chooser cursor up
    SelectPrevious,

    /// Move the chooser cursor down
    SelectNext,

    /// Focus the previous grid column
    PrevColumn,

    /// Focus the next grid column
    NextColumn,

    /// Open or close the column chooser panel
    ToggleChooser,

    /// Toggle the chooser row under the cursor
    ToggleSelected,

    /// Expand or collapse the band under the cursor
    ToggleExpand,

    /// Select or clear all chooser rows
    ToggleSelectAll,

    /// Switch the chooser between drag and select mode
    ToggleMode,

    /// Hide the focused grid column
    HideFocusedColumn,

    /// Refresh the grid from its configuration
    Refresh,

    /// Focus the chooser search box
    FocusSearch,

    /// A character typed into the search box
    SearchInput(char),

    /// Delete the last search character
    SearchBackspace,

    /// Scroll up by amount
    ScrollUp(usize),

    /// Scroll down by amount
    ScrollDown(usize),

    /// No operation
    None,
}

/// Input routing context: which surface currently owns the keyboard
#[derive(Debug, Clone, Copy, Default)]
pub struct InputContext {
    pub chooser_visible: bool,
    pub search_focused: bool,
}

/// Event handler that converts terminal events to application events
pub struct EventHandler;

impl EventHandler {
    /// Convert a crossterm event to an application event
    pub fn handle(event: Event, context: InputContext) -> AppEvent {
        match event {
            Event::Key(key) => Self::handle_key(key, context),
            Event::Mouse(mouse) => Self::handle_mouse(mouse),
            _ => AppEvent::None,
        }
    }

    /// Handle keyboard events
    fn handle_key(key: KeyEvent, context: InputContext) -> AppEvent {
        // Only handle key press events
        if key.kind != crossterm::event::KeyEventKind::Press {
            return AppEvent::None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return AppEvent::Quit;
        }

        if context.search_focused {
            return Self::handle_search_key(key);
        }

        if context.chooser_visible {
            Self::handle_chooser_key(key)
        } else {
            Self::handle_grid_key(key)
        }
    }

    /// Keys while the search box owns input
    fn handle_search_key(key: KeyEvent) -> AppEvent {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => AppEvent::Back,
            KeyCode::Backspace => AppEvent::SearchBackspace,
            KeyCode::Char(c) => AppEvent::SearchInput(c),
            _ => AppEvent::None,
        }
    }

    /// Keys while the chooser panel is open
    fn handle_chooser_key(key: KeyEvent) -> AppEvent {
        match key.code {
            KeyCode::Char('q') => AppEvent::Quit,
            KeyCode::Esc => AppEvent::Back,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => AppEvent::SelectPrevious,
            KeyCode::Down | KeyCode::Char('j') => AppEvent::SelectNext,

            // Row interaction
            KeyCode::Enter | KeyCode::Char(' ') => AppEvent::ToggleSelected,
            KeyCode::Left | KeyCode::Right => AppEvent::ToggleExpand,
            KeyCode::Char('a') => AppEvent::ToggleSelectAll,

            KeyCode::Char('/') => AppEvent::FocusSearch,
            KeyCode::Char('m') => AppEvent::ToggleMode,
            KeyCode::Char('c') => AppEvent::ToggleChooser,
            KeyCode::Char('r') => AppEvent::Refresh,

            _ => AppEvent::None,
        }
    }

    /// Keys while the grid owns input
    fn handle_grid_key(key: KeyEvent) -> AppEvent {
        match key.code {
            KeyCode::Char('q') => AppEvent::Quit,
            KeyCode::Esc => AppEvent::Back,

            // Column focus
            KeyCode::Left | KeyCode::Char('h') => AppEvent::PrevColumn,
            KeyCode::Right | KeyCode::Char('l') => AppEvent::NextColumn,

            KeyCode::Char('c') => AppEvent::ToggleChooser,
            KeyCode::Char('d') => AppEvent::HideFocusedColumn,
            KeyCode::Char('m') => AppEvent::ToggleMode,
            KeyCode::Char('r') => AppEvent::Refresh,

            _ => AppEvent::None,
        }
    }

    /// Handle mouse events
    fn handle_mouse(mouse: MouseEvent) -> AppEvent {
        match mouse.kind {
            MouseEventKind::ScrollUp => AppEvent::ScrollUp(1),
            MouseEventKind::ScrollDown => AppEvent::ScrollDown(1),
            _ => AppEvent::None,
        }
    }
}
