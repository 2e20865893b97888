// Application State
// Main application state management and lifecycle

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;

use super::{ChooserConfig, GridConfig};
use crate::chooser::{ChooserMode, ColumnChooser};
use crate::columns::{Column, ColumnEngine};

/// Grid config file name
const GRID_CONFIG_NAME: &str = "grid.yaml";

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Grid configuration (loaded from grid.yaml)
    pub grid_config: GridConfig,

    /// Workspace root path
    pub workspace_root: PathBuf,

    /// Column model shared by the grid and the chooser
    pub engine: ColumnEngine,

    /// Demo row data keyed by `data_field`
    pub rows: Vec<HashMap<String, String>>,

    /// The column chooser panel
    pub chooser: ColumnChooser,

    /// Focused column, as an index into the visible leaf columns
    pub grid_cursor: usize,

    /// Whether the application should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let workspace_root = Self::detect_workspace_root()?;

        let grid_config =
            GridConfig::load_from_workspace(&workspace_root, GRID_CONFIG_NAME).unwrap_or_default();

        let mut chooser_config = ChooserConfig::default();
        if let Some(overrides) = &grid_config.column_chooser {
            chooser_config.apply_overrides(overrides)?;
        }

        let engine = ColumnEngine::new(grid_config.build_columns());
        let rows = grid_config.rows.clone();

        Ok(Self {
            grid_config,
            workspace_root,
            engine,
            rows,
            chooser: ColumnChooser::new(chooser_config),
            grid_cursor: 0,
            should_quit: false,
        })
    }

    /// Detect the workspace root directory
    fn detect_workspace_root() -> Result<PathBuf> {
        // First try environment variable
        if let Ok(path) = std::env::var("WORKSPACE_ROOT") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        // Try to detect from current directory
        let cwd = std::env::current_dir()?;

        // Walk up looking for grid.yaml
        let mut current = cwd.as_path();
        while let Some(parent) = current.parent() {
            if current.join(GRID_CONFIG_NAME).exists() {
                return Ok(current.to_path_buf());
            }
            current = parent;
        }

        // Fall back to current directory
        Ok(cwd)
    }

    /// Deliver pending column notifications to the chooser
    pub fn route_column_events(&mut self) {
        for event in self.engine.drain_events() {
            self.chooser.handle_columns_changed(&event, &mut self.engine);
        }
    }

    /// Leaf columns currently shown by the grid, in declaration order
    pub fn visible_leaf_columns(&self) -> Vec<&Column> {
        self.engine
            .columns()
            .iter()
            .filter(|column| {
                !column.has_columns
                    && column.visible
                    && self.engine.is_parent_column_visible(column.index)
            })
            .collect()
    }

    /// The focused grid column, if any columns are visible
    pub fn focused_column(&self) -> Option<&Column> {
        self.visible_leaf_columns().get(self.grid_cursor).copied()
    }

    /// Move column focus left
    pub fn focus_prev_column(&mut self) {
        self.grid_cursor = self.grid_cursor.saturating_sub(1);
    }

    /// Move column focus right
    pub fn focus_next_column(&mut self) {
        let max = self.visible_leaf_columns().len().saturating_sub(1);
        if self.grid_cursor < max {
            self.grid_cursor += 1;
        }
    }

    /// Hide the focused column, the keyboard analog of dragging its header
    /// into the chooser
    pub fn hide_focused_column(&mut self) {
        let index = match self.focused_column() {
            Some(column) if column.hiding_allowed() => column.index,
            _ => return,
        };

        self.engine.set_visible(index, false);
        self.route_column_events();
        self.clamp_grid_cursor();
    }

    /// Open or close the chooser panel
    pub fn toggle_chooser(&mut self) {
        if self.chooser.is_column_chooser_visible() {
            self.chooser.hide_column_chooser();
        } else {
            self.chooser.show_column_chooser(&self.engine);
        }
    }

    /// Switch the chooser between drag and select mode at runtime
    pub fn toggle_mode(&mut self) {
        let mut config = self.chooser.config().clone();
        config.mode = match config.mode {
            ChooserMode::Select => ChooserMode::DragAndDrop,
            ChooserMode::DragAndDrop => ChooserMode::Select,
        };
        self.chooser.set_config(config, &self.engine);
    }

    /// Re-announce the full column model, e.g. after external edits
    pub fn refresh_columns(&mut self) {
        self.engine.notify_all_changed();
        self.route_column_events();
        self.clamp_grid_cursor();
    }

    fn clamp_grid_cursor(&mut self) {
        let max = self.visible_leaf_columns().len().saturating_sub(1);
        if self.grid_cursor > max {
            self.grid_cursor = max;
        }
    }

    /// Request application quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
