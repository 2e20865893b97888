// Grid Chooser Library
// A modular TUI data grid built around a column chooser panel

// Core infrastructure - foundational systems
pub mod core;

// Columns - the grid's column model
pub mod columns;

// Tree - checkable tree list widget
pub mod tree;

// Chooser - the column chooser feature
pub mod chooser;

// Render - UI rendering functions
pub mod render;

// UI - event loop and input dispatch
pub mod ui;

// Utilities - helper functions and tools
pub mod utilities;

// Re-export commonly used items for convenience
pub use crate::chooser::{ChooserMode, ColumnChooser, SelectionSync};
pub use crate::columns::{Column, ColumnEngine};
pub use crate::core::{App, ChooserConfig, GridConfig};
pub use crate::tree::TreeList;
