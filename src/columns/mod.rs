// Columns module
// Column model and the column engine collaborator

pub mod column;
pub mod engine;

pub use column::{Column, ColumnOption, CHOOSER_ITEM_OPTIONS};
pub use engine::{ColumnEngine, ColumnsChangedEvent};
