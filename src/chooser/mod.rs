// Chooser Module
// The column chooser panel and its selection synchronization machinery

pub mod items;
pub mod panel;
pub mod sync;

pub use items::process_items;
pub use panel::ColumnChooser;
pub use sync::{flatten_nodes, NodeSnapshot, SelectionSync};

/// How the chooser interacts with columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChooserMode {
    /// Hidden columns listed as draggable chips; restored by dragging out
    #[default]
    DragAndDrop,

    /// Every chooser column listed with a checkbox bound to its visibility
    Select,
}

impl ChooserMode {
    /// Parse a mode descriptor; anything unrecognized means drag-and-drop
    pub fn parse(value: &str) -> Self {
        match value {
            "select" => Self::Select,
            _ => Self::DragAndDrop,
        }
    }
}
