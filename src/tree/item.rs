// Tree Items
// Flat item records the tree list is configured with

/// One entry of the tree list's flat item list
///
/// `parent_id` links an item to its parent one level at a time; the widget
/// assembles the forest itself. `selected` is tri-state: `None` means the
/// widget derives the state (indeterminate for parents in recursive mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    pub id: usize,
    pub parent_id: Option<usize>,
    pub text: String,
    pub css_class: Option<String>,
    pub allow_hiding: Option<bool>,
    pub disabled: bool,
    pub expanded: bool,
    pub selected: Option<bool>,
}

impl TreeItem {
    /// A root item with the given id and text; callers adjust the rest
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            parent_id: None,
            text: text.into(),
            css_class: None,
            allow_hiding: None,
            disabled: false,
            expanded: true,
            selected: None,
        }
    }
}
