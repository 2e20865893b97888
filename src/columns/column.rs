// Column Model
// Column records as owned by the column engine

/// A single grid column, possibly a band owning child columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Stable identity, assigned at construction and never reused
    pub index: usize,

    /// Header caption; empty when the definition provides none
    pub caption: String,

    /// Row-data key for leaf columns
    pub data_field: Option<String>,

    /// Whether the column currently participates in the grid layout
    pub visible: bool,

    /// `Some(false)` pins the column: it can never be hidden.
    /// `None` means hiding is permitted.
    pub allow_hiding: Option<bool>,

    /// Optional style hook carried through to chooser items
    pub css_class: Option<String>,

    /// Index of the owning band column, if any
    pub owner_band: Option<usize>,

    /// True when this column is a band with child columns
    pub has_columns: bool,

    /// Whether the column is listed in the column chooser at all
    pub show_in_chooser: bool,
}

impl Column {
    /// Hiding is allowed unless explicitly forbidden
    pub fn hiding_allowed(&self) -> bool {
        self.allow_hiding != Some(false)
    }
}

/// Column options the chooser cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColumnOption {
    ShowInChooser,
    Caption,
    AllowHiding,
    Visible,
    CssClass,
    OwnerBand,
}

/// Options that feed the chooser item projection; a change to any of these
/// invalidates the item list
pub const CHOOSER_ITEM_OPTIONS: &[ColumnOption] = &[
    ColumnOption::ShowInChooser,
    ColumnOption::Caption,
    ColumnOption::AllowHiding,
    ColumnOption::Visible,
    ColumnOption::CssClass,
    ColumnOption::OwnerBand,
];
