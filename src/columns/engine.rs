// Column Engine
// Owns the column set, answers chooser queries, and delivers coalesced
// change notifications through a drainable queue

use std::collections::BTreeSet;
use std::collections::VecDeque;

use super::column::{Column, ColumnOption, CHOOSER_ITEM_OPTIONS};

/// A coalesced column-change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnsChangedEvent {
    /// Which option names changed in this batch
    pub options: BTreeSet<ColumnOption>,

    /// Affected column indices; `None` for a bulk all-columns change
    pub column_indices: Option<Vec<usize>>,

    /// True for a bulk "all columns" notification
    pub all_columns: bool,

    /// True when the change affects the column set itself
    pub changed_columns: bool,
}

impl ColumnsChangedEvent {
    /// True when the only changed option is `visible`
    pub fn only_visible_changed(&self) -> bool {
        self.options.len() == 1 && self.options.contains(&ColumnOption::Visible)
    }

    /// True when any chooser-item-relevant option changed
    pub fn touches_chooser_items(&self) -> bool {
        CHOOSER_ITEM_OPTIONS
            .iter()
            .any(|option| self.options.contains(option))
    }
}

/// The grid's column model
///
/// Mutations made between `begin_update` and `end_update` are merged into a
/// single notification; mutations outside a batch notify immediately.
#[derive(Debug, Default)]
pub struct ColumnEngine {
    columns: Vec<Column>,
    update_depth: usize,
    pending: Option<ColumnsChangedEvent>,
    events: VecDeque<ColumnsChangedEvent>,
}

impl ColumnEngine {
    /// Create an engine over an already-flattened column list
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            update_depth: 0,
            pending: None,
            events: VecDeque::new(),
        }
    }

    /// All columns in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Read a single column by index
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.iter().find(|c| c.index == index)
    }

    /// Ordered chooser-eligible columns
    ///
    /// With `all_columns` set (select mode) every chooser column is returned,
    /// bands included; otherwise (drag mode) only hidden columns are listed.
    pub fn chooser_columns(&self, all_columns: bool) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.show_in_chooser)
            .filter(|c| all_columns || !c.visible)
            .collect()
    }

    /// True when every band above the column is visible
    pub fn is_parent_column_visible(&self, index: usize) -> bool {
        let mut owner = self.column(index).and_then(|c| c.owner_band);

        while let Some(band_index) = owner {
            match self.column(band_index) {
                Some(band) if band.visible => owner = band.owner_band,
                Some(_) => return false,
                None => return true,
            }
        }

        true
    }

    /// Write a column's visibility flag
    ///
    /// Unknown indices are ignored: a band parent without backing visibility
    /// semantics is a valid write target that simply does nothing. Writing
    /// the current value does not notify.
    pub fn set_visible(&mut self, index: usize, visible: bool) {
        let Some(column) = self.columns.iter_mut().find(|c| c.index == index) else {
            return;
        };

        if column.visible != visible {
            column.visible = visible;
            self.record(ColumnOption::Visible, index);
        }
    }

    /// Write a column's caption
    pub fn set_caption(&mut self, index: usize, caption: &str) {
        let Some(column) = self.columns.iter_mut().find(|c| c.index == index) else {
            return;
        };

        if column.caption != caption {
            column.caption = caption.to_string();
            self.record(ColumnOption::Caption, index);
        }
    }

    /// Write a column's allow-hiding flag
    pub fn set_allow_hiding(&mut self, index: usize, allow_hiding: Option<bool>) {
        let Some(column) = self.columns.iter_mut().find(|c| c.index == index) else {
            return;
        };

        if column.allow_hiding != allow_hiding {
            column.allow_hiding = allow_hiding;
            self.record(ColumnOption::AllowHiding, index);
        }
    }

    /// Open a batched-update scope; nestable
    pub fn begin_update(&mut self) {
        self.update_depth += 1;
    }

    /// Close a batched-update scope, flushing the coalesced notification
    pub fn end_update(&mut self) {
        if self.update_depth > 0 {
            self.update_depth -= 1;
        }

        if self.update_depth == 0 {
            if let Some(event) = self.pending.take() {
                self.events.push_back(event);
            }
        }
    }

    /// Fire a bulk "all columns changed" notification
    pub fn notify_all_changed(&mut self) {
        let mut options = BTreeSet::new();
        for option in CHOOSER_ITEM_OPTIONS {
            options.insert(*option);
        }

        self.push_event(ColumnsChangedEvent {
            options,
            column_indices: None,
            all_columns: true,
            changed_columns: true,
        });
    }

    /// Take all pending notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<ColumnsChangedEvent> {
        self.events.drain(..).collect()
    }

    fn record(&mut self, option: ColumnOption, index: usize) {
        if self.update_depth > 0 {
            let pending = self.pending.get_or_insert_with(|| ColumnsChangedEvent {
                options: BTreeSet::new(),
                column_indices: Some(Vec::new()),
                all_columns: false,
                changed_columns: false,
            });

            pending.options.insert(option);
            if let Some(indices) = pending.column_indices.as_mut() {
                if !indices.contains(&index) {
                    indices.push(index);
                }
            }
        } else {
            let mut options = BTreeSet::new();
            options.insert(option);

            self.push_event(ColumnsChangedEvent {
                options,
                column_indices: Some(vec![index]),
                all_columns: false,
                changed_columns: false,
            });
        }
    }

    fn push_event(&mut self, event: ColumnsChangedEvent) {
        if self.update_depth > 0 {
            match self.pending.as_mut() {
                Some(pending) => {
                    pending.options.extend(event.options.iter().copied());
                    pending.all_columns |= event.all_columns;
                    pending.changed_columns |= event.changed_columns;
                    if event.all_columns {
                        pending.column_indices = None;
                    }
                }
                None => self.pending = Some(event),
            }
        } else {
            self.events.push_back(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(index: usize, caption: &str, visible: bool) -> Column {
        Column {
            index,
            caption: caption.to_string(),
            data_field: None,
            visible,
            allow_hiding: None,
            css_class: None,
            owner_band: None,
            has_columns: false,
            show_in_chooser: true,
        }
    }

    #[test]
    fn test_chooser_columns_drag_mode_lists_hidden_only() {
        let engine = ColumnEngine::new(vec![
            column(0, "A", true),
            column(1, "B", false),
            column(2, "C", false),
        ]);

        let hidden: Vec<usize> = engine.chooser_columns(false).iter().map(|c| c.index).collect();
        assert_eq!(hidden, vec![1, 2]);

        let all: Vec<usize> = engine.chooser_columns(true).iter().map(|c| c.index).collect();
        assert_eq!(all, vec![0, 1, 2]);
    }

    #[test]
    fn test_chooser_columns_respects_show_in_chooser() {
        let mut hidden_from_chooser = column(1, "B", true);
        hidden_from_chooser.show_in_chooser = false;

        let engine = ColumnEngine::new(vec![column(0, "A", true), hidden_from_chooser]);
        let all: Vec<usize> = engine.chooser_columns(true).iter().map(|c| c.index).collect();
        assert_eq!(all, vec![0]);
    }

    #[test]
    fn test_set_visible_notifies_once_per_change() {
        let mut engine = ColumnEngine::new(vec![column(0, "A", true)]);

        engine.set_visible(0, false);
        engine.set_visible(0, false); // no-op, already hidden

        let events = engine.drain_events();
        assert_eq!(events.len(), 1);
        assert!(events[0].only_visible_changed());
        assert_eq!(events[0].column_indices, Some(vec![0]));
    }

    #[test]
    fn test_batched_writes_coalesce_into_one_event() {
        let mut engine = ColumnEngine::new(vec![
            column(0, "A", true),
            column(1, "B", true),
            column(2, "C", true),
        ]);

        engine.begin_update();
        engine.set_visible(0, false);
        engine.set_visible(1, false);
        engine.set_caption(2, "Renamed");
        engine.end_update();

        let events = engine.drain_events();
        assert_eq!(events.len(), 1);
        assert!(!events[0].only_visible_changed());
        assert_eq!(events[0].column_indices, Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_unknown_index_write_is_a_no_op() {
        let mut engine = ColumnEngine::new(vec![column(0, "A", true)]);

        engine.set_visible(42, false);

        assert!(engine.drain_events().is_empty());
        assert!(engine.column(0).unwrap().visible);
    }

    #[test]
    fn test_bulk_notification_shape() {
        let mut engine = ColumnEngine::new(vec![column(0, "A", true)]);

        engine.notify_all_changed();

        let events = engine.drain_events();
        assert_eq!(events.len(), 1);
        assert!(events[0].all_columns);
        assert!(events[0].changed_columns);
        assert_eq!(events[0].column_indices, None);
    }

    #[test]
    fn test_parent_column_visibility_walks_band_chain() {
        let mut band = column(0, "Band", false);
        band.has_columns = true;

        let mut child = column(1, "Child", true);
        child.owner_band = Some(0);

        let engine = ColumnEngine::new(vec![band, child]);

        assert!(!engine.is_parent_column_visible(1));
        assert!(engine.is_parent_column_visible(0));
    }
}
