// Chooser Items
// Projection from the column model to the tree list's flat items

use crate::columns::Column;
use crate::tree::TreeItem;

/// Build the chooser item list from the chooser-eligible columns
///
/// One item per column, `id = index`, `parent_id = owner_band`, `disabled`
/// when hiding is explicitly forbidden. In select mode every item carries an
/// explicit selection flag mirroring column visibility, except band items
/// under recursive selection: those stay tri-state `None` so the tree derives
/// their state from the children.
pub fn process_items(chooser_columns: &[&Column], select_mode: bool, recursive: bool) -> Vec<TreeItem> {
    chooser_columns
        .iter()
        .map(|column| {
            let recursive_band = recursive && column.has_columns;

            let selected = if select_mode && !recursive_band {
                Some(column.visible)
            } else {
                None
            };

            TreeItem {
                id: column.index,
                parent_id: column.owner_band,
                text: column.caption.clone(),
                css_class: column.css_class.clone(),
                allow_hiding: column.allow_hiding,
                disabled: column.allow_hiding == Some(false),
                expanded: true,
                selected,
            }
        })
        .collect()
}
