// Tree module
// Tree list widget: items, node forest, and the checkable list itself

pub mod item;
pub mod node;
pub mod tree_list;

pub use item::TreeItem;
pub use node::{find_node, find_node_mut, TreeNode};
pub use tree_list::{SearchEditorOptions, TreeList, TreeListConfig, TreeListEvent, VisibleRow};
