//! Domain model types (pure).

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod node;
pub mod tree_item;

pub use error::{AppError, InputError};
pub use identifiers::{ItemId, ItemIndex};
pub use key_action::{KeyAction, UnknownKeyAction};
pub use node::{NodeData, SourceNode, TreeNode};
pub use tree_item::{ItemDiagnostic, TabIndex, TreeItem, TreeItemMetadata};
