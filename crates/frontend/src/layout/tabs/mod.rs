//! Tab keys, the key → page registry and the page wrapper.

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{tab_label_for_key, TabKey};
