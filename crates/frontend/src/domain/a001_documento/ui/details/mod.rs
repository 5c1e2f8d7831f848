//! Journal-entry form
//!
//! - view_model.rs: form state, backend calls and keyboard routing
//! - view.rs: Leptos components (pure UI)

mod view;
mod view_model;

pub use view::DocumentoDetails;
