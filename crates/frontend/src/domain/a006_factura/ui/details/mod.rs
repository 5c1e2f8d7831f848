//! Sales / purchase invoice entry with live totals.

mod view;
mod view_model;

pub use view::FacturaDetails;
