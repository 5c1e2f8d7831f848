pub mod aggregate;

pub use aggregate::{CentroCosto, CentroCostoId};
