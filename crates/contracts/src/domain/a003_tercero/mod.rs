pub mod aggregate;

pub use aggregate::{Tercero, TerceroId, TipoTercero};
