//! Production recipes and orders.
pub mod aggregate;

pub use aggregate::{
    acciones_permitidas, AccionOrden, EstadoOrden, InsumoReceta, OrdenId, OrdenProduccion,
    OrdenRequest, Receta, RecetaId,
};
