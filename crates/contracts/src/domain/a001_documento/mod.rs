//! Journal entry (documento contable) and its lines.

pub mod aggregate;
pub mod aplicacion;
pub mod balance;
pub mod form;

pub use aggregate::{
    AplicacionRequest, Bodega, BodegaId, DocumentoDetalle, DocumentoId, DocumentoListItem,
    DocumentoRequest, DocumentoSaved, EstadoDian, EstadoDocumento, Movimiento,
};
pub use aplicacion::{Aplicaciones, FacturaPendiente};
pub use balance::{calcular_totales, parse_amount, Totales, TOLERANCIA};
pub use form::{
    DocumentoError, DocumentoForm, Efecto, FilaMovimiento, FormAction, OrigenFila, VistaFacturas,
};
