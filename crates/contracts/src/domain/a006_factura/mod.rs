//! Sales invoices, purchases and their credit/debit notes.
pub mod aggregate;
pub mod totales;

pub use aggregate::{
    validar_factura, EmisionRespuesta, FacturaError, FacturaRequest, FacturaSaved, NotaTipo,
    TipoFactura,
};
pub use totales::{calcular_totales_factura, LineaFactura, TotalesFactura};
