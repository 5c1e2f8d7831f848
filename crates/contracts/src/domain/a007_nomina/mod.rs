//! Payroll liquidation: per-employee previews and bulk save.
pub mod aggregate;
pub mod lote;

pub use aggregate::{
    desprendible_filename, EmpleadoId, EmpleadoNomina, HistorialLiquidacion, LiquidacionId,
    LiquidacionPreview, LiquidacionRequest, LiquidacionSaved, Modalidad, Periodo,
};
pub use lote::{EstadoFila, FilaLote, LoteLiquidacion, Resultado, ResumenLote};
