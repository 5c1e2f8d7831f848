//! HTTP calls for payroll.
use crate::shared::http::{get_bytes, get_json, post_json};
use contracts::domain::a007_nomina::{
    EmpleadoNomina, HistorialLiquidacion, LiquidacionId, LiquidacionPreview, LiquidacionRequest,
    LiquidacionSaved,
};
use contracts::shared::api_error::ApiError;
use contracts::shared::download::pdf_path;

pub async fn fetch_empleados() -> Result<Vec<EmpleadoNomina>, ApiError> {
    get_json("/nomina/empleados").await
}

/// Computes the liquidation without persisting it.
pub async fn preview_liquidacion(req: &LiquidacionRequest) -> Result<LiquidacionPreview, ApiError> {
    post_json("/nomina/liquidacion/preview", req).await
}

pub async fn guardar_liquidacion(req: &LiquidacionRequest) -> Result<LiquidacionSaved, ApiError> {
    post_json("/nomina/liquidacion", req).await
}

pub async fn fetch_historial() -> Result<Vec<HistorialLiquidacion>, ApiError> {
    get_json("/nomina/historial").await
}

/// Pay stub PDF of a saved liquidation.
pub async fn descargar_desprendible(id: LiquidacionId) -> Result<Vec<u8>, ApiError> {
    get_bytes(&pdf_path("nomina/liquidacion", id)).await
}
