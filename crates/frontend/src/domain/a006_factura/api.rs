//! HTTP calls for sales invoices and purchases.
use crate::shared::http::{post_empty, post_json};
use contracts::domain::a001_documento::DocumentoId;
use contracts::domain::a006_factura::{EmisionRespuesta, FacturaRequest, FacturaSaved, TipoFactura};
use contracts::shared::api_error::ApiError;

/// `POST /facturacion/` for sales, `POST /compras/` for purchases.
pub async fn crear_factura(
    tipo: TipoFactura,
    req: &FacturaRequest,
) -> Result<FacturaSaved, ApiError> {
    post_json(tipo.endpoint(), req).await
}

pub async fn emitir_factura(id: DocumentoId) -> Result<EmisionRespuesta, ApiError> {
    post_empty(&format!("/fe/emitir/{}", id)).await
}
