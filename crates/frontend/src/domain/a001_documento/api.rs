//! HTTP calls for accounting documents.
use crate::shared::http::{get_bytes, get_json, post_empty, post_json, put_json};
use contracts::domain::a001_documento::{
    Bodega, DocumentoDetalle, DocumentoId, DocumentoListItem, DocumentoRequest, DocumentoSaved,
    FacturaPendiente,
};
use contracts::domain::a002_tipo_documento::{Parte, TipoDocumentoId};
use contracts::domain::a003_tercero::TerceroId;
use contracts::domain::a006_factura::EmisionRespuesta;
use contracts::shared::api_error::ApiError;
use contracts::shared::download::pdf_path;

pub async fn fetch_documentos() -> Result<Vec<DocumentoListItem>, ApiError> {
    get_json("/documentos").await
}

pub async fn fetch_documento(id: DocumentoId) -> Result<DocumentoDetalle, ApiError> {
    get_json(&format!("/documentos/{}", id)).await
}

pub async fn create_documento(req: &DocumentoRequest) -> Result<DocumentoSaved, ApiError> {
    post_json("/documentos", req).await
}

pub async fn update_documento(
    id: DocumentoId,
    req: &DocumentoRequest,
) -> Result<DocumentoSaved, ApiError> {
    put_json(&format!("/documentos/{}", id), req).await
}

/// Inventory transfers are posted to their own endpoint with the same body.
pub async fn create_traslado(req: &DocumentoRequest) -> Result<DocumentoSaved, ApiError> {
    post_json("/traslados-inventario", req).await
}

pub async fn solicitar_impresion(id: DocumentoId) -> Result<serde_json::Value, ApiError> {
    post_empty(&format!("/documentos/{}/solicitar-impresion", id)).await
}

pub async fn descargar_pdf(id: DocumentoId) -> Result<Vec<u8>, ApiError> {
    get_bytes(&pdf_path("documentos", id)).await
}

pub async fn emitir_dian(id: DocumentoId) -> Result<EmisionRespuesta, ApiError> {
    post_empty(&format!("/fe/emitir/{}", id)).await
}

pub async fn fetch_facturas_pendientes(
    tercero_id: TerceroId,
    tipo_documento_id: TipoDocumentoId,
    parte: Parte,
) -> Result<Vec<FacturaPendiente>, ApiError> {
    get_json(&format!(
        "/documentos/facturas-pendientes?tercero_id={}&tipo_documento_id={}&tipo={}",
        tercero_id,
        tipo_documento_id,
        parte.as_query()
    ))
    .await
}

pub async fn fetch_bodegas() -> Result<Vec<Bodega>, ApiError> {
    get_json("/bodegas").await
}
