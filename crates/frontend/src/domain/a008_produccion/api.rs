//! HTTP calls for production orders.
use crate::shared::http::{get_json, post_empty, post_json};
use contracts::domain::a008_produccion::{AccionOrden, OrdenId, OrdenProduccion, OrdenRequest, Receta};
use contracts::shared::api_error::ApiError;

pub async fn fetch_recetas() -> Result<Vec<Receta>, ApiError> {
    get_json("/produccion/recetas").await
}

pub async fn fetch_ordenes() -> Result<Vec<OrdenProduccion>, ApiError> {
    get_json("/produccion/ordenes").await
}

pub async fn crear_orden(req: &OrdenRequest) -> Result<OrdenProduccion, ApiError> {
    post_json("/produccion/ordenes", req).await
}

/// Runs a state transition. The body is ignored; callers reload the list.
pub async fn ejecutar_accion(id: OrdenId, accion: AccionOrden) -> Result<(), ApiError> {
    post_empty::<serde_json::Value>(&accion.path(id)).await.map(|_| ())
}
