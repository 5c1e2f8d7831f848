use crate::shared::http::get_json;
use contracts::domain::a003_tercero::{Tercero, TerceroId};
use contracts::shared::api_error::ApiError;

/// `GET /terceros?q=` matches NIT or name on the backend.
pub async fn buscar_terceros(q: &str) -> Result<Vec<Tercero>, ApiError> {
    get_json(&format!("/terceros?q={}", urlencoding::encode(q))).await
}

pub async fn fetch_tercero(id: TerceroId) -> Result<Tercero, ApiError> {
    get_json(&format!("/terceros/{}", id)).await
}
