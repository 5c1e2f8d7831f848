use crate::shared::http::get_json;
use contracts::domain::a005_centro_costo::CentroCosto;
use contracts::shared::api_error::ApiError;

pub async fn fetch_centros_costo() -> Result<Vec<CentroCosto>, ApiError> {
    get_json("/centros-costo/get-flat").await
}
