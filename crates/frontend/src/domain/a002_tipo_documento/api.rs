use crate::shared::http::get_json;
use contracts::domain::a002_tipo_documento::TipoDocumento;
use contracts::shared::api_error::ApiError;

pub async fn fetch_tipos_documento() -> Result<Vec<TipoDocumento>, ApiError> {
    get_json("/tipos-documento").await
}
