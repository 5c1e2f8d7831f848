use crate::shared::http::get_json;
use contracts::domain::a004_plan_cuentas::CuentaContable;
use contracts::shared::api_error::ApiError;

/// Whole chart of accounts, flattened; filtered client side.
pub async fn fetch_cuentas() -> Result<Vec<CuentaContable>, ApiError> {
    get_json("/plan-cuentas/list-flat").await
}
