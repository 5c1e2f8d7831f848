use serde::{Deserialize, Serialize};

crate::entity_id!(
    /// Id of a ledger account (`GET /plan-cuentas/list-flat`)
    CuentaId
);

/// Ledger account from the flattened chart of accounts (PUC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuentaContable {
    pub id: CuentaId,
    pub codigo: String,
    pub nombre: String,
    /// Only auxiliary (leaf) accounts accept movements
    #[serde(default = "default_true")]
    pub acepta_movimiento: bool,
}

fn default_true() -> bool {
    true
}

impl CuentaContable {
    pub fn etiqueta(&self) -> String {
        format!("{} {}", self.codigo, self.nombre)
    }
}

/// Accounts matching `texto`, code prefix matches first, then name matches.
/// Only accounts that accept movements are returned.
pub fn buscar_cuenta<'a>(cuentas: &'a [CuentaContable], texto: &str) -> Vec<&'a CuentaContable> {
    let texto = texto.trim().to_lowercase();
    let movibles = cuentas.iter().filter(|c| c.acepta_movimiento);
    if texto.is_empty() {
        return movibles.collect();
    }

    let (mut por_codigo, mut por_nombre): (Vec<_>, Vec<_>) = movibles
        .filter(|c| c.codigo.starts_with(&texto) || c.nombre.to_lowercase().contains(&texto))
        .partition(|c| c.codigo.starts_with(&texto));
    por_codigo.sort_by(|a, b| a.codigo.cmp(&b.codigo));
    por_nombre.sort_by(|a, b| a.codigo.cmp(&b.codigo));
    por_codigo.extend(por_nombre);
    por_codigo
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cuenta(id: i64, codigo: &str, nombre: &str, mov: bool) -> CuentaContable {
        CuentaContable {
            id: CuentaId(id),
            codigo: codigo.into(),
            nombre: nombre.into(),
            acepta_movimiento: mov,
        }
    }

    #[test]
    fn test_buscar_cuenta_prefers_code_prefix() {
        let cuentas = vec![
            cuenta(1, "1105", "Caja", false),
            cuenta(2, "110505", "Caja general", true),
            cuenta(3, "130505", "Clientes nacionales", true),
            cuenta(4, "220505", "Proveedores nacionales", true),
        ];
        let r: Vec<_> = buscar_cuenta(&cuentas, "1105").iter().map(|c| c.id).collect();
        assert_eq!(r, vec![CuentaId(2)]);

        let r: Vec<_> = buscar_cuenta(&cuentas, "nacionales").iter().map(|c| c.id).collect();
        assert_eq!(r, vec![CuentaId(3), CuentaId(4)]);
    }

    #[test]
    fn test_buscar_cuenta_empty_returns_leaf_accounts() {
        let cuentas = vec![cuenta(1, "11", "Disponible", false), cuenta(2, "110505", "Caja", true)];
        assert_eq!(buscar_cuenta(&cuentas, "  ").len(), 1);
    }
}
