//! Application of a payment/receipt amount to a partner's pending invoices.

use super::balance::{format_amount, parse_amount, TOLERANCIA};
use crate::domain::a004_plan_cuentas::CuentaId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Row of `GET /documentos/facturas-pendientes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacturaPendiente {
    pub id: i64,
    pub numero: String,
    #[serde(default)]
    pub fecha: Option<NaiveDate>,
    #[serde(default)]
    pub vencimiento: Option<NaiveDate>,
    pub saldo: f64,
}

/// Typed amounts per pending invoice, keyed by invoice id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aplicaciones {
    valores: BTreeMap<i64, String>,
}

impl Aplicaciones {
    pub fn get(&self, factura_id: i64) -> &str {
        self.valores.get(&factura_id).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, factura_id: i64, valor: impl Into<String>) {
        let valor = valor.into();
        if valor.trim().is_empty() {
            self.valores.remove(&factura_id);
        } else {
            self.valores.insert(factura_id, valor);
        }
    }

    pub fn clear(&mut self) {
        self.valores.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.valores.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.valores.values().map(|v| parse_amount(v)).sum()
    }

    /// Applied total excluding one invoice.
    fn total_sin(&self, factura_id: i64) -> f64 {
        self.valores
            .iter()
            .filter(|(id, _)| **id != factura_id)
            .map(|(_, v)| parse_amount(v))
            .sum()
    }

    /// Non-zero applications in invoice order.
    pub fn to_requests(&self, facturas: &[FacturaPendiente]) -> Vec<super::AplicacionRequest> {
        facturas
            .iter()
            .filter_map(|f| {
                let valor = parse_amount(self.get(f.id));
                (valor != 0.0).then_some(super::AplicacionRequest {
                    factura_id: f.id,
                    valor,
                })
            })
            .collect()
    }
}

/// Commit to invoice `indice` the smaller of its balance and what is left of
/// `monto` after the other applications. Returns the assigned amount, or
/// `None` when nothing remains to apply (the field is left untouched).
pub fn asignar(
    facturas: &[FacturaPendiente],
    aplicaciones: &mut Aplicaciones,
    monto: f64,
    indice: usize,
) -> Option<f64> {
    let factura = facturas.get(indice)?;
    let restante = monto - aplicaciones.total_sin(factura.id);
    if restante < TOLERANCIA {
        return None;
    }
    let valor = factura.saldo.min(restante);
    if valor < TOLERANCIA {
        return None;
    }
    aplicaciones.set(factura.id, format_amount(valor));
    Some(valor)
}

/// Accounts the two auto-generated balancing lines are posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuentasBalanceo {
    pub debito: CuentaId,
    pub credito: CuentaId,
}

/// The pair of lines that carries an applied total: full amount debited to
/// one configured account and credited to the other.
pub fn movimientos_balanceo(total: f64, cuentas: CuentasBalanceo) -> [(CuentaId, f64, f64); 2] {
    [(cuentas.debito, total, 0.0), (cuentas.credito, 0.0, total)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facturas() -> Vec<FacturaPendiente> {
        vec![
            FacturaPendiente {
                id: 1,
                numero: "FV-1".into(),
                fecha: None,
                vencimiento: None,
                saldo: 500.0,
            },
            FacturaPendiente {
                id: 2,
                numero: "FV-2".into(),
                fecha: None,
                vencimiento: None,
                saldo: 300.0,
            },
        ]
    }

    #[test]
    fn test_sequential_allocation() {
        let facturas = facturas();
        let mut apl = Aplicaciones::default();
        assert_eq!(asignar(&facturas, &mut apl, 700.0, 0), Some(500.0));
        assert_eq!(asignar(&facturas, &mut apl, 700.0, 1), Some(200.0));
        assert_eq!(apl.get(1), "500");
        assert_eq!(apl.get(2), "200");
        assert_eq!(apl.total(), 700.0);
    }

    #[test]
    fn test_nothing_left_to_apply() {
        let facturas = facturas();
        let mut apl = Aplicaciones::default();
        apl.set(1, "500");
        assert_eq!(asignar(&facturas, &mut apl, 500.0, 1), None);
        assert_eq!(apl.get(2), "");
        assert_eq!(asignar(&facturas, &mut apl, 500.0, 9), None);
    }

    #[test]
    fn test_reassign_ignores_own_previous_value() {
        let facturas = facturas();
        let mut apl = Aplicaciones::default();
        apl.set(2, "300");
        apl.set(1, "50");
        assert_eq!(asignar(&facturas, &mut apl, 400.0, 0), Some(100.0));
        assert_eq!(apl.total(), 400.0);
    }

    #[test]
    fn test_requests_skip_zero() {
        let facturas = facturas();
        let mut apl = Aplicaciones::default();
        apl.set(2, "120.5");
        apl.set(1, "0");
        let req = apl.to_requests(&facturas);
        assert_eq!(req.len(), 1);
        assert_eq!(req[0].factura_id, 2);
        assert_eq!(req[0].valor, 120.5);
    }

    #[test]
    fn test_movimientos_balanceo() {
        let cuentas = CuentasBalanceo {
            debito: CuentaId(110505),
            credito: CuentaId(130505),
        };
        let [d, c] = movimientos_balanceo(700.0, cuentas);
        assert_eq!(d, (CuentaId(110505), 700.0, 0.0));
        assert_eq!(c, (CuentaId(130505), 0.0, 700.0));
    }
}
