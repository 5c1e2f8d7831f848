use serde::{Deserialize, Serialize};

/// Invoice line. Percentages are whole numbers (`19.0` for 19 % IVA).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineaFactura {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producto_id: Option<i64>,
    pub descripcion: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
    #[serde(default)]
    pub descuento_pct: f64,
    #[serde(default)]
    pub iva_pct: f64,
}

impl Default for LineaFactura {
    fn default() -> Self {
        Self {
            producto_id: None,
            descripcion: String::new(),
            cantidad: 1.0,
            precio_unitario: 0.0,
            descuento_pct: 0.0,
            iva_pct: 19.0,
        }
    }
}

impl LineaFactura {
    pub fn bruto(&self) -> f64 {
        self.cantidad * self.precio_unitario
    }

    pub fn descuento(&self) -> f64 {
        self.bruto() * self.descuento_pct / 100.0
    }

    /// Taxable base after discount.
    pub fn base(&self) -> f64 {
        self.bruto() - self.descuento()
    }

    pub fn iva(&self) -> f64 {
        self.base() * self.iva_pct / 100.0
    }

    pub fn total(&self) -> f64 {
        self.base() + self.iva()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TotalesFactura {
    pub subtotal: f64,
    pub descuento: f64,
    pub iva: f64,
    pub total: f64,
}

/// Totals shown under the invoice grid, rounded to cents.
///
/// `total = subtotal - descuento + iva`; the backend recomputes taxes on save.
pub fn calcular_totales_factura(lineas: &[LineaFactura]) -> TotalesFactura {
    let mut t = lineas.iter().fold(TotalesFactura::default(), |acc, l| TotalesFactura {
        subtotal: acc.subtotal + l.bruto(),
        descuento: acc.descuento + l.descuento(),
        iva: acc.iva + l.iva(),
        total: 0.0,
    });
    t.subtotal = redondear(t.subtotal);
    t.descuento = redondear(t.descuento);
    t.iva = redondear(t.iva);
    t.total = redondear(t.subtotal - t.descuento + t.iva);
    t
}

fn redondear(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linea(cantidad: f64, precio: f64, descuento: f64, iva: f64) -> LineaFactura {
        LineaFactura {
            descripcion: "Tornillo".into(),
            cantidad,
            precio_unitario: precio,
            descuento_pct: descuento,
            iva_pct: iva,
            ..LineaFactura::default()
        }
    }

    #[test]
    fn test_totales_with_discount_and_iva() {
        let lineas = vec![linea(2.0, 50000.0, 10.0, 19.0), linea(1.0, 20000.0, 0.0, 0.0)];
        let t = calcular_totales_factura(&lineas);
        assert_eq!(t.subtotal, 120000.0);
        assert_eq!(t.descuento, 10000.0);
        // (100000 - 10000) * 19 %
        assert_eq!(t.iva, 17100.0);
        assert_eq!(t.total, 127100.0);
    }

    #[test]
    fn test_totales_empty() {
        assert_eq!(calcular_totales_factura(&[]), TotalesFactura::default());
    }

    #[test]
    fn test_totales_round_to_cents() {
        let t = calcular_totales_factura(&[linea(3.0, 0.333, 0.0, 19.0)]);
        assert_eq!(t.subtotal, 1.0);
        assert_eq!(t.iva, 0.19);
        assert_eq!(t.total, 1.19);
    }
}
