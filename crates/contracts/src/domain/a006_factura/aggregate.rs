use super::totales::LineaFactura;
use crate::domain::a001_documento::{DocumentoId, EstadoDian};
use crate::domain::a003_tercero::TerceroId;
use crate::domain::a005_centro_costo::CentroCostoId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of the business the invoice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipoFactura {
    Venta,
    Compra,
}

impl TipoFactura {
    pub fn endpoint(&self) -> &'static str {
        match self {
            TipoFactura::Venta => "/facturacion/",
            TipoFactura::Compra => "/compras/",
        }
    }

    pub fn titulo(&self) -> &'static str {
        match self {
            TipoFactura::Venta => "Factura de venta",
            TipoFactura::Compra => "Factura de compra",
        }
    }

    pub fn etiqueta_tercero(&self) -> &'static str {
        match self {
            TipoFactura::Venta => "Cliente",
            TipoFactura::Compra => "Proveedor",
        }
    }
}

/// Adjustment note issued against an existing invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotaTipo {
    Credito,
    Debito,
}

impl NotaTipo {
    pub fn etiqueta(&self) -> &'static str {
        match self {
            NotaTipo::Credito => "Nota crédito",
            NotaTipo::Debito => "Nota débito",
        }
    }
}

/// Body of `POST /facturacion/` and `POST /compras/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacturaRequest {
    pub tercero_id: TerceroId,
    pub fecha: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_vencimiento: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centro_costo_id: Option<CentroCostoId>,
    /// Supplier's own invoice number, purchases only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_proveedor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    pub lineas: Vec<LineaFactura>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nota_tipo: Option<NotaTipo>,
    /// Invoice being adjusted when `nota_tipo` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documento_referencia_id: Option<DocumentoId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacturaSaved {
    pub id: DocumentoId,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
}

/// Response of `POST /fe/emitir/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmisionRespuesta {
    pub estado: EstadoDian,
    #[serde(default)]
    pub cufe: Option<String>,
    #[serde(default)]
    pub mensaje: Option<String>,
}

impl EmisionRespuesta {
    pub fn resumen(&self) -> String {
        match (&self.estado, &self.cufe, &self.mensaje) {
            (EstadoDian::Aceptado, Some(cufe), _) => format!("Aceptado por la DIAN. CUFE {}", cufe),
            (EstadoDian::Aceptado, None, _) => "Aceptado por la DIAN".to_string(),
            (_, _, Some(m)) if !m.is_empty() => m.clone(),
            (estado, _, _) => format!("Estado DIAN: {:?}", estado),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FacturaError {
    #[error("La factura debe tener al menos una línea")]
    SinLineas,
    #[error("Línea {0}: la cantidad debe ser mayor que cero")]
    CantidadInvalida(usize),
    #[error("Línea {0}: el precio no puede ser negativo")]
    PrecioNegativo(usize),
    #[error("Línea {0}: los porcentajes deben estar entre 0 y 100")]
    PorcentajeInvalido(usize),
    #[error("La fecha de vencimiento es anterior a la fecha de la factura")]
    VencimientoAnterior,
    #[error("Seleccione la factura a la que se aplica la nota")]
    ReferenciaRequerida,
}

/// Client-side checks before `POST`. Line numbers in errors are 1-based.
pub fn validar_factura(req: &FacturaRequest) -> Result<(), FacturaError> {
    if req.lineas.is_empty() {
        return Err(FacturaError::SinLineas);
    }
    for (i, l) in req.lineas.iter().enumerate() {
        let n = i + 1;
        if l.cantidad <= 0.0 {
            return Err(FacturaError::CantidadInvalida(n));
        }
        if l.precio_unitario < 0.0 {
            return Err(FacturaError::PrecioNegativo(n));
        }
        let rango = 0.0..=100.0;
        if !rango.contains(&l.descuento_pct) || !rango.contains(&l.iva_pct) {
            return Err(FacturaError::PorcentajeInvalido(n));
        }
    }
    if matches!(req.fecha_vencimiento, Some(v) if v < req.fecha) {
        return Err(FacturaError::VencimientoAnterior);
    }
    if req.nota_tipo.is_some() && req.documento_referencia_id.is_none() {
        return Err(FacturaError::ReferenciaRequerida);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> FacturaRequest {
        FacturaRequest {
            tercero_id: TerceroId(8),
            fecha: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            fecha_vencimiento: None,
            centro_costo_id: None,
            numero_proveedor: None,
            observaciones: None,
            lineas: vec![LineaFactura {
                descripcion: "Servicio".into(),
                precio_unitario: 1000.0,
                ..LineaFactura::default()
            }],
            nota_tipo: None,
            documento_referencia_id: None,
        }
    }

    #[test]
    fn test_validar_ok() {
        assert_eq!(validar_factura(&request()), Ok(()));
    }

    #[test]
    fn test_validar_lines() {
        let mut req = request();
        req.lineas[0].cantidad = 0.0;
        assert_eq!(validar_factura(&req), Err(FacturaError::CantidadInvalida(1)));

        let mut req = request();
        req.lineas[0].iva_pct = 119.0;
        assert_eq!(validar_factura(&req), Err(FacturaError::PorcentajeInvalido(1)));

        let mut req = request();
        req.lineas.clear();
        assert_eq!(validar_factura(&req), Err(FacturaError::SinLineas));
    }

    #[test]
    fn test_nota_requires_reference() {
        let mut req = request();
        req.nota_tipo = Some(NotaTipo::Credito);
        assert_eq!(validar_factura(&req), Err(FacturaError::ReferenciaRequerida));
        req.documento_referencia_id = Some(DocumentoId(31));
        assert_eq!(validar_factura(&req), Ok(()));

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["nota_tipo"], "credito");
        assert_eq!(json["documento_referencia_id"], 31);
    }

    #[test]
    fn test_vencimiento_before_fecha() {
        let mut req = request();
        req.fecha_vencimiento = NaiveDate::from_ymd_opt(2026, 10, 1);
        assert_eq!(validar_factura(&req), Err(FacturaError::VencimientoAnterior));
    }

    #[test]
    fn test_emision_resumen() {
        let r: EmisionRespuesta =
            serde_json::from_str(r#"{"estado": "aceptado", "cufe": "abc123"}"#).unwrap();
        assert_eq!(r.resumen(), "Aceptado por la DIAN. CUFE abc123");
        let r: EmisionRespuesta =
            serde_json::from_str(r#"{"estado": "rechazado", "mensaje": "NIT inválido"}"#).unwrap();
        assert_eq!(r.resumen(), "NIT inválido");
    }
}
