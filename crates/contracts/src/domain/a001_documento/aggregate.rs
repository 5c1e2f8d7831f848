use crate::domain::a002_tipo_documento::TipoDocumentoId;
use crate::domain::a003_tercero::TerceroId;
use crate::domain::a004_plan_cuentas::CuentaId;
use crate::domain::a005_centro_costo::CentroCostoId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::entity_id!(
    /// Id of a persisted accounting document
    DocumentoId
);

crate::entity_id!(
    /// Id of a warehouse used by inventory transfers
    BodegaId
);

/// Ledger line as sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movimiento {
    pub cuenta_id: CuentaId,
    pub concepto: String,
    pub debito: f64,
    pub credito: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centro_costo_id: Option<CentroCostoId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tercero_id: Option<TerceroId>,
}

/// Amount applied to a pending invoice by a payment/receipt document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AplicacionRequest {
    pub factura_id: i64,
    pub valor: f64,
}

/// Body of `POST /documentos`, `PUT /documentos/{id}` and
/// `POST /traslados-inventario`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentoRequest {
    pub tipo_documento_id: TipoDocumentoId,
    /// `None` lets the backend assign the next consecutive number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    pub fecha: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiario_id: Option<TerceroId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centro_costo_id: Option<CentroCostoId>,
    pub movimientos: Vec<Movimiento>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aplicaciones: Vec<AplicacionRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monto_pagar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodega_origen_id: Option<BodegaId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodega_destino_id: Option<BodegaId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoDocumento {
    #[default]
    Borrador,
    Contabilizado,
    Anulado,
    #[serde(other)]
    Desconocido,
}

impl EstadoDocumento {
    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstadoDocumento::Borrador => "Borrador",
            EstadoDocumento::Contabilizado => "Contabilizado",
            EstadoDocumento::Anulado => "Anulado",
            EstadoDocumento::Desconocido => "—",
        }
    }
}

/// DIAN transmission status of a document that supports electronic emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoDian {
    Pendiente,
    Enviado,
    Aceptado,
    Rechazado,
    #[serde(other)]
    Desconocido,
}

impl EstadoDian {
    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstadoDian::Pendiente => "Pendiente",
            EstadoDian::Enviado => "Enviado",
            EstadoDian::Aceptado => "Aceptado",
            EstadoDian::Rechazado => "Rechazado",
            EstadoDian::Desconocido => "Desconocido",
        }
    }
}

/// Row of `GET /documentos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentoListItem {
    pub id: DocumentoId,
    pub tipo_documento: String,
    #[serde(default)]
    pub tipo_documento_id: Option<TipoDocumentoId>,
    pub numero: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub beneficiario: Option<String>,
    pub total: f64,
    #[serde(default)]
    pub estado: EstadoDocumento,
    /// Present only for documents that can be sent to DIAN
    #[serde(default)]
    pub estado_dian: Option<EstadoDian>,
    #[serde(default)]
    pub impresion_solicitada: bool,
}

impl DocumentoListItem {
    pub fn puede_emitir(&self) -> bool {
        matches!(
            self.estado_dian,
            Some(EstadoDian::Pendiente) | Some(EstadoDian::Rechazado)
        ) && self.estado != EstadoDocumento::Anulado
    }
}

/// Full document as returned by `GET /documentos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentoDetalle {
    pub id: DocumentoId,
    pub tipo_documento_id: TipoDocumentoId,
    pub numero: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub beneficiario_id: Option<TerceroId>,
    #[serde(default)]
    pub centro_costo_id: Option<CentroCostoId>,
    #[serde(default)]
    pub movimientos: Vec<Movimiento>,
    #[serde(default)]
    pub estado: EstadoDocumento,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentoSaved {
    pub id: DocumentoId,
    #[serde(default)]
    pub numero: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bodega {
    pub id: BodegaId,
    pub nombre: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_empty_optionals() {
        let req = DocumentoRequest {
            tipo_documento_id: TipoDocumentoId(1),
            numero: None,
            fecha: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            beneficiario_id: None,
            centro_costo_id: None,
            movimientos: vec![],
            aplicaciones: vec![],
            monto_pagar: None,
            bodega_origen_id: None,
            bodega_destino_id: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["fecha"], "2026-10-19");
        assert!(json.get("numero").is_none());
        assert!(json.get("aplicaciones").is_none());
    }

    #[test]
    fn test_puede_emitir() {
        let mut item: DocumentoListItem = serde_json::from_str(
            r#"{"id": 4, "tipo_documento": "DS", "numero": "DS-12", "fecha": "2026-10-01",
                "total": 150000.0, "estado": "contabilizado", "estado_dian": "pendiente"}"#,
        )
        .unwrap();
        assert!(item.puede_emitir());
        item.estado_dian = Some(EstadoDian::Aceptado);
        assert!(!item.puede_emitir());
        item.estado_dian = None;
        assert!(!item.puede_emitir());
    }
}
