use crate::domain::a004_plan_cuentas::CuentaId;
use serde::{Deserialize, Serialize};

crate::entity_id!(
    /// Id of a document type (`GET /tipos-documento`)
    TipoDocumentoId
);

/// Special behaviour tag attached to a document type.
///
/// Unknown tags coming from the backend fall back to `Ninguna`, so a new tag
/// degrades to a plain journal entry instead of breaking the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuncionEspecial {
    CarteraCliente,
    RcCliente,
    CxpProveedor,
    PagoProveedor,
    DocumentoSoporte,
    TrasladoInventario,
    #[default]
    #[serde(other)]
    Ninguna,
}

impl FuncionEspecial {
    pub fn etiqueta(&self) -> &'static str {
        match self {
            FuncionEspecial::CarteraCliente => "Cartera cliente",
            FuncionEspecial::RcCliente => "Recibo de caja",
            FuncionEspecial::CxpProveedor => "Cuenta por pagar",
            FuncionEspecial::PagoProveedor => "Pago a proveedor",
            FuncionEspecial::DocumentoSoporte => "Documento soporte",
            FuncionEspecial::TrasladoInventario => "Traslado de inventario",
            FuncionEspecial::Ninguna => "Contable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipoDocumento {
    pub id: TipoDocumentoId,
    pub codigo: String,
    pub nombre: String,
    #[serde(default)]
    pub funcion_especial: Option<FuncionEspecial>,
    /// Account pre-filled on the debit side for special workflows
    #[serde(default)]
    pub cuenta_debito_id: Option<CuentaId>,
    /// Account pre-filled on the credit side for special workflows
    #[serde(default)]
    pub cuenta_credito_id: Option<CuentaId>,
    /// The backend assigns the number when true
    #[serde(default)]
    pub consecutivo_automatico: bool,
}

impl TipoDocumento {
    pub fn funcion(&self) -> FuncionEspecial {
        self.funcion_especial.unwrap_or_default()
    }

    pub fn etiqueta(&self) -> String {
        format!("{} - {}", self.codigo, self.nombre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funcion_especial_tags() {
        let json = r#"{"id": 3, "codigo": "RC", "nombre": "Recibo de caja",
                       "funcion_especial": "rc_cliente", "cuenta_debito_id": 110505,
                       "cuenta_credito_id": 130505}"#;
        let tipo: TipoDocumento = serde_json::from_str(json).unwrap();
        assert_eq!(tipo.funcion(), FuncionEspecial::RcCliente);
        assert_eq!(tipo.cuenta_debito_id, Some(CuentaId(110505)));
        assert!(!tipo.consecutivo_automatico);
    }

    #[test]
    fn test_unknown_or_missing_tag_is_ninguna() {
        let tipo: TipoDocumento = serde_json::from_str(
            r#"{"id": 1, "codigo": "X", "nombre": "X", "funcion_especial": "nomina_electronica"}"#,
        )
        .unwrap();
        assert_eq!(tipo.funcion(), FuncionEspecial::Ninguna);

        let tipo: TipoDocumento = serde_json::from_str(
            r#"{"id": 2, "codigo": "CC", "nombre": "Comprobante", "funcion_especial": null}"#,
        )
        .unwrap();
        assert_eq!(tipo.funcion(), FuncionEspecial::Ninguna);
    }
}
