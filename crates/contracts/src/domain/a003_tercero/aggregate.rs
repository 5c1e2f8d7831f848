use serde::{Deserialize, Serialize};

crate::entity_id!(
    /// Id of a business partner (`GET /terceros`)
    TerceroId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoTercero {
    Cliente,
    Proveedor,
    Empleado,
    #[default]
    #[serde(other)]
    Otro,
}

/// Business partner: customer, supplier or employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tercero {
    pub id: TerceroId,
    /// NIT or cédula, without verification digit
    pub nit: String,
    #[serde(default)]
    pub digito_verificacion: Option<String>,
    pub nombre: String,
    #[serde(default)]
    pub tipo: TipoTercero,
}

impl Tercero {
    pub fn documento(&self) -> String {
        match self.digito_verificacion.as_deref().filter(|dv| !dv.is_empty()) {
            Some(dv) => format!("{}-{}", self.nit, dv),
            None => self.nit.clone(),
        }
    }

    pub fn etiqueta(&self) -> String {
        format!("{} · {}", self.documento(), self.nombre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etiqueta_with_dv() {
        let t = Tercero {
            id: TerceroId(1),
            nit: "900123456".into(),
            digito_verificacion: Some("7".into()),
            nombre: "Ferretería El Tornillo SAS".into(),
            tipo: TipoTercero::Proveedor,
        };
        assert_eq!(t.etiqueta(), "900123456-7 · Ferretería El Tornillo SAS");
    }

    #[test]
    fn test_tipo_defaults() {
        let t: Tercero =
            serde_json::from_str(r#"{"id": 9, "nit": "1020", "nombre": "Ana"}"#).unwrap();
        assert_eq!(t.tipo, TipoTercero::Otro);
        assert_eq!(t.documento(), "1020");
    }
}
