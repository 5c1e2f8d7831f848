use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::entity_id!(
    /// Id of a production recipe
    RecetaId
);

crate::entity_id!(
    /// Id of a production order
    OrdenId
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsumoReceta {
    pub producto: String,
    pub cantidad: f64,
    #[serde(default)]
    pub unidad: String,
}

/// Row of `GET /produccion/recetas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receta {
    pub id: RecetaId,
    pub codigo: String,
    pub nombre: String,
    /// Finished product
    pub producto: String,
    /// Units produced by one batch of `insumos`
    pub cantidad_base: f64,
    #[serde(default)]
    pub insumos: Vec<InsumoReceta>,
}

impl Receta {
    pub fn etiqueta(&self) -> String {
        format!("{} - {}", self.codigo, self.nombre)
    }

    /// Inputs required to produce `cantidad` units.
    pub fn escalar(&self, cantidad: f64) -> Vec<InsumoReceta> {
        let factor = if self.cantidad_base > 0.0 {
            cantidad / self.cantidad_base
        } else {
            0.0
        };
        self.insumos
            .iter()
            .map(|i| InsumoReceta {
                cantidad: i.cantidad * factor,
                ..i.clone()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoOrden {
    #[default]
    Borrador,
    EnProceso,
    Cerrada,
    Anulada,
}

impl EstadoOrden {
    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstadoOrden::Borrador => "Borrador",
            EstadoOrden::EnProceso => "En proceso",
            EstadoOrden::Cerrada => "Cerrada",
            EstadoOrden::Anulada => "Anulada",
        }
    }
}

/// Row of `GET /produccion/ordenes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdenProduccion {
    pub id: OrdenId,
    pub numero: String,
    pub receta_id: RecetaId,
    #[serde(default)]
    pub receta: String,
    pub cantidad: f64,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub estado: EstadoOrden,
    #[serde(default)]
    pub archivada: bool,
}

/// Body of `POST /produccion/ordenes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdenRequest {
    pub receta_id: RecetaId,
    pub cantidad: f64,
    pub fecha: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccionOrden {
    /// Consume the recipe inputs from inventory
    Consumir,
    Cerrar,
    Anular,
    Archivar,
}

impl AccionOrden {
    pub fn segmento(&self) -> &'static str {
        match self {
            AccionOrden::Consumir => "consumir",
            AccionOrden::Cerrar => "cerrar",
            AccionOrden::Anular => "anular",
            AccionOrden::Archivar => "archivar",
        }
    }

    /// `POST` target of the action.
    pub fn path(&self, id: OrdenId) -> String {
        format!("/produccion/ordenes/{}/{}", id, self.segmento())
    }

    pub fn etiqueta(&self) -> &'static str {
        match self {
            AccionOrden::Consumir => "Consumir",
            AccionOrden::Cerrar => "Cerrar",
            AccionOrden::Anular => "Anular",
            AccionOrden::Archivar => "Archivar",
        }
    }

    /// Irreversible actions ask the user before running.
    pub fn requiere_confirmacion(&self) -> bool {
        matches!(self, AccionOrden::Anular | AccionOrden::Archivar)
    }
}

/// Actions offered for an order in its current state.
pub fn acciones_permitidas(orden: &OrdenProduccion) -> Vec<AccionOrden> {
    if orden.archivada {
        return Vec::new();
    }
    match orden.estado {
        EstadoOrden::Borrador => vec![AccionOrden::Consumir, AccionOrden::Anular],
        EstadoOrden::EnProceso => vec![AccionOrden::Cerrar, AccionOrden::Anular],
        EstadoOrden::Cerrada | EstadoOrden::Anulada => vec![AccionOrden::Archivar],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orden(estado: EstadoOrden, archivada: bool) -> OrdenProduccion {
        OrdenProduccion {
            id: OrdenId(12),
            numero: "OP-12".into(),
            receta_id: RecetaId(1),
            receta: "Pan tajado".into(),
            cantidad: 50.0,
            fecha: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            estado,
            archivada,
        }
    }

    #[test]
    fn test_acciones_por_estado() {
        assert_eq!(
            acciones_permitidas(&orden(EstadoOrden::Borrador, false)),
            vec![AccionOrden::Consumir, AccionOrden::Anular]
        );
        assert_eq!(
            acciones_permitidas(&orden(EstadoOrden::EnProceso, false)),
            vec![AccionOrden::Cerrar, AccionOrden::Anular]
        );
        assert_eq!(
            acciones_permitidas(&orden(EstadoOrden::Anulada, false)),
            vec![AccionOrden::Archivar]
        );
        assert!(acciones_permitidas(&orden(EstadoOrden::Cerrada, true)).is_empty());
    }

    #[test]
    fn test_accion_path() {
        assert_eq!(AccionOrden::Cerrar.path(OrdenId(12)), "/produccion/ordenes/12/cerrar");
    }

    #[test]
    fn test_escalar_receta() {
        let receta = Receta {
            id: RecetaId(1),
            codigo: "R-01".into(),
            nombre: "Pan tajado".into(),
            producto: "Pan tajado 500g".into(),
            cantidad_base: 10.0,
            insumos: vec![InsumoReceta {
                producto: "Harina".into(),
                cantidad: 4.0,
                unidad: "kg".into(),
            }],
        };
        let insumos = receta.escalar(25.0);
        assert_eq!(insumos[0].cantidad, 10.0);
        assert_eq!(insumos[0].unidad, "kg");
    }

    #[test]
    fn test_orden_estado_from_json() {
        let o: OrdenProduccion = serde_json::from_str(
            r#"{"id": 5, "numero": "OP-5", "receta_id": 1, "cantidad": 10,
                "fecha": "2026-10-01", "estado": "en_proceso"}"#,
        )
        .unwrap();
        assert_eq!(o.estado, EstadoOrden::EnProceso);
        assert!(!o.archivada);
    }
}
