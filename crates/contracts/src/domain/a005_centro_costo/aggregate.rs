use serde::{Deserialize, Serialize};

crate::entity_id!(
    /// Id of a cost center (`GET /centros-costo/get-flat`)
    CentroCostoId
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroCosto {
    pub id: CentroCostoId,
    pub codigo: String,
    pub nombre: String,
}

impl CentroCosto {
    pub fn etiqueta(&self) -> String {
        format!("{} {}", self.codigo, self.nombre)
    }
}
