//! Keyboard focus routing for the journal-entry form.
//!
//! The form is a linear sequence of fields whose shape depends on the visible
//! sections and on the number of rows. `Enter` moves to the next available
//! field; when nothing is left the save button receives focus.

use crate::domain::a002_tipo_documento::Secciones;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    TipoDocumento,
    Numero,
    Fecha,
    Beneficiario,
    CentroCosto,
    BodegaOrigen,
    BodegaDestino,
    MontoAplicar,
    Aplicacion(usize),
    Cuenta(usize),
    Concepto(usize),
    Debito(usize),
    Credito(usize),
    Guardar,
}

const PREFIX: &str = "doc-";

impl FieldId {
    /// Stable DOM id of the control bound to this field.
    pub fn dom_id(&self) -> String {
        match self {
            FieldId::TipoDocumento => format!("{PREFIX}tipo"),
            FieldId::Numero => format!("{PREFIX}numero"),
            FieldId::Fecha => format!("{PREFIX}fecha"),
            FieldId::Beneficiario => format!("{PREFIX}beneficiario"),
            FieldId::CentroCosto => format!("{PREFIX}centro-costo"),
            FieldId::BodegaOrigen => format!("{PREFIX}bodega-origen"),
            FieldId::BodegaDestino => format!("{PREFIX}bodega-destino"),
            FieldId::MontoAplicar => format!("{PREFIX}monto-aplicar"),
            FieldId::Aplicacion(i) => format!("{PREFIX}aplicacion-{i}"),
            FieldId::Cuenta(i) => format!("{PREFIX}cuenta-{i}"),
            FieldId::Concepto(i) => format!("{PREFIX}concepto-{i}"),
            FieldId::Debito(i) => format!("{PREFIX}debito-{i}"),
            FieldId::Credito(i) => format!("{PREFIX}credito-{i}"),
            FieldId::Guardar => format!("{PREFIX}guardar"),
        }
    }

    /// Enter and Tab on the save button keep their native behavior, so
    /// focus can leave the form.
    pub fn is_routed(&self) -> bool {
        *self != FieldId::Guardar
    }
}

/// Linear field order for the current shape of the form.
pub fn build_field_order(secciones: &Secciones, filas: usize, facturas: usize) -> Vec<FieldId> {
    let mut order = vec![
        FieldId::TipoDocumento,
        FieldId::Numero,
        FieldId::Fecha,
        FieldId::Beneficiario,
        FieldId::CentroCosto,
    ];
    if secciones.bodegas {
        order.push(FieldId::BodegaOrigen);
        order.push(FieldId::BodegaDestino);
    }
    if secciones.monto_aplicar {
        order.push(FieldId::MontoAplicar);
    }
    if secciones.facturas_pendientes {
        order.extend((0..facturas).map(FieldId::Aplicacion));
    }
    for i in 0..filas {
        order.extend([
            FieldId::Cuenta(i),
            FieldId::Concepto(i),
            FieldId::Debito(i),
            FieldId::Credito(i),
        ]);
    }
    order.push(FieldId::Guardar);
    order
}

/// Next field after `current` accepted by `is_available` (enabled and visible).
/// Falls back to `Guardar` when the scan runs off the end or `current` is not
/// part of the order.
pub fn next_focus(
    order: &[FieldId],
    current: FieldId,
    is_available: impl Fn(FieldId) -> bool,
) -> FieldId {
    let Some(pos) = order.iter().position(|f| *f == current) else {
        return FieldId::Guardar;
    };
    order[pos + 1..]
        .iter()
        .copied()
        .find(|f| *f == FieldId::Guardar || is_available(*f))
        .unwrap_or(FieldId::Guardar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_tipo_documento::{Parte, WorkflowState};

    #[test]
    fn test_dom_ids_are_distinct() {
        let fields = [
            FieldId::TipoDocumento,
            FieldId::CentroCosto,
            FieldId::MontoAplicar,
            FieldId::Aplicacion(3),
            FieldId::Cuenta(3),
            FieldId::Concepto(3),
            FieldId::Debito(3),
            FieldId::Credito(3),
            FieldId::Credito(4),
            FieldId::Guardar,
        ];
        let ids: std::collections::HashSet<String> = fields.iter().map(FieldId::dom_id).collect();
        assert_eq!(ids.len(), fields.len());
        assert_eq!(FieldId::Concepto(12).dom_id(), "doc-concepto-12");
    }

    #[test]
    fn test_save_button_is_not_routed() {
        assert!(!FieldId::Guardar.is_routed());
        assert!(FieldId::Credito(0).is_routed());
        assert!(FieldId::TipoDocumento.is_routed());
    }

    #[test]
    fn test_order_follows_visible_sections() {
        let contable = build_field_order(&WorkflowState::Contable.secciones(), 1, 5);
        assert!(!contable.contains(&FieldId::MontoAplicar));
        assert!(!contable.contains(&FieldId::Aplicacion(0)));
        assert_eq!(contable.last(), Some(&FieldId::Guardar));

        let pago = build_field_order(&WorkflowState::Pago(Parte::Cliente).secciones(), 1, 2);
        let pos_monto = pago.iter().position(|f| *f == FieldId::MontoAplicar).unwrap();
        assert_eq!(pago[pos_monto + 1], FieldId::Aplicacion(0));
        assert_eq!(pago[pos_monto + 2], FieldId::Aplicacion(1));
        assert_eq!(pago[pos_monto + 3], FieldId::Cuenta(0));
    }

    #[test]
    fn test_next_focus_skips_unavailable() {
        let order = build_field_order(&WorkflowState::Contable.secciones(), 2, 0);
        // Centro de costo disabled
        let next = next_focus(&order, FieldId::Beneficiario, |f| f != FieldId::CentroCosto);
        assert_eq!(next, FieldId::Cuenta(0));

        let next = next_focus(&order, FieldId::Credito(0), |_| true);
        assert_eq!(next, FieldId::Cuenta(1));
    }

    #[test]
    fn test_next_focus_falls_back_to_save() {
        let order = build_field_order(&WorkflowState::Contable.secciones(), 1, 0);
        assert_eq!(next_focus(&order, FieldId::Credito(0), |_| true), FieldId::Guardar);
        assert_eq!(next_focus(&order, FieldId::Debito(0), |_| false), FieldId::Guardar);
        assert_eq!(next_focus(&order, FieldId::Aplicacion(4), |_| true), FieldId::Guardar);
    }
}
