//! Document-type driven workflow of the journal-entry form.
//!
//! The selected type's `funcion_especial` picks one of a closed set of states;
//! each state decides which optional sections render. Selecting a type is the
//! only transition besides clearing it, and it always resets the dependent
//! fields (pending invoices, applications, configured accounts).

use super::aggregate::FuncionEspecial;

/// Business partner side of a receivable/payable workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parte {
    Cliente,
    Proveedor,
}

impl Parte {
    /// Value of the `tipo` query parameter for pending-invoice lookups.
    pub fn as_query(&self) -> &'static str {
        match self {
            Parte::Cliente => "cliente",
            Parte::Proveedor => "proveedor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkflowState {
    #[default]
    SinTipo,
    /// Plain journal entry
    Contable,
    /// Invoice/receivable or payable creation with pre-filled accounts
    Causacion(Parte),
    /// Payment or receipt applied against pending invoices
    Pago(Parte),
    /// Support document that can be transmitted to DIAN
    Soporte,
    /// Inventory transfer between warehouses
    Traslado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    TipoSeleccionado(FuncionEspecial),
    TipoLimpiado,
}

/// Optional sections of the form visible in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Secciones {
    pub monto_aplicar: bool,
    pub facturas_pendientes: bool,
    pub bodegas: bool,
    pub beneficiario_requerido: bool,
    pub cuentas_preconfiguradas: bool,
    pub emision_dian: bool,
}

impl WorkflowState {
    /// State entered when a type carrying `funcion` is selected.
    pub fn para(funcion: FuncionEspecial) -> Self {
        match funcion {
            FuncionEspecial::Ninguna => WorkflowState::Contable,
            FuncionEspecial::CarteraCliente => WorkflowState::Causacion(Parte::Cliente),
            FuncionEspecial::CxpProveedor => WorkflowState::Causacion(Parte::Proveedor),
            FuncionEspecial::RcCliente => WorkflowState::Pago(Parte::Cliente),
            FuncionEspecial::PagoProveedor => WorkflowState::Pago(Parte::Proveedor),
            FuncionEspecial::DocumentoSoporte => WorkflowState::Soporte,
            FuncionEspecial::TrasladoInventario => WorkflowState::Traslado,
        }
    }

    pub fn transition(self, event: WorkflowEvent) -> Self {
        match event {
            WorkflowEvent::TipoSeleccionado(funcion) => WorkflowState::para(funcion),
            WorkflowEvent::TipoLimpiado => WorkflowState::SinTipo,
        }
    }

    pub fn secciones(&self) -> Secciones {
        match self {
            WorkflowState::SinTipo | WorkflowState::Contable => Secciones::default(),
            WorkflowState::Causacion(_) => Secciones {
                beneficiario_requerido: true,
                cuentas_preconfiguradas: true,
                ..Secciones::default()
            },
            WorkflowState::Pago(_) => Secciones {
                monto_aplicar: true,
                facturas_pendientes: true,
                beneficiario_requerido: true,
                cuentas_preconfiguradas: true,
                ..Secciones::default()
            },
            WorkflowState::Soporte => Secciones {
                beneficiario_requerido: true,
                emision_dian: true,
                ..Secciones::default()
            },
            WorkflowState::Traslado => Secciones {
                bodegas: true,
                ..Secciones::default()
            },
        }
    }

    /// Partner whose pending invoices must be fetched once a beneficiary is chosen.
    pub fn parte_pago(&self) -> Option<Parte> {
        match self {
            WorkflowState::Pago(parte) => Some(*parte),
            _ => None,
        }
    }

    /// Documents in these states are posted to `/traslados-inventario`
    /// instead of `/documentos`.
    pub fn es_traslado(&self) -> bool {
        matches!(self, WorkflowState::Traslado)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_maps_to_a_state() {
        let casos = [
            (FuncionEspecial::Ninguna, WorkflowState::Contable),
            (FuncionEspecial::CarteraCliente, WorkflowState::Causacion(Parte::Cliente)),
            (FuncionEspecial::CxpProveedor, WorkflowState::Causacion(Parte::Proveedor)),
            (FuncionEspecial::RcCliente, WorkflowState::Pago(Parte::Cliente)),
            (FuncionEspecial::PagoProveedor, WorkflowState::Pago(Parte::Proveedor)),
            (FuncionEspecial::DocumentoSoporte, WorkflowState::Soporte),
            (FuncionEspecial::TrasladoInventario, WorkflowState::Traslado),
        ];
        for (funcion, esperado) in casos {
            let estado = WorkflowState::SinTipo.transition(WorkflowEvent::TipoSeleccionado(funcion));
            assert_eq!(estado, esperado, "{:?}", funcion);
        }
    }

    #[test]
    fn test_reselect_and_clear() {
        let estado = WorkflowState::Pago(Parte::Cliente)
            .transition(WorkflowEvent::TipoSeleccionado(FuncionEspecial::Ninguna));
        assert_eq!(estado, WorkflowState::Contable);
        assert_eq!(
            estado.transition(WorkflowEvent::TipoLimpiado),
            WorkflowState::SinTipo
        );
    }

    #[test]
    fn test_sections_only_for_payment_types() {
        let pago = WorkflowState::Pago(Parte::Proveedor).secciones();
        assert!(pago.monto_aplicar && pago.facturas_pendientes && pago.beneficiario_requerido);

        let causacion = WorkflowState::Causacion(Parte::Cliente).secciones();
        assert!(!causacion.monto_aplicar);
        assert!(causacion.cuentas_preconfiguradas);

        assert!(WorkflowState::Traslado.secciones().bodegas);
        assert!(WorkflowState::Soporte.secciones().emision_dian);
        assert_eq!(WorkflowState::Contable.secciones(), Secciones::default());
    }

    #[test]
    fn test_parte_pago() {
        assert_eq!(
            WorkflowState::Pago(Parte::Proveedor).parte_pago(),
            Some(Parte::Proveedor)
        );
        assert_eq!(WorkflowState::Causacion(Parte::Cliente).parte_pago(), None);
    }
}
