//! Journal-entry form state.
//!
//! The whole form is one value; every user action is a [`FormAction`] fed to
//! [`DocumentoForm::apply`]. Actions that need data from the backend return an
//! [`Efecto`] for the caller to run. Keyboard routing (`tab_from`,
//! `enter_from`) lives here too because Tab may also edit the form.

use super::aggregate::{BodegaId, DocumentoDetalle, DocumentoId, DocumentoRequest, Movimiento};
use super::aplicacion::{self, Aplicaciones, CuentasBalanceo, FacturaPendiente};
use super::balance::{self, calcular_totales, format_amount, parse_amount, Totales};
use crate::domain::a002_tipo_documento::{
    Parte, TipoDocumento, TipoDocumentoId, WorkflowEvent, WorkflowState,
};
use crate::domain::a003_tercero::TerceroId;
use crate::domain::a004_plan_cuentas::{CuentaContable, CuentaId};
use crate::domain::a005_centro_costo::CentroCostoId;
use crate::shared::focus::{build_field_order, next_focus, FieldId};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrigenFila {
    #[default]
    Manual,
    /// Generated from the applied total of a payment document
    Aplicacion,
}

/// A ledger line as typed by the user; amounts stay text until submit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilaMovimiento {
    pub cuenta_id: Option<CuentaId>,
    pub concepto: String,
    pub debito: String,
    pub credito: String,
    pub origen: OrigenFila,
}

impl FilaMovimiento {
    pub fn con_cuenta(cuenta_id: Option<CuentaId>) -> Self {
        Self {
            cuenta_id,
            ..Self::default()
        }
    }

    pub fn sin_importe(&self) -> bool {
        parse_amount(&self.debito) == 0.0 && parse_amount(&self.credito) == 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SeleccionarTipo(Option<TipoDocumento>),
    SetNumero(String),
    SetFecha(String),
    SeleccionarBeneficiario(Option<TerceroId>),
    SetCentroCosto(Option<CentroCostoId>),
    SetBodegaOrigen(Option<BodegaId>),
    SetBodegaDestino(Option<BodegaId>),
    SetMontoAplicar(String),
    /// Pending invoices fetched for `tercero_id` under `tipo_documento_id`;
    /// ignored when the form has moved on to another beneficiary or type
    FacturasCargadas {
        tercero_id: TerceroId,
        tipo_documento_id: TipoDocumentoId,
        facturas: Vec<FacturaPendiente>,
    },
    SetAplicacion { factura_id: i64, valor: String },
    AgregarFila,
    EliminarFila(usize),
    SetCuenta { fila: usize, cuenta_id: Option<CuentaId> },
    SetConcepto { fila: usize, texto: String },
    SetDebito { fila: usize, valor: String },
    SetCredito { fila: usize, valor: String },
    /// Load an existing document for editing; `tipo` is looked up by the caller
    Cargar {
        detalle: DocumentoDetalle,
        tipo: Option<TipoDocumento>,
    },
    /// Clear the form after a successful save, keeping type and date
    Reset,
}

/// Side effect requested by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Efecto {
    CargarFacturas {
        tercero_id: TerceroId,
        tipo_documento_id: TipoDocumentoId,
        parte: Parte,
    },
}

/// What the pending-invoice area of a payment document shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VistaFacturas {
    SinBeneficiario,
    SinPendientes,
    Tabla,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentoError {
    #[error("Seleccione el tipo de documento")]
    TipoRequerido,
    #[error("Ingrese el número del documento")]
    NumeroRequerido,
    #[error("La fecha «{0}» no es válida")]
    FechaInvalida(String),
    #[error("Seleccione el tercero beneficiario")]
    BeneficiarioRequerido,
    #[error("Seleccione las bodegas de origen y destino")]
    BodegasRequeridas,
    #[error("La bodega de origen y destino deben ser diferentes")]
    BodegasIguales,
    #[error("Ingrese el monto a pagar")]
    MontoAplicarRequerido,
    #[error("Fila {fila}: seleccione la cuenta contable")]
    CuentaRequerida { fila: usize },
    #[error("El documento no tiene movimientos")]
    SinMovimientos,
    #[error("El documento no está balanceado: débito {debito:.2}, crédito {credito:.2}")]
    Desbalanceado { debito: f64, credito: f64 },
    #[error("El total del documento debe ser mayor que cero")]
    SumaCero,
    #[error("El total aplicado ({aplicado:.2}) no coincide con el monto a pagar ({monto:.2})")]
    AplicacionDescuadrada { aplicado: f64, monto: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentoForm {
    /// Set when editing a persisted document (`PUT /documentos/{id}`)
    pub id: Option<DocumentoId>,
    pub tipo: Option<TipoDocumento>,
    pub workflow: WorkflowState,
    pub numero: String,
    /// `YYYY-MM-DD`, as produced by `<input type="date">`
    pub fecha: String,
    pub beneficiario_id: Option<TerceroId>,
    pub centro_costo_id: Option<CentroCostoId>,
    pub bodega_origen_id: Option<BodegaId>,
    pub bodega_destino_id: Option<BodegaId>,
    pub monto_aplicar: String,
    pub facturas: Vec<FacturaPendiente>,
    pub aplicaciones: Aplicaciones,
    pub filas: Vec<FilaMovimiento>,
}

impl DocumentoForm {
    pub fn new(fecha: impl Into<String>) -> Self {
        Self {
            id: None,
            tipo: None,
            workflow: WorkflowState::SinTipo,
            numero: String::new(),
            fecha: fecha.into(),
            beneficiario_id: None,
            centro_costo_id: None,
            bodega_origen_id: None,
            bodega_destino_id: None,
            monto_aplicar: String::new(),
            facturas: Vec::new(),
            aplicaciones: Aplicaciones::default(),
            filas: vec![FilaMovimiento::default()],
        }
    }

    // === Derived values ===

    pub fn totales(&self) -> Totales {
        calcular_totales(
            self.filas
                .iter()
                .map(|f| (f.debito.as_str(), f.credito.as_str())),
        )
    }

    pub fn esta_balanceado(&self) -> bool {
        self.totales().esta_balanceado()
    }

    pub fn total_aplicado(&self) -> f64 {
        self.aplicaciones.total()
    }

    /// Depends only on the beneficiary and the loaded invoices, so typing
    /// amounts never changes it.
    pub fn vista_facturas(&self) -> VistaFacturas {
        if self.beneficiario_id.is_none() {
            VistaFacturas::SinBeneficiario
        } else if self.facturas.is_empty() {
            VistaFacturas::SinPendientes
        } else {
            VistaFacturas::Tabla
        }
    }

    pub fn numero_automatico(&self) -> bool {
        self.tipo
            .as_ref()
            .map(|t| t.consecutivo_automatico)
            .unwrap_or(false)
    }

    fn cuentas_balanceo(&self) -> Option<CuentasBalanceo> {
        let tipo = self.tipo.as_ref()?;
        Some(CuentasBalanceo {
            debito: tipo.cuenta_debito_id?,
            credito: tipo.cuenta_credito_id?,
        })
    }

    // === Reducer ===

    pub fn apply(&mut self, action: FormAction) -> Option<Efecto> {
        match action {
            FormAction::SeleccionarTipo(tipo) => {
                let event = match &tipo {
                    Some(t) => WorkflowEvent::TipoSeleccionado(t.funcion()),
                    None => WorkflowEvent::TipoLimpiado,
                };
                self.workflow = self.workflow.transition(event);
                self.tipo = tipo;
                if self.numero_automatico() {
                    self.numero.clear();
                }
                self.reset_dependientes();
                return self.efecto_facturas();
            }
            FormAction::SetNumero(numero) => self.numero = numero,
            FormAction::SetFecha(fecha) => self.fecha = fecha,
            FormAction::SeleccionarBeneficiario(tercero) => {
                self.beneficiario_id = tercero;
                self.facturas.clear();
                self.aplicaciones.clear();
                self.sync_balanceo();
                return self.efecto_facturas();
            }
            FormAction::SetCentroCosto(cc) => self.centro_costo_id = cc,
            FormAction::SetBodegaOrigen(b) => self.bodega_origen_id = b,
            FormAction::SetBodegaDestino(b) => self.bodega_destino_id = b,
            FormAction::SetMontoAplicar(monto) => self.monto_aplicar = monto,
            FormAction::FacturasCargadas {
                tercero_id,
                tipo_documento_id,
                facturas,
            } => {
                let vigente = self.workflow.parte_pago().is_some()
                    && self.beneficiario_id == Some(tercero_id)
                    && self.tipo.as_ref().map(|t| t.id) == Some(tipo_documento_id);
                if !vigente {
                    return None;
                }
                self.facturas = facturas;
                self.aplicaciones.clear();
                self.sync_balanceo();
            }
            FormAction::SetAplicacion { factura_id, valor } => {
                self.aplicaciones.set(factura_id, valor);
                self.sync_balanceo();
            }
            FormAction::AgregarFila => self.filas.push(FilaMovimiento::default()),
            FormAction::EliminarFila(i) => {
                if i < self.filas.len() {
                    self.filas.remove(i);
                }
                if self.filas.is_empty() && self.workflow.parte_pago().is_none() {
                    self.filas.push(FilaMovimiento::default());
                }
            }
            FormAction::SetCuenta { fila, cuenta_id } => {
                if let Some(f) = self.filas.get_mut(fila) {
                    f.cuenta_id = cuenta_id;
                }
            }
            FormAction::SetConcepto { fila, texto } => {
                if let Some(f) = self.filas.get_mut(fila) {
                    f.concepto = texto;
                }
            }
            FormAction::SetDebito { fila, valor } => {
                if let Some(f) = self.filas.get_mut(fila) {
                    if !valor.trim().is_empty() {
                        f.credito.clear();
                    }
                    f.debito = valor;
                }
            }
            FormAction::SetCredito { fila, valor } => {
                if let Some(f) = self.filas.get_mut(fila) {
                    if !valor.trim().is_empty() {
                        f.debito.clear();
                    }
                    f.credito = valor;
                }
            }
            FormAction::Cargar { detalle, tipo } => {
                *self = DocumentoForm::new(detalle.fecha.format("%Y-%m-%d").to_string());
                self.workflow = self.workflow.transition(match &tipo {
                    Some(t) => WorkflowEvent::TipoSeleccionado(t.funcion()),
                    None => WorkflowEvent::TipoLimpiado,
                });
                self.tipo = tipo;
                self.id = Some(detalle.id);
                self.numero = detalle.numero;
                self.beneficiario_id = detalle.beneficiario_id;
                self.centro_costo_id = detalle.centro_costo_id;
                self.filas = detalle
                    .movimientos
                    .into_iter()
                    .map(|m| FilaMovimiento {
                        cuenta_id: Some(m.cuenta_id),
                        concepto: m.concepto,
                        debito: importe_texto(m.debito),
                        credito: importe_texto(m.credito),
                        origen: OrigenFila::Manual,
                    })
                    .collect();
                if self.filas.is_empty() {
                    self.filas.push(FilaMovimiento::default());
                }
            }
            FormAction::Reset => {
                let tipo = self.tipo.take();
                let fecha = std::mem::take(&mut self.fecha);
                *self = DocumentoForm::new(fecha);
                return self.apply(FormAction::SeleccionarTipo(tipo));
            }
        }
        None
    }

    /// Selecting a type wipes everything that depended on the previous one.
    fn reset_dependientes(&mut self) {
        self.monto_aplicar.clear();
        self.facturas.clear();
        self.aplicaciones.clear();
        self.bodega_origen_id = None;
        self.bodega_destino_id = None;

        let secciones = self.workflow.secciones();
        self.filas = match (&self.workflow, &self.tipo) {
            (WorkflowState::Pago(_), _) => Vec::new(),
            (WorkflowState::Causacion(_), Some(tipo)) if secciones.cuentas_preconfiguradas => {
                vec![
                    FilaMovimiento::con_cuenta(tipo.cuenta_debito_id),
                    FilaMovimiento::con_cuenta(tipo.cuenta_credito_id),
                ]
            }
            _ => vec![FilaMovimiento::default()],
        };
        self.sync_balanceo();
    }

    fn efecto_facturas(&self) -> Option<Efecto> {
        let parte = self.workflow.parte_pago()?;
        Some(Efecto::CargarFacturas {
            tercero_id: self.beneficiario_id?,
            tipo_documento_id: self.tipo.as_ref()?.id,
            parte,
        })
    }

    /// Keep the two generated lines of a payment document in step with the
    /// applied total; manual lines are never touched.
    fn sync_balanceo(&mut self) {
        if self.workflow.parte_pago().is_none() {
            return;
        }
        self.filas.retain(|f| f.origen != OrigenFila::Aplicacion);

        let total = self.aplicaciones.total();
        if total.abs() < balance::TOLERANCIA {
            return;
        }
        let concepto = self
            .tipo
            .as_ref()
            .map(|t| t.nombre.clone())
            .unwrap_or_default();
        let filas: Vec<FilaMovimiento> = match self.cuentas_balanceo() {
            Some(cuentas) => aplicacion::movimientos_balanceo(total, cuentas)
                .into_iter()
                .map(|(cuenta, debito, credito)| FilaMovimiento {
                    cuenta_id: Some(cuenta),
                    concepto: concepto.clone(),
                    debito: importe_texto(debito),
                    credito: importe_texto(credito),
                    origen: OrigenFila::Aplicacion,
                })
                .collect(),
            // Accounts not configured on the type: the user picks them.
            None => vec![
                FilaMovimiento {
                    debito: format_amount(total),
                    concepto: concepto.clone(),
                    origen: OrigenFila::Aplicacion,
                    ..FilaMovimiento::default()
                },
                FilaMovimiento {
                    credito: format_amount(total),
                    concepto,
                    origen: OrigenFila::Aplicacion,
                    ..FilaMovimiento::default()
                },
            ],
        };
        self.filas.splice(0..0, filas);
    }

    // === Keyboard routing ===

    pub fn field_order(&self) -> Vec<FieldId> {
        build_field_order(
            &self.workflow.secciones(),
            self.filas.len(),
            self.facturas.len(),
        )
    }

    /// Whether a field is enabled in the current state.
    pub fn is_available(&self, field: FieldId) -> bool {
        match field {
            FieldId::Numero => !self.numero_automatico(),
            FieldId::Aplicacion(i) => i < self.facturas.len(),
            FieldId::Cuenta(i) | FieldId::Concepto(i) | FieldId::Debito(i) | FieldId::Credito(i) => {
                i < self.filas.len()
            }
            _ => true,
        }
    }

    /// Target of `Enter` pressed on `field`.
    pub fn enter_from(&self, field: FieldId) -> FieldId {
        next_focus(&self.field_order(), field, |f| self.is_available(f))
    }

    /// Target of `Tab` pressed on `field`, applying the Tab shortcuts:
    /// - amount to pay / an application: commit the next pending invoice
    /// - empty concept: copy the account name
    /// - last row amount: fill the residual that balances the entry, then save
    pub fn tab_from(&mut self, field: FieldId, cuentas: &[CuentaContable]) -> FieldId {
        match field {
            FieldId::MontoAplicar if !self.facturas.is_empty() => {
                if self.aplicaciones.is_empty() {
                    self.asignar_factura(0);
                }
                FieldId::Aplicacion(0)
            }
            FieldId::Aplicacion(i) if i + 1 < self.facturas.len() => {
                let siguiente = self.facturas[i + 1].id;
                if self.aplicaciones.get(siguiente).trim().is_empty() {
                    self.asignar_factura(i + 1);
                }
                FieldId::Aplicacion(i + 1)
            }
            FieldId::Concepto(i) => {
                self.copiar_nombre_cuenta(i, cuentas);
                self.enter_from(field)
            }
            FieldId::Debito(i) | FieldId::Credito(i) if i + 1 == self.filas.len() => {
                if self.auto_balancear_ultima() {
                    FieldId::Guardar
                } else {
                    self.enter_from(field)
                }
            }
            _ => self.enter_from(field),
        }
    }

    fn asignar_factura(&mut self, indice: usize) {
        let monto = parse_amount(&self.monto_aplicar);
        if aplicacion::asignar(&self.facturas, &mut self.aplicaciones, monto, indice).is_some() {
            self.sync_balanceo();
        }
    }

    fn copiar_nombre_cuenta(&mut self, fila: usize, cuentas: &[CuentaContable]) {
        let Some(f) = self.filas.get_mut(fila) else {
            return;
        };
        if !f.concepto.trim().is_empty() {
            return;
        }
        if let Some(cuenta) = f
            .cuenta_id
            .and_then(|id| cuentas.iter().find(|c| c.id == id))
        {
            f.concepto = cuenta.nombre.clone();
        }
    }

    /// Fill the empty last row with whatever the other rows are missing.
    /// Returns false when there is nothing to fill.
    fn auto_balancear_ultima(&mut self) -> bool {
        let Some(last) = self.filas.len().checked_sub(1) else {
            return false;
        };
        if last == 0 || !self.filas[last].sin_importe() {
            return false;
        }
        let otras = calcular_totales(
            self.filas[..last]
                .iter()
                .map(|f| (f.debito.as_str(), f.credito.as_str())),
        );
        let diferencia = otras.diferencia();
        if balance::iguales(diferencia, 0.0) {
            return false;
        }
        let fila = &mut self.filas[last];
        if diferencia > 0.0 {
            fila.debito.clear();
            fila.credito = format_amount(diferencia);
        } else {
            fila.credito.clear();
            fila.debito = format_amount(-diferencia);
        }
        true
    }

    // === Submit ===

    /// Check every client-side rule and build the request body.
    pub fn validate(&self) -> Result<DocumentoRequest, DocumentoError> {
        let tipo = self.tipo.as_ref().ok_or(DocumentoError::TipoRequerido)?;
        let secciones = self.workflow.secciones();

        let numero = self.numero.trim();
        if numero.is_empty() && !tipo.consecutivo_automatico {
            return Err(DocumentoError::NumeroRequerido);
        }

        let fecha = NaiveDate::parse_from_str(self.fecha.trim(), "%Y-%m-%d")
            .map_err(|_| DocumentoError::FechaInvalida(self.fecha.clone()))?;

        if secciones.beneficiario_requerido && self.beneficiario_id.is_none() {
            return Err(DocumentoError::BeneficiarioRequerido);
        }

        if secciones.bodegas {
            match (self.bodega_origen_id, self.bodega_destino_id) {
                (Some(origen), Some(destino)) if origen == destino => {
                    return Err(DocumentoError::BodegasIguales)
                }
                (Some(_), Some(_)) => {}
                _ => return Err(DocumentoError::BodegasRequeridas),
            }
        }

        let mut monto_pagar = None;
        if secciones.monto_aplicar {
            let monto = parse_amount(&self.monto_aplicar);
            if monto <= 0.0 {
                return Err(DocumentoError::MontoAplicarRequerido);
            }
            let aplicado = self.aplicaciones.total();
            if !balance::iguales(aplicado, monto) {
                return Err(DocumentoError::AplicacionDescuadrada { aplicado, monto });
            }
            monto_pagar = Some(monto);
        }

        let mut movimientos = Vec::new();
        for (i, fila) in self.filas.iter().enumerate() {
            if fila.sin_importe() {
                continue;
            }
            let cuenta_id = fila
                .cuenta_id
                .ok_or(DocumentoError::CuentaRequerida { fila: i + 1 })?;
            movimientos.push(Movimiento {
                cuenta_id,
                concepto: fila.concepto.trim().to_string(),
                debito: parse_amount(&fila.debito),
                credito: parse_amount(&fila.credito),
                centro_costo_id: self.centro_costo_id,
                tercero_id: self.beneficiario_id,
            });
        }
        if movimientos.is_empty() {
            return Err(DocumentoError::SinMovimientos);
        }

        let totales = self.totales();
        if !balance::iguales(totales.debito, totales.credito) {
            return Err(DocumentoError::Desbalanceado {
                debito: totales.debito,
                credito: totales.credito,
            });
        }
        if totales.credito <= 0.0 {
            return Err(DocumentoError::SumaCero);
        }

        Ok(DocumentoRequest {
            tipo_documento_id: tipo.id,
            numero: (!numero.is_empty()).then(|| numero.to_string()),
            fecha,
            beneficiario_id: self.beneficiario_id,
            centro_costo_id: self.centro_costo_id,
            movimientos,
            aplicaciones: if secciones.facturas_pendientes {
                self.aplicaciones.to_requests(&self.facturas)
            } else {
                Vec::new()
            },
            monto_pagar,
            bodega_origen_id: self.bodega_origen_id,
            bodega_destino_id: self.bodega_destino_id,
        })
    }
}

fn importe_texto(valor: f64) -> String {
    if valor == 0.0 {
        String::new()
    } else {
        format_amount(valor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_tipo_documento::{FuncionEspecial, TipoDocumentoId};

    fn tipo(funcion: Option<FuncionEspecial>) -> TipoDocumento {
        TipoDocumento {
            id: TipoDocumentoId(10),
            codigo: "CC".into(),
            nombre: "Comprobante".into(),
            funcion_especial: funcion,
            cuenta_debito_id: Some(CuentaId(110505)),
            cuenta_credito_id: Some(CuentaId(130505)),
            consecutivo_automatico: false,
        }
    }

    fn cuentas() -> Vec<CuentaContable> {
        vec![
            CuentaContable {
                id: CuentaId(110505),
                codigo: "110505".into(),
                nombre: "Caja general".into(),
                acepta_movimiento: true,
            },
            CuentaContable {
                id: CuentaId(130505),
                codigo: "130505".into(),
                nombre: "Clientes nacionales".into(),
                acepta_movimiento: true,
            },
        ]
    }

    fn form_contable() -> DocumentoForm {
        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::SeleccionarTipo(Some(tipo(None))));
        form.apply(FormAction::SetNumero("CC-0001".into()));
        form
    }

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

    fn cargadas(tercero_id: TerceroId) -> FormAction {
        FormAction::FacturasCargadas {
            tercero_id,
            tipo_documento_id: TipoDocumentoId(10),
            facturas: facturas(),
        }
    }

    #[test]
    fn test_debit_clears_credit_and_back() {
        let mut form = form_contable();
        form.apply(FormAction::SetCredito { fila: 0, valor: "500".into() });
        form.apply(FormAction::SetDebito { fila: 0, valor: "200".into() });
        assert_eq!(form.filas[0].debito, "200");
        assert_eq!(form.filas[0].credito, "");

        form.apply(FormAction::SetCredito { fila: 0, valor: "75".into() });
        assert_eq!(form.filas[0].debito, "");
        assert_eq!(form.filas[0].credito, "75");

        // Clearing one side leaves the other alone
        form.apply(FormAction::SetDebito { fila: 0, valor: "".into() });
        assert_eq!(form.filas[0].credito, "75");
    }

    #[test]
    fn test_tab_on_last_row_auto_balances() {
        let mut form = form_contable();
        form.apply(FormAction::SetCuenta { fila: 0, cuenta_id: Some(CuentaId(110505)) });
        form.apply(FormAction::SetDebito { fila: 0, valor: "100000".into() });
        form.apply(FormAction::AgregarFila);
        form.apply(FormAction::SetCuenta { fila: 1, cuenta_id: Some(CuentaId(130505)) });
        form.apply(FormAction::SetDebito { fila: 1, valor: "0".into() });

        let next = form.tab_from(FieldId::Credito(1), &cuentas());
        assert_eq!(next, FieldId::Guardar);
        assert_eq!(parse_amount(&form.filas[1].debito), 0.0);
        assert_eq!(parse_amount(&form.filas[1].credito), 100000.0);
        assert!(form.esta_balanceado());
    }

    #[test]
    fn test_tab_on_last_row_with_amount_does_not_override() {
        let mut form = form_contable();
        form.apply(FormAction::SetDebito { fila: 0, valor: "100".into() });
        form.apply(FormAction::AgregarFila);
        form.apply(FormAction::SetCredito { fila: 1, valor: "40".into() });
        let next = form.tab_from(FieldId::Credito(1), &cuentas());
        assert_eq!(next, FieldId::Guardar);
        assert_eq!(form.filas[1].credito, "40");
        assert!(!form.esta_balanceado());
    }

    #[test]
    fn test_tab_on_concept_copies_account_name() {
        let mut form = form_contable();
        form.apply(FormAction::SetCuenta { fila: 0, cuenta_id: Some(CuentaId(130505)) });
        let next = form.tab_from(FieldId::Concepto(0), &cuentas());
        assert_eq!(form.filas[0].concepto, "Clientes nacionales");
        assert_eq!(next, FieldId::Debito(0));

        form.apply(FormAction::SetConcepto { fila: 0, texto: "Abono".into() });
        form.tab_from(FieldId::Concepto(0), &cuentas());
        assert_eq!(form.filas[0].concepto, "Abono");
    }

    #[test]
    fn test_enter_skips_automatic_number() {
        let mut t = tipo(None);
        t.consecutivo_automatico = true;
        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::SeleccionarTipo(Some(t)));
        assert_eq!(form.enter_from(FieldId::TipoDocumento), FieldId::Fecha);
    }

    #[test]
    fn test_payment_application_by_tab() {
        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::SeleccionarTipo(Some(tipo(Some(FuncionEspecial::RcCliente)))));
        let efecto = form.apply(FormAction::SeleccionarBeneficiario(Some(TerceroId(5))));
        assert_eq!(
            efecto,
            Some(Efecto::CargarFacturas {
                tercero_id: TerceroId(5),
                tipo_documento_id: TipoDocumentoId(10),
                parte: Parte::Cliente,
            })
        );
        form.apply(cargadas(TerceroId(5)));
        form.apply(FormAction::SetMontoAplicar("700".into()));

        assert_eq!(form.tab_from(FieldId::MontoAplicar, &[]), FieldId::Aplicacion(0));
        assert_eq!(form.tab_from(FieldId::Aplicacion(0), &[]), FieldId::Aplicacion(1));
        assert_eq!(form.aplicaciones.get(1), "500");
        assert_eq!(form.aplicaciones.get(2), "200");
        assert_eq!(form.total_aplicado(), 700.0);

        // Two generated lines carry the applied total
        assert_eq!(form.filas.len(), 2);
        assert_eq!(form.filas[0].cuenta_id, Some(CuentaId(110505)));
        assert_eq!(parse_amount(&form.filas[0].debito), 700.0);
        assert_eq!(form.filas[1].cuenta_id, Some(CuentaId(130505)));
        assert_eq!(parse_amount(&form.filas[1].credito), 700.0);
        assert!(form.esta_balanceado());

        form.apply(FormAction::SetNumero("RC-9".into()));
        let req = form.validate().unwrap();
        assert_eq!(req.aplicaciones.len(), 2);
        assert_eq!(req.monto_pagar, Some(700.0));
    }

    #[test]
    fn test_late_invoices_for_previous_beneficiary_are_ignored() {
        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::SeleccionarTipo(Some(tipo(Some(FuncionEspecial::RcCliente)))));
        form.apply(FormAction::SeleccionarBeneficiario(Some(TerceroId(5))));
        assert_eq!(form.apply(FormAction::SeleccionarBeneficiario(None)), None);
        form.apply(cargadas(TerceroId(5)));
        assert_eq!(form.beneficiario_id, None);
        assert!(form.facturas.is_empty());

        form.apply(FormAction::SeleccionarBeneficiario(Some(TerceroId(6))));
        form.apply(cargadas(TerceroId(5)));
        assert!(form.facturas.is_empty());
        form.apply(cargadas(TerceroId(6)));
        assert_eq!(form.facturas.len(), 2);
    }

    #[test]
    fn test_late_invoices_after_leaving_payment_type_are_ignored() {
        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::SeleccionarTipo(Some(tipo(Some(FuncionEspecial::RcCliente)))));
        form.apply(FormAction::SeleccionarBeneficiario(Some(TerceroId(5))));
        form.apply(FormAction::SeleccionarTipo(Some(tipo(None))));
        form.apply(cargadas(TerceroId(5)));
        assert!(form.facturas.is_empty());
        assert_eq!(form.filas.len(), 1);
    }

    #[test]
    fn test_invoice_area_ignores_typed_amounts() {
        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::SeleccionarTipo(Some(tipo(Some(FuncionEspecial::RcCliente)))));
        assert_eq!(form.vista_facturas(), VistaFacturas::SinBeneficiario);
        form.apply(FormAction::SeleccionarBeneficiario(Some(TerceroId(5))));
        assert_eq!(form.vista_facturas(), VistaFacturas::SinPendientes);
        form.apply(cargadas(TerceroId(5)));
        assert_eq!(form.vista_facturas(), VistaFacturas::Tabla);

        form.apply(FormAction::SetAplicacion { factura_id: 1, valor: "1".into() });
        form.apply(FormAction::SetAplicacion { factura_id: 1, valor: "12".into() });
        form.apply(FormAction::SetMontoAplicar("12".into()));
        assert_eq!(form.vista_facturas(), VistaFacturas::Tabla);
        assert_eq!(form.facturas, facturas());
    }

    #[test]
    fn test_payment_application_mismatch_is_rejected() {
        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::SeleccionarTipo(Some(tipo(Some(FuncionEspecial::PagoProveedor)))));
        form.apply(FormAction::SetNumero("CE-1".into()));
        form.apply(FormAction::SeleccionarBeneficiario(Some(TerceroId(5))));
        form.apply(cargadas(TerceroId(5)));
        form.apply(FormAction::SetMontoAplicar("700".into()));
        form.apply(FormAction::SetAplicacion { factura_id: 1, valor: "500".into() });
        assert!(matches!(
            form.validate(),
            Err(DocumentoError::AplicacionDescuadrada { .. })
        ));
        form.apply(FormAction::SetAplicacion { factura_id: 2, valor: "200.004".into() });
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_reselect_type_resets_dependents() {
        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::SeleccionarTipo(Some(tipo(Some(FuncionEspecial::RcCliente)))));
        form.apply(FormAction::SeleccionarBeneficiario(Some(TerceroId(5))));
        form.apply(cargadas(TerceroId(5)));
        form.apply(FormAction::SetAplicacion { factura_id: 1, valor: "100".into() });

        form.apply(FormAction::SeleccionarTipo(Some(tipo(Some(FuncionEspecial::CxpProveedor)))));
        assert_eq!(form.workflow, WorkflowState::Causacion(Parte::Proveedor));
        assert!(form.facturas.is_empty());
        assert!(form.aplicaciones.is_empty());
        assert_eq!(form.filas.len(), 2);
        assert_eq!(form.filas[0].cuenta_id, Some(CuentaId(110505)));
        assert_eq!(form.filas[1].cuenta_id, Some(CuentaId(130505)));
        // The beneficiary survives: it is a header field
        assert_eq!(form.beneficiario_id, Some(TerceroId(5)));
    }

    #[test]
    fn test_validate_unbalanced_and_zero() {
        let mut form = form_contable();
        form.apply(FormAction::SetCuenta { fila: 0, cuenta_id: Some(CuentaId(110505)) });
        form.apply(FormAction::SetDebito { fila: 0, valor: "100".into() });
        assert!(matches!(
            form.validate(),
            Err(DocumentoError::Desbalanceado { .. })
        ));

        let form = form_contable();
        assert_eq!(form.validate(), Err(DocumentoError::SinMovimientos));
    }

    #[test]
    fn test_validate_requires_account_on_rows_with_amount() {
        let mut form = form_contable();
        form.apply(FormAction::SetDebito { fila: 0, valor: "100".into() });
        form.apply(FormAction::AgregarFila);
        form.apply(FormAction::SetCuenta { fila: 1, cuenta_id: Some(CuentaId(130505)) });
        form.apply(FormAction::SetCredito { fila: 1, valor: "100".into() });
        assert_eq!(form.validate(), Err(DocumentoError::CuentaRequerida { fila: 1 }));
    }

    #[test]
    fn test_validate_builds_request() {
        let mut form = form_contable();
        form.apply(FormAction::SetCentroCosto(Some(CentroCostoId(3))));
        form.apply(FormAction::SetCuenta { fila: 0, cuenta_id: Some(CuentaId(110505)) });
        form.apply(FormAction::SetDebito { fila: 0, valor: "1500,50".into() });
        form.apply(FormAction::AgregarFila);
        form.apply(FormAction::SetCuenta { fila: 1, cuenta_id: Some(CuentaId(130505)) });
        form.apply(FormAction::SetCredito { fila: 1, valor: "1500.50".into() });
        form.apply(FormAction::AgregarFila);

        let req = form.validate().unwrap();
        assert_eq!(req.numero.as_deref(), Some("CC-0001"));
        assert_eq!(req.movimientos.len(), 2);
        assert_eq!(req.movimientos[0].debito, 1500.5);
        assert_eq!(req.movimientos[1].centro_costo_id, Some(CentroCostoId(3)));
        assert!(req.aplicaciones.is_empty());
    }

    #[test]
    fn test_validate_header_rules() {
        let form = DocumentoForm::new("2026-10-19");
        assert_eq!(form.validate(), Err(DocumentoError::TipoRequerido));

        let mut form = form_contable();
        form.apply(FormAction::SetFecha("19/10/2026".into()));
        assert!(matches!(form.validate(), Err(DocumentoError::FechaInvalida(_))));

        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::SeleccionarTipo(Some(tipo(Some(FuncionEspecial::TrasladoInventario)))));
        form.apply(FormAction::SetNumero("TR-1".into()));
        form.apply(FormAction::SetBodegaOrigen(Some(BodegaId(1))));
        assert_eq!(form.validate(), Err(DocumentoError::BodegasRequeridas));
        form.apply(FormAction::SetBodegaDestino(Some(BodegaId(1))));
        assert_eq!(form.validate(), Err(DocumentoError::BodegasIguales));

        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::SeleccionarTipo(Some(tipo(Some(FuncionEspecial::DocumentoSoporte)))));
        form.apply(FormAction::SetNumero("DS-1".into()));
        assert_eq!(form.validate(), Err(DocumentoError::BeneficiarioRequerido));
    }

    #[test]
    fn test_reset_keeps_type_and_date() {
        let mut form = form_contable();
        form.apply(FormAction::SetDebito { fila: 0, valor: "10".into() });
        form.apply(FormAction::Reset);
        assert_eq!(form.fecha, "2026-10-19");
        assert_eq!(form.tipo.as_ref().map(|t| t.id), Some(TipoDocumentoId(10)));
        assert_eq!(form.numero, "");
        assert_eq!(form.filas, vec![FilaMovimiento::default()]);
    }

    #[test]
    fn test_cargar_existing_document() {
        let detalle = DocumentoDetalle {
            id: DocumentoId(77),
            tipo_documento_id: TipoDocumentoId(10),
            numero: "CC-0042".into(),
            fecha: NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
            beneficiario_id: Some(TerceroId(5)),
            centro_costo_id: None,
            movimientos: vec![
                Movimiento {
                    cuenta_id: CuentaId(110505),
                    concepto: "Caja".into(),
                    debito: 250.0,
                    credito: 0.0,
                    centro_costo_id: None,
                    tercero_id: None,
                },
                Movimiento {
                    cuenta_id: CuentaId(130505),
                    concepto: "Cliente".into(),
                    debito: 0.0,
                    credito: 250.0,
                    centro_costo_id: None,
                    tercero_id: None,
                },
            ],
            estado: Default::default(),
        };
        let mut form = DocumentoForm::new("2026-10-19");
        form.apply(FormAction::Cargar {
            detalle,
            tipo: Some(tipo(None)),
        });
        assert_eq!(form.id, Some(DocumentoId(77)));
        assert_eq!(form.fecha, "2026-09-30");
        assert_eq!(form.filas[0].debito, "250");
        assert_eq!(form.filas[0].credito, "");
        assert!(form.esta_balanceado());
    }
}
