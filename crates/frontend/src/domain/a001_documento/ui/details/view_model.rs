use crate::domain::a001_documento::api;
use crate::domain::a002_tipo_documento::api as tipos_api;
use crate::domain::a003_tercero::api as terceros_api;
use crate::domain::a004_plan_cuentas::api as cuentas_api;
use crate::domain::a005_centro_costo::api as centros_api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabKey;
use crate::shared::date_utils::today_input_value;
use crate::shared::focus::{focus_field, focus_field_deferred};
use contracts::domain::a001_documento::form::{DocumentoForm, Efecto, FormAction};
use contracts::domain::a001_documento::{Bodega, DocumentoId, DocumentoSaved};
use contracts::domain::a002_tipo_documento::{TipoDocumento, TipoDocumentoId};
use contracts::domain::a003_tercero::Tercero;
use contracts::domain::a004_plan_cuentas::CuentaContable;
use contracts::domain::a005_centro_costo::CentroCosto;
use contracts::domain::common::AggregateId;
use contracts::shared::focus::FieldId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::KeyboardEvent;

/// ViewModel of the journal-entry form.
///
/// All form data lives in one `DocumentoForm`; inputs dispatch
/// [`FormAction`]s and never mutate fields directly.
#[derive(Clone, Copy)]
pub struct DocumentoDetailsViewModel {
    pub form: RwSignal<DocumentoForm>,
    pub tipos: RwSignal<Vec<TipoDocumento>>,
    pub cuentas: RwSignal<Vec<CuentaContable>>,
    pub centros: RwSignal<Vec<CentroCosto>>,
    pub bodegas: RwSignal<Vec<Bodega>>,
    /// Text shown in the beneficiary picker for the current selection
    pub beneficiario_label: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    /// Generation of the last pending-invoice request; older answers are dropped
    facturas_gen: StoredValue<u64>,
}

impl DocumentoDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(DocumentoForm::new(today_input_value())),
            tipos: RwSignal::new(Vec::new()),
            cuentas: RwSignal::new(Vec::new()),
            centros: RwSignal::new(Vec::new()),
            bodegas: RwSignal::new(Vec::new()),
            beneficiario_label: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            saving: RwSignal::new(false),
            facturas_gen: StoredValue::new(0),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    /// Load master data, then the document itself when editing.
    pub fn load(&self, id: Option<DocumentoId>) {
        let this = *self;
        let tabs = use_context::<AppGlobalContext>();

        spawn_local(async move {
            match cuentas_api::fetch_cuentas().await {
                Ok(list) => this.cuentas.set(list),
                Err(e) => this.fail("Plan de cuentas", e.user_message()),
            }
        });
        spawn_local(async move {
            match centros_api::fetch_centros_costo().await {
                Ok(list) => this.centros.set(list),
                Err(e) => this.fail("Centros de costo", e.user_message()),
            }
        });
        spawn_local(async move {
            match api::fetch_bodegas().await {
                Ok(list) => this.bodegas.set(list),
                // Only transfers need warehouses
                Err(e) => log::warn!("bodegas unavailable: {}", e),
            }
        });

        spawn_local(async move {
            let tipos = match tipos_api::fetch_tipos_documento().await {
                Ok(list) => list,
                Err(e) => {
                    this.fail("Tipos de documento", e.user_message());
                    return;
                }
            };
            this.tipos.set(tipos.clone());

            let Some(id) = id else {
                focus_field_deferred(FieldId::TipoDocumento);
                return;
            };
            match api::fetch_documento(id).await {
                Ok(detalle) => {
                    let tipo = tipos
                        .iter()
                        .find(|t| t.id == detalle.tipo_documento_id)
                        .cloned();
                    let beneficiario = detalle.beneficiario_id;
                    if let Some(tabs) = tabs {
                        tabs.update_tab_title(
                            &TabKey::DocumentoDetail(id).key(),
                            &format!("Documento · {}", detalle.numero),
                        );
                    }
                    log::info!("documento {} loaded ({} movimientos)", id, detalle.movimientos.len());
                    this.dispatch(FormAction::Cargar { detalle, tipo });
                    if let Some(tercero_id) = beneficiario {
                        match terceros_api::fetch_tercero(tercero_id).await {
                            Ok(t) => this.beneficiario_label.set(t.etiqueta()),
                            Err(e) => {
                                log::warn!("tercero {} lookup failed: {}", tercero_id, e);
                                this.beneficiario_label.set(tercero_id.to_string());
                            }
                        }
                    }
                }
                Err(e) if e.is_not_found() => {
                    log::warn!("documento {} not found", id);
                    this.error.set(Some(format!("El documento {} ya no existe", id)));
                }
                Err(e) => this.fail("Documento", e.user_message()),
            }
        });
    }

    fn fail(&self, what: &str, message: String) {
        log::error!("{} load failed: {}", what, message);
        self.error.set(Some(format!("Error cargando {}: {}", what.to_lowercase(), message)));
    }

    /// Feed one action to the form reducer and run the effect it asks for.
    pub fn dispatch(&self, action: FormAction) {
        if matches!(
            action,
            FormAction::SeleccionarTipo(_)
                | FormAction::SeleccionarBeneficiario(_)
                | FormAction::Cargar { .. }
                | FormAction::Reset
        ) {
            // Any pending-invoice answer in flight is now for a stale selection
            self.facturas_gen.update_value(|g| *g += 1);
        }
        if let Some(Some(efecto)) = self.form.try_update(|f| f.apply(action)) {
            self.run(efecto);
        }
    }

    fn run(&self, efecto: Efecto) {
        match efecto {
            Efecto::CargarFacturas {
                tercero_id,
                tipo_documento_id,
                parte,
            } => {
                let generation = self.facturas_gen.get_value();
                let this = *self;
                spawn_local(async move {
                    let result =
                        api::fetch_facturas_pendientes(tercero_id, tipo_documento_id, parte).await;
                    if this.facturas_gen.try_get_value() != Some(generation) {
                        log::debug!("stale pending-invoice response dropped");
                        return;
                    }
                    match result {
                        Ok(facturas) => {
                            log::debug!("{} facturas pendientes for tercero {}", facturas.len(), tercero_id);
                            this.dispatch(FormAction::FacturasCargadas {
                                tercero_id,
                                tipo_documento_id,
                                facturas,
                            });
                        }
                        Err(e) => {
                            log::warn!("facturas-pendientes failed: {}", e);
                            this.error.set(Some(e.user_message()));
                        }
                    }
                });
            }
        }
    }

    pub fn seleccionar_tipo(&self, raw_id: &str) {
        let tipo = self.tipos.with_untracked(|tipos| {
            TipoDocumentoId::from_string(raw_id)
                .ok()
                .and_then(|id| tipos.iter().find(|t| t.id == id).cloned())
        });
        self.dispatch(FormAction::SeleccionarTipo(tipo));
    }

    pub fn seleccionar_beneficiario(&self, tercero: Option<Tercero>) {
        self.beneficiario_label
            .set(tercero.as_ref().map(Tercero::etiqueta).unwrap_or_default());
        self.dispatch(FormAction::SeleccionarBeneficiario(tercero.map(|t| t.id)));
    }

    pub fn agregar_fila(&self) {
        self.dispatch(FormAction::AgregarFila);
        let last = self.form.with_untracked(|f| f.filas.len().saturating_sub(1));
        focus_field_deferred(FieldId::Cuenta(last));
    }

    /// Keyboard routing for every control of the form.
    pub fn handle_key(&self, field: FieldId, ev: &KeyboardEvent) {
        if ev.shift_key() || ev.ctrl_key() || ev.alt_key() || !field.is_routed() {
            return;
        }
        match ev.key().as_str() {
            "Enter" => {
                ev.prevent_default();
                let next = self.form.with_untracked(|f| f.enter_from(field));
                focus_field(next);
            }
            "Tab" => {
                let next = self
                    .cuentas
                    .with_untracked(|cuentas| self.form.try_update(|f| f.tab_from(field, cuentas)));
                if let Some(next) = next {
                    ev.prevent_default();
                    // Tab may have generated rows or filled values
                    focus_field_deferred(next);
                }
            }
            _ => {}
        }
    }

    pub fn save_command(&self) {
        if self.saving.get_untracked() {
            return;
        }
        self.notice.set(None);
        let (request, id, traslado) = match self.form.with_untracked(|f| {
            f.validate().map(|req| (req, f.id, f.workflow.es_traslado()))
        }) {
            Ok(parts) => parts,
            Err(e) => {
                log::debug!("documento rejected client-side: {:?}", e);
                self.error.set(Some(e.to_string()));
                return;
            }
        };
        self.error.set(None);
        self.saving.set(true);

        let this = *self;
        spawn_local(async move {
            let result = match id {
                Some(id) => api::update_documento(id, &request).await,
                None if traslado => api::create_traslado(&request).await,
                None => api::create_documento(&request).await,
            };
            this.saving.set(false);
            match result {
                Ok(saved) => this.on_saved(saved, id.is_some()),
                Err(e) => {
                    log::error!("documento save failed: {}", e);
                    this.error.set(Some(e.user_message()));
                }
            }
        });
    }

    fn on_saved(&self, saved: DocumentoSaved, edited: bool) {
        let numero = saved.numero.unwrap_or_else(|| saved.id.to_string());
        log::info!("documento {} saved as {}", saved.id, numero);
        if edited {
            self.notice.set(Some(format!("Documento {} actualizado", numero)));
            return;
        }
        self.notice.set(Some(format!("Documento {} creado", numero)));
        self.beneficiario_label.set(String::new());
        self.dispatch(FormAction::Reset);
        focus_field_deferred(FieldId::TipoDocumento);
    }
}
