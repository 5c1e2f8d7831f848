use crate::domain::a005_centro_costo::api as centros_api;
use crate::domain::a006_factura::api;
use crate::shared::date_utils::today_input_value;
use chrono::NaiveDate;
use contracts::domain::a001_documento::{parse_amount, DocumentoId};
use contracts::domain::a003_tercero::{Tercero, TerceroId};
use contracts::domain::a005_centro_costo::{CentroCosto, CentroCostoId};
use contracts::domain::a006_factura::{
    calcular_totales_factura, validar_factura, FacturaRequest, FacturaSaved, LineaFactura,
    NotaTipo, TipoFactura, TotalesFactura,
};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Editable numeric column of an invoice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoLinea {
    Cantidad,
    Precio,
    Descuento,
    Iva,
}

#[derive(Clone, Copy)]
pub struct FacturaDetailsViewModel {
    pub tipo: TipoFactura,
    pub tercero_id: RwSignal<Option<TerceroId>>,
    pub tercero_label: RwSignal<String>,
    pub fecha: RwSignal<String>,
    pub vencimiento: RwSignal<String>,
    pub centro_costo_id: RwSignal<Option<CentroCostoId>>,
    pub numero_proveedor: RwSignal<String>,
    pub observaciones: RwSignal<String>,
    pub nota_tipo: RwSignal<Option<NotaTipo>>,
    /// Id of the invoice a note adjusts, as typed
    pub referencia: RwSignal<String>,
    pub lineas: RwSignal<Vec<LineaFactura>>,
    pub centros: RwSignal<Vec<CentroCosto>>,
    pub guardada: RwSignal<Option<FacturaSaved>>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl FacturaDetailsViewModel {
    pub fn new(tipo: TipoFactura) -> Self {
        Self {
            tipo,
            tercero_id: RwSignal::new(None),
            tercero_label: RwSignal::new(String::new()),
            fecha: RwSignal::new(today_input_value()),
            vencimiento: RwSignal::new(String::new()),
            centro_costo_id: RwSignal::new(None),
            numero_proveedor: RwSignal::new(String::new()),
            observaciones: RwSignal::new(String::new()),
            nota_tipo: RwSignal::new(None),
            referencia: RwSignal::new(String::new()),
            lineas: RwSignal::new(vec![LineaFactura::default()]),
            centros: RwSignal::new(Vec::new()),
            guardada: RwSignal::new(None),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn load(&self) {
        let centros = self.centros;
        spawn_local(async move {
            match centros_api::fetch_centros_costo().await {
                Ok(list) => centros.set(list),
                Err(e) => log::warn!("centros-costo unavailable: {}", e),
            }
        });
    }

    pub fn totales(&self) -> TotalesFactura {
        self.lineas.with(|l| calcular_totales_factura(l))
    }

    pub fn seleccionar_tercero(&self, tercero: Option<Tercero>) {
        self.tercero_label
            .set(tercero.as_ref().map(Tercero::etiqueta).unwrap_or_default());
        self.tercero_id.set(tercero.map(|t| t.id));
    }

    pub fn agregar_linea(&self) {
        self.lineas.update(|l| l.push(LineaFactura::default()));
    }

    pub fn eliminar_linea(&self, i: usize) {
        self.lineas.update(|l| {
            if i < l.len() {
                l.remove(i);
            }
            if l.is_empty() {
                l.push(LineaFactura::default());
            }
        });
    }

    pub fn set_descripcion(&self, i: usize, texto: String) {
        self.lineas.update(|l| {
            if let Some(linea) = l.get_mut(i) {
                linea.descripcion = texto;
            }
        });
    }

    /// Store a typed number; unparseable text counts as zero.
    pub fn set_numero(&self, i: usize, campo: CampoLinea, raw: &str) {
        let valor = parse_amount(raw);
        self.lineas.update(|l| {
            let Some(linea) = l.get_mut(i) else {
                return;
            };
            match campo {
                CampoLinea::Cantidad => linea.cantidad = valor,
                CampoLinea::Precio => linea.precio_unitario = valor,
                CampoLinea::Descuento => linea.descuento_pct = valor,
                CampoLinea::Iva => linea.iva_pct = valor,
            }
        });
    }

    fn build_request(&self) -> Result<FacturaRequest, String> {
        let tercero_id = self
            .tercero_id
            .get_untracked()
            .ok_or_else(|| format!("Seleccione el {}", self.tipo.etiqueta_tercero().to_lowercase()))?;
        let fecha = parse_fecha(&self.fecha.get_untracked())
            .ok_or_else(|| "La fecha de la factura no es válida".to_string())?;
        let vencimiento = self.vencimiento.get_untracked();
        let fecha_vencimiento = if vencimiento.trim().is_empty() {
            None
        } else {
            Some(parse_fecha(&vencimiento).ok_or_else(|| "La fecha de vencimiento no es válida".to_string())?)
        };
        let nota_tipo = self.nota_tipo.get_untracked();
        let documento_referencia_id = if nota_tipo.is_some() {
            DocumentoId::from_string(&self.referencia.get_untracked()).ok()
        } else {
            None
        };

        let req = FacturaRequest {
            tercero_id,
            fecha,
            fecha_vencimiento,
            centro_costo_id: self.centro_costo_id.get_untracked(),
            numero_proveedor: match self.tipo {
                TipoFactura::Compra => non_empty(self.numero_proveedor.get_untracked()),
                TipoFactura::Venta => None,
            },
            observaciones: non_empty(self.observaciones.get_untracked()),
            lineas: self.lineas.get_untracked(),
            nota_tipo,
            documento_referencia_id,
        };
        validar_factura(&req).map_err(|e| e.to_string())?;
        Ok(req)
    }

    pub fn save_command(&self) {
        if self.saving.get_untracked() {
            return;
        }
        self.notice.set(None);
        let req = match self.build_request() {
            Ok(req) => req,
            Err(msg) => {
                self.error.set(Some(msg));
                return;
            }
        };
        self.error.set(None);
        self.saving.set(true);

        let this = *self;
        spawn_local(async move {
            match api::crear_factura(this.tipo, &req).await {
                Ok(saved) => {
                    let numero = saved.numero.clone().unwrap_or_else(|| saved.id.to_string());
                    log::info!("{} {} saved", this.tipo.titulo(), numero);
                    this.notice.set(Some(format!("{} {} guardada", this.tipo.titulo(), numero)));
                    this.guardada.set(Some(saved));
                    this.limpiar();
                }
                Err(e) => {
                    log::error!("POST {} failed: {}", this.tipo.endpoint(), e);
                    this.error.set(Some(e.user_message()));
                }
            }
            this.saving.set(false);
        });
    }

    /// Ready for the next invoice; date and partner are kept.
    fn limpiar(&self) {
        self.lineas.set(vec![LineaFactura::default()]);
        self.observaciones.set(String::new());
        self.numero_proveedor.set(String::new());
        self.nota_tipo.set(None);
        self.referencia.set(String::new());
    }

    pub fn emitir_command(&self) {
        let Some(saved) = self.guardada.get_untracked() else {
            return;
        };
        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            match api::emitir_factura(saved.id).await {
                Ok(respuesta) => {
                    log::info!("factura {} emitted: {:?}", saved.id, respuesta.estado);
                    this.notice.set(Some(respuesta.resumen()));
                    this.guardada.set(None);
                }
                Err(e) => {
                    log::warn!("fe/emitir {} failed: {}", saved.id, e);
                    this.error.set(Some(e.user_message()));
                }
            }
            this.saving.set(false);
        });
    }
}

fn parse_fecha(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn non_empty(s: String) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}
