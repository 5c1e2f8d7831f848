//! Maps a tab key to the page it shows.

use super::tab_labels::TabKey;
use crate::domain::a001_documento::ui::details::DocumentoDetails;
use crate::domain::a001_documento::ui::list::DocumentoList;
use crate::domain::a006_factura::ui::details::FacturaDetails;
use crate::domain::a007_nomina::ui::liquidacion::LiquidacionNomina;
use crate::domain::a008_produccion::ui::list::ProduccionList;
use crate::layout::global_context::AppGlobalContext;
use contracts::domain::a006_factura::TipoFactura;
use leptos::prelude::*;

/// Page for `key`, or a placeholder for keys no page handles.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let Some(tab) = TabKey::parse(key) else {
        log::warn!("Unknown tab type: {}", key);
        let key_for_close = key.to_string();
        return view! {
            <div class="placeholder">
                <p>{format!("Página no disponible: {}", key)}</p>
                <button class="btn btn-secondary" on:click=move |_| tabs_store.close_tab(&key_for_close)>
                    "Cerrar"
                </button>
            </div>
        }
        .into_any();
    };

    match tab {
        TabKey::DocumentoList => view! { <DocumentoList /> }.into_any(),
        TabKey::DocumentoNew => view! { <DocumentoDetails id=None /> }.into_any(),
        TabKey::DocumentoDetail(id) => view! { <DocumentoDetails id=Some(id) /> }.into_any(),
        TabKey::FacturaVenta => view! { <FacturaDetails tipo=TipoFactura::Venta /> }.into_any(),
        TabKey::Compra => view! { <FacturaDetails tipo=TipoFactura::Compra /> }.into_any(),
        TabKey::NominaLiquidacion => view! { <LiquidacionNomina /> }.into_any(),
        TabKey::Produccion => view! { <ProduccionList /> }.into_any(),
    }
}
