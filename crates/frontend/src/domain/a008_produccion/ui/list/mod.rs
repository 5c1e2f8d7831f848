use crate::domain::a008_produccion::api;
use crate::shared::date_utils::{format_naive, today_input_value};
use crate::shared::icons::icon;
use crate::shared::message_bar::{ErrorBar, NoticeBar};
use crate::shared::number_format::format_number_with_decimals;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use chrono::NaiveDate;
use contracts::domain::a001_documento::parse_amount;
use contracts::domain::a008_produccion::{
    acciones_permitidas, AccionOrden, EstadoOrden, OrdenId, OrdenProduccion, OrdenRequest, Receta,
    RecetaId,
};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::*;

fn estado_class(estado: EstadoOrden) -> &'static str {
    match estado {
        EstadoOrden::Borrador => "badge",
        EstadoOrden::EnProceso => "badge badge--info",
        EstadoOrden::Cerrada => "badge badge--success",
        EstadoOrden::Anulada => "badge badge--error",
    }
}

fn confirmar(accion: AccionOrden, orden: &str) -> bool {
    if !accion.requiere_confirmacion() {
        return true;
    }
    let mensaje = format!("¿{} la orden {}? Esta acción no se puede deshacer.", accion.etiqueta(), orden);
    web_sys::window()
        .and_then(|w| w.confirm_with_message(&mensaje).ok())
        .unwrap_or(false)
}

#[component]
pub fn ProduccionList() -> impl IntoView {
    let ordenes = RwSignal::new(Vec::<OrdenProduccion>::new());
    let recetas = RwSignal::new(Vec::<Receta>::new());
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(HashSet::<OrdenId>::new());
    let mostrar_archivadas = RwSignal::new(false);

    // New order form
    let receta_id = RwSignal::new(None::<RecetaId>);
    let cantidad = RwSignal::new(String::from("1"));
    let fecha = RwSignal::new(today_input_value());

    let load_ordenes = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_ordenes().await {
                Ok(list) => {
                    log::debug!("produccion: {} ordenes", list.len());
                    ordenes.set(list);
                }
                Err(e) => {
                    log::error!("GET /produccion/ordenes failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    spawn_local(async move {
        match api::fetch_recetas().await {
            Ok(list) => recetas.set(list),
            Err(e) => {
                log::error!("GET /produccion/recetas failed: {}", e);
                error.set(Some(e.user_message()));
            }
        }
    });
    load_ordenes();

    let receta_sel = Memo::new(move |_| {
        let id = receta_id.get()?;
        recetas.with(|r| r.iter().find(|x| x.id == id).cloned())
    });

    let crear = move || {
        notice.set(None);
        let Some(receta) = receta_id.get_untracked() else {
            error.set(Some("Seleccione una receta".to_string()));
            return;
        };
        let cant = parse_amount(&cantidad.get_untracked());
        if cant <= 0.0 {
            error.set(Some("La cantidad debe ser mayor que cero".to_string()));
            return;
        }
        let Ok(fecha_orden) = NaiveDate::parse_from_str(&fecha.get_untracked(), "%Y-%m-%d") else {
            error.set(Some("La fecha no es válida".to_string()));
            return;
        };
        error.set(None);
        saving.set(true);
        let req = OrdenRequest {
            receta_id: receta,
            cantidad: cant,
            fecha: fecha_orden,
        };
        spawn_local(async move {
            match api::crear_orden(&req).await {
                Ok(orden) => {
                    log::info!("orden {} created", orden.numero);
                    notice.set(Some(format!("Orden {} creada", orden.numero)));
                    cantidad.set(String::from("1"));
                    load_ordenes();
                }
                Err(e) => {
                    log::error!("POST /produccion/ordenes failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            saving.set(false);
        });
    };

    let ejecutar = move |id: OrdenId, numero: String, accion: AccionOrden| {
        if !confirmar(accion, &numero) {
            return;
        }
        busy.update(|b| {
            b.insert(id);
        });
        spawn_local(async move {
            match api::ejecutar_accion(id, accion).await {
                Ok(()) => {
                    log::info!("orden {}: {} done", id, accion.segmento());
                    notice.set(Some(format!("{}: {} realizado", numero, accion.etiqueta())));
                    load_ordenes();
                }
                Err(e) => {
                    log::warn!("{} failed: {}", accion.path(id), e);
                    error.set(Some(e.user_message()));
                }
            }
            busy.update(|b| {
                b.remove(&id);
            });
        });
    };

    let visibles = move || {
        let todas = mostrar_archivadas.get();
        ordenes.with(|list| {
            list.iter()
                .filter(|o| todas || !o.archivada)
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <PageFrame page_id="a008_produccion--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("factory")}
                    <h1 class="page__title">"Órdenes de producción"</h1>
                </div>
                <div class="page__header-right">
                    <label class="checkbox-label">
                        <input
                            type="checkbox"
                            prop:checked=move || mostrar_archivadas.get()
                            on:change=move |ev| mostrar_archivadas.set(event_target_checked(&ev))
                        />
                        " Mostrar archivadas"
                    </label>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_ordenes()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Cargando..." } else { " Actualizar" }}
                    </Button>
                </div>
            </div>

            <ErrorBar error=error />
            <NoticeBar notice=notice />

            <div class="page__content">
                <div class="form-section">
                    <h3 class="form-section__title">"Nueva orden"</h3>
                    <Flex gap=FlexGap::Medium align=FlexAlign::End>
                        <div class="form-group">
                            <label for="orden-receta">"Receta"</label>
                            <select
                                class="form-select"
                                id="orden-receta"
                                prop:value=move || receta_id.get().map(|r| r.as_string()).unwrap_or_default()
                                on:change=move |ev| receta_id.set(RecetaId::from_string(&event_target_value(&ev)).ok())
                            >
                                <option value="">"Seleccione…"</option>
                                <For
                                    each=move || recetas.get()
                                    key=|r| r.id
                                    children=move |r| view! { <option value=r.id.as_string()>{r.etiqueta()}</option> }
                                />
                            </select>
                        </div>
                        <div class="form-group">
                            <label for="orden-cantidad">"Cantidad"</label>
                            <input
                                type="text"
                                inputmode="decimal"
                                class="form-input text-right"
                                id="orden-cantidad"
                                prop:value=move || cantidad.get()
                                on:input=move |ev| cantidad.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label for="orden-fecha">"Fecha"</label>
                            <input
                                type="date"
                                class="form-input"
                                id="orden-fecha"
                                prop:value=move || fecha.get()
                                on:input=move |ev| fecha.set(event_target_value(&ev))
                            />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| crear()
                            disabled=Signal::derive(move || saving.get())
                        >
                            {icon("plus")}
                            " Crear orden"
                        </Button>
                    </Flex>
                    {move || {
                        receta_sel
                            .get()
                            .map(|receta| {
                                let insumos = receta.escalar(parse_amount(&cantidad.get()));
                                view! {
                                    <ul class="insumos-list">
                                        {insumos
                                            .into_iter()
                                            .map(|i| {
                                                view! {
                                                    <li>
                                                        {format!(
                                                            "{} {} {}",
                                                            format_number_with_decimals(i.cantidad, 2),
                                                            i.unidad,
                                                            i.producto,
                                                        )}
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                }
                            })
                    }}
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Número"</TableHeaderCell>
                                <TableHeaderCell>"Fecha"</TableHeaderCell>
                                <TableHeaderCell>"Receta"</TableHeaderCell>
                                <TableHeaderCell>"Cantidad"</TableHeaderCell>
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                                <TableHeaderCell>"Acciones"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=visibles
                                key=|o| (o.id, o.estado, o.archivada)
                                children=move |orden| {
                                    let id = orden.id;
                                    let is_busy = Signal::derive(move || busy.with(|b| b.contains(&id)));
                                    let acciones = acciones_permitidas(&orden);
                                    let numero = orden.numero.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{orden.numero.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_naive(orden.fecha)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{orden.receta.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {format_number_with_decimals(orden.cantidad, 2)}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class=estado_class(orden.estado)>{orden.estado.etiqueta()}</span>
                                                    {orden.archivada.then(|| view! {
                                                        <span class="badge">" Archivada"</span>
                                                    })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Flex gap=FlexGap::Small>
                                                        {acciones
                                                            .into_iter()
                                                            .map(|accion| {
                                                                let numero = numero.clone();
                                                                let appearance = if accion.requiere_confirmacion() {
                                                                    ButtonAppearance::Subtle
                                                                } else {
                                                                    ButtonAppearance::Secondary
                                                                };
                                                                view! {
                                                                    <Button
                                                                        size=ButtonSize::Small
                                                                        appearance=appearance
                                                                        disabled=is_busy
                                                                        on_click=move |_| ejecutar(id, numero.clone(), accion)
                                                                    >
                                                                        {accion.etiqueta()}
                                                                    </Button>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </Flex>
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
                <Show when=move || !loading.get() && ordenes.with(Vec::is_empty)>
                    <p class="empty-state">"No hay órdenes de producción."</p>
                </Show>
            </div>
        </PageFrame>
    }
}
