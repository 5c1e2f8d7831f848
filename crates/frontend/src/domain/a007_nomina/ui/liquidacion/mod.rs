//! Bulk payroll liquidation: simulate or save the selected employees, one
//! request per row, and download pay stubs from the history.
use crate::domain::a007_nomina::api;
use crate::shared::date_utils::{format_naive, today};
use crate::shared::export::download_bytes;
use crate::shared::icons::icon;
use crate::shared::message_bar::{ErrorBar, NoticeBar};
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use contracts::domain::a007_nomina::{
    desprendible_filename, EmpleadoId, EstadoFila, HistorialLiquidacion, LiquidacionRequest,
    LoteLiquidacion, Modalidad, Periodo, Resultado,
};
use contracts::shared::download::PDF_MIME;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn estado_class(estado: &EstadoFila) -> &'static str {
    match estado {
        EstadoFila::Pendiente => "badge",
        EstadoFila::Procesando => "badge badge--info",
        EstadoFila::Simulado(_) => "badge badge--primary",
        EstadoFila::Guardado(_) => "badge badge--success",
        EstadoFila::Error(_) => "badge badge--error",
    }
}

#[component]
pub fn LiquidacionNomina() -> impl IntoView {
    let lote = RwSignal::new(LoteLiquidacion::default());
    let historial = RwSignal::new(Vec::<HistorialLiquidacion>::new());
    let mes = RwSignal::new(today().format("%Y-%m").to_string());
    let modalidad = RwSignal::new(Modalidad::Mensual);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);

    let periodo = Memo::new(move |_| Periodo::desde_mes(&mes.get(), modalidad.get()));

    let load_empleados = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_empleados().await {
                Ok(list) => {
                    log::debug!("nomina: {} empleados", list.len());
                    lote.set(LoteLiquidacion::new(list));
                }
                Err(e) => {
                    log::error!("GET /nomina/empleados failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    let load_historial = move || {
        spawn_local(async move {
            match api::fetch_historial().await {
                Ok(list) => historial.set(list),
                Err(e) => log::warn!("GET /nomina/historial failed: {}", e),
            }
        });
    };

    // One request per selected row; each row settles on its own.
    let ejecutar = move |guardar: bool| {
        notice.set(None);
        let Some(periodo) = periodo.get_untracked() else {
            error.set(Some("Seleccione un periodo válido".to_string()));
            return;
        };
        let ids = lote.with_untracked(LoteLiquidacion::seleccionados);
        if ids.is_empty() {
            error.set(Some("Seleccione al menos un empleado".to_string()));
            return;
        }
        error.set(None);
        log::info!(
            "{} {} liquidaciones {} - {}",
            if guardar { "saving" } else { "simulating" },
            ids.len(),
            periodo.inicio,
            periodo.fin
        );
        lote.update(|l| l.marcar_procesando(&ids));

        for id in ids {
            let req = LiquidacionRequest::para(id, periodo);
            spawn_local(async move {
                let resultado = if guardar {
                    api::guardar_liquidacion(&req).await.map(Resultado::Guardado)
                } else {
                    api::preview_liquidacion(&req).await.map(Resultado::Simulado)
                };
                let resultado = resultado.map_err(|e| {
                    log::warn!("liquidacion empleado {} failed: {}", id, e);
                    e.user_message()
                });
                finalizar_fila(lote, id, resultado);
                if lote.try_with_untracked(|l| l.en_curso()) == Some(false) {
                    let resumen = lote.with_untracked(LoteLiquidacion::resumen);
                    notice.set(Some(resumen.mensaje()));
                    if guardar {
                        load_historial();
                    }
                }
            });
        }
    };

    let descargar = move |item: HistorialLiquidacion| {
        spawn_local(async move {
            match api::descargar_desprendible(item.id).await {
                Ok(bytes) => {
                    let filename = desprendible_filename(&item.documento, &item.periodo());
                    if let Err(e) = download_bytes(&bytes, PDF_MIME, &filename) {
                        error.set(Some(e));
                    }
                }
                Err(e) => {
                    log::warn!("desprendible {} failed: {}", item.id, e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    load_empleados();
    load_historial();

    let en_curso = Signal::derive(move || lote.with(LoteLiquidacion::en_curso));
    let sin_seleccion = Signal::derive(move || lote.with(|l| l.seleccionados().is_empty()));

    view! {
        <PageFrame page_id="a007_nomina--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("users")}
                    <h1 class="page__title">"Liquidación de nómina"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ejecutar(false)
                        disabled=Signal::derive(move || en_curso.get() || sin_seleccion.get())
                    >
                        "Simular seleccionados"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| ejecutar(true)
                        disabled=Signal::derive(move || en_curso.get() || sin_seleccion.get())
                    >
                        {icon("save")}
                        " Guardar seleccionados"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| load_empleados()
                        disabled=Signal::derive(move || loading.get() || en_curso.get())
                    >
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <ErrorBar error=error />
            <NoticeBar notice=notice />

            <div class="page__content">
                <Flex gap=FlexGap::Medium align=FlexAlign::End>
                    <div class="form-group">
                        <label for="nomina-mes">"Mes"</label>
                        <input
                            type="month"
                            class="form-input"
                            id="nomina-mes"
                            prop:value=move || mes.get()
                            on:change=move |ev| mes.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="nomina-modalidad">"Periodo"</label>
                        <select
                            class="form-select"
                            id="nomina-modalidad"
                            prop:value=move || modalidad.get().codigo()
                            on:change=move |ev| modalidad.set(Modalidad::from_codigo(&event_target_value(&ev)))
                        >
                            {Modalidad::TODAS
                                .into_iter()
                                .map(|m| view! { <option value=m.codigo()>{m.etiqueta()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <span class="form-hint">
                        {move || match periodo.get() {
                            Some(p) => format!(
                                "{} al {} ({} días)",
                                format_naive(p.inicio),
                                format_naive(p.fin),
                                p.dias()
                            ),
                            None => "Periodo inválido".to_string(),
                        }}
                    </span>
                </Flex>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>
                                    <input
                                        type="checkbox"
                                        prop:checked=move || lote.with(LoteLiquidacion::todos_seleccionados)
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            lote.update(|l| l.seleccionar_todos(checked));
                                        }
                                    />
                                </TableHeaderCell>
                                <TableHeaderCell>"Documento"</TableHeaderCell>
                                <TableHeaderCell>"Nombre"</TableHeaderCell>
                                <TableHeaderCell>"Cargo"</TableHeaderCell>
                                <TableHeaderCell>"Salario base"</TableHeaderCell>
                                <TableHeaderCell>"Devengado"</TableHeaderCell>
                                <TableHeaderCell>"Deducciones"</TableHeaderCell>
                                <TableHeaderCell>"Neto"</TableHeaderCell>
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || lote.with(|l| l.filas.iter().map(|f| f.empleado.id).collect::<Vec<_>>())
                                key=|id| *id
                                children=move |id| view! { <FilaEmpleado lote=lote id=id /> }
                            />
                        </TableBody>
                    </Table>
                </div>
                <div class="totales-box">
                    <div class="totales-box__row totales-box__row--total">
                        <span>"Total neto simulado"</span>
                        <span>{move || format_money(lote.with(LoteLiquidacion::total_neto))}</span>
                    </div>
                </div>

                <h3 class="form-section__title">"Historial"</h3>
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Empleado"</TableHeaderCell>
                            <TableHeaderCell>"Periodo"</TableHeaderCell>
                            <TableHeaderCell>"Neto"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || historial.get()
                            key=|h| h.id
                            children=move |h| {
                                let periodo = h.periodo();
                                let item = h.clone();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{h.empleado.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {format!("{} - {}", format_naive(periodo.inicio), format_naive(periodo.fin))}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_money(h.neto)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| descargar(item.clone())
                                            >
                                                {icon("download")}
                                                " Desprendible"
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}

/// Store a row outcome unless the page was closed meanwhile.
fn finalizar_fila(
    lote: RwSignal<LoteLiquidacion>,
    id: EmpleadoId,
    resultado: Result<Resultado, String>,
) {
    if lote.try_update(|l| l.aplicar_resultado(id, resultado)).is_none() {
        log::debug!("liquidacion result for {} dropped: page closed", id);
    }
}

#[component]
fn FilaEmpleado(lote: RwSignal<LoteLiquidacion>, id: EmpleadoId) -> impl IntoView {
    let fila = Memo::new(move |_| lote.with(|l| l.filas.iter().find(|f| f.empleado.id == id).cloned()));

    move || {
        fila.get().map(|f| {
            let preview = f.preview.clone();
            let devengado = preview.as_ref().map(|p| format_money(p.devengado)).unwrap_or_default();
            let deducciones = preview.as_ref().map(|p| format_money(p.deducciones)).unwrap_or_default();
            let neto = preview.as_ref().map(|p| format_money(p.neto)).unwrap_or_default();
            let procesando = f.estado == EstadoFila::Procesando;
            view! {
                <TableRow>
                    <TableCell>
                        <input
                            type="checkbox"
                            prop:checked=f.seleccionado
                            disabled=procesando
                            on:change=move |_| lote.update(|l| l.toggle(id))
                        />
                    </TableCell>
                    <TableCell>
                        <TableCellLayout>{f.empleado.documento.clone()}</TableCellLayout>
                    </TableCell>
                    <TableCell>
                        <TableCellLayout truncate=true>{f.empleado.nombre.clone()}</TableCellLayout>
                    </TableCell>
                    <TableCell>
                        <TableCellLayout truncate=true>
                            {f.empleado.cargo.clone().unwrap_or_default()}
                        </TableCellLayout>
                    </TableCell>
                    <TableCell>
                        <TableCellLayout>{format_money(f.empleado.salario_base)}</TableCellLayout>
                    </TableCell>
                    <TableCell>
                        <TableCellLayout>
                            {devengado}
                        </TableCellLayout>
                    </TableCell>
                    <TableCell>
                        <TableCellLayout>
                            {deducciones}
                        </TableCellLayout>
                    </TableCell>
                    <TableCell>
                        <TableCellLayout>
                            {neto}
                        </TableCellLayout>
                    </TableCell>
                    <TableCell>
                        <TableCellLayout truncate=true>
                            <span class=estado_class(&f.estado) title=f.estado.etiqueta()>
                                {f.estado.etiqueta()}
                            </span>
                        </TableCellLayout>
                    </TableCell>
                </TableRow>
            }
        })
    }
}
