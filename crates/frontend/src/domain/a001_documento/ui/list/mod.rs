use crate::domain::a001_documento::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabKey;
use crate::shared::date_utils::format_naive;
use crate::shared::export::{download_bytes, export_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::message_bar::{ErrorBar, NoticeBar};
use crate::shared::number_format::{format_money, format_number_with_decimals};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a001_documento::{DocumentoId, DocumentoListItem, EstadoDian, EstadoDocumento};
use contracts::shared::download::{pdf_filename, PDF_MIME};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::*;

impl CsvExportable for DocumentoListItem {
    fn headers() -> Vec<&'static str> {
        vec!["Fecha", "Tipo", "Número", "Beneficiario", "Total", "Estado", "DIAN"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            format_naive(self.fecha),
            self.tipo_documento.clone(),
            self.numero.clone(),
            self.beneficiario.clone().unwrap_or_default(),
            format_number_with_decimals(self.total, 2),
            self.estado.etiqueta().to_string(),
            self.estado_dian.map(|e| e.etiqueta()).unwrap_or("").to_string(),
        ]
    }
}

fn estado_class(estado: EstadoDocumento) -> &'static str {
    match estado {
        EstadoDocumento::Contabilizado => "badge badge--success",
        EstadoDocumento::Anulado => "badge badge--error",
        _ => "badge",
    }
}

fn dian_class(estado: EstadoDian) -> &'static str {
    match estado {
        EstadoDian::Aceptado => "badge badge--success",
        EstadoDian::Rechazado => "badge badge--error",
        EstadoDian::Enviado => "badge badge--info",
        _ => "badge badge--warning",
    }
}

#[component]
pub fn DocumentoList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let items = RwSignal::new(Vec::<DocumentoListItem>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    // Rows with a request in flight
    let busy = RwSignal::new(HashSet::<DocumentoId>::new());

    let load_items = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_documentos().await {
                Ok(list) => {
                    log::debug!("documentos: {} rows", list.len());
                    items.set(list);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("GET /documentos failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    let open_detail = move |id: DocumentoId| {
        tabs_store.open(TabKey::DocumentoDetail(id));
    };

    let open_new = move || {
        tabs_store.open(TabKey::DocumentoNew);
    };

    let set_busy = move |id: DocumentoId, on: bool| {
        busy.update(|b| {
            if on {
                b.insert(id);
            } else {
                b.remove(&id);
            }
        });
    };

    let solicitar_impresion = move |item: DocumentoListItem| {
        set_busy(item.id, true);
        spawn_local(async move {
            match api::solicitar_impresion(item.id).await {
                Ok(_) => {
                    notice.set(Some(format!("Impresión solicitada para {}", item.numero)));
                    items.update(|list| {
                        if let Some(row) = list.iter_mut().find(|r| r.id == item.id) {
                            row.impresion_solicitada = true;
                        }
                    });
                }
                Err(e) => {
                    log::warn!("solicitar-impresion {} failed: {}", item.id, e);
                    error.set(Some(e.user_message()));
                }
            }
            set_busy(item.id, false);
        });
    };

    let descargar_pdf = move |id: DocumentoId| {
        set_busy(id, true);
        spawn_local(async move {
            match api::descargar_pdf(id).await {
                Ok(bytes) => {
                    if let Err(e) = download_bytes(&bytes, PDF_MIME, &pdf_filename("documento", id)) {
                        log::error!("pdf save failed: {}", e);
                        error.set(Some(e));
                    }
                }
                Err(e) => {
                    log::warn!("pdf {} failed: {}", id, e);
                    error.set(Some(e.user_message()));
                }
            }
            set_busy(id, false);
        });
    };

    let emitir = move |item: DocumentoListItem| {
        set_busy(item.id, true);
        spawn_local(async move {
            match api::emitir_dian(item.id).await {
                Ok(respuesta) => {
                    log::info!("documento {} emitted: {:?}", item.id, respuesta.estado);
                    notice.set(Some(format!("{}: {}", item.numero, respuesta.resumen())));
                    items.update(|list| {
                        if let Some(row) = list.iter_mut().find(|r| r.id == item.id) {
                            row.estado_dian = Some(respuesta.estado);
                        }
                    });
                }
                Err(e) => {
                    log::warn!("fe/emitir {} failed: {}", item.id, e);
                    error.set(Some(e.user_message()));
                }
            }
            set_busy(item.id, false);
        });
    };

    load_items();

    view! {
        <PageFrame page_id="a001_documento--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("book")}
                    <h1 class="page__title">"Documentos contables"</h1>
                    <span class="badge badge--primary">{move || items.with(Vec::len)}</span>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_new()>
                        {icon("plus")}
                        " Nuevo"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            if let Err(e) = items.with(|data| export_csv(data, "documentos.csv")) {
                                log::warn!("csv export: {}", e);
                                error.set(Some(e));
                            }
                        }
                        disabled=Signal::derive(move || items.with(Vec::is_empty))
                    >
                        {icon("download")}
                        " CSV"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_items()
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
                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Fecha"</TableHeaderCell>
                                <TableHeaderCell>"Tipo"</TableHeaderCell>
                                <TableHeaderCell>"Número"</TableHeaderCell>
                                <TableHeaderCell>"Beneficiario"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                                <TableHeaderCell>"DIAN"</TableHeaderCell>
                                <TableHeaderCell>"Acciones"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|item| (item.id, item.estado_dian, item.impresion_solicitada)
                                children=move |item| {
                                    let id = item.id;
                                    let is_busy = Signal::derive(move || busy.with(|b| b.contains(&id)));
                                    let puede_emitir = item.puede_emitir();
                                    let impreso = item.impresion_solicitada;
                                    let item_emit = item.clone();
                                    let item_print = item.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{format_naive(item.fecha)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{item.tipo_documento.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(id);
                                                        }
                                                    >
                                                        {item.numero.clone()}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.beneficiario.clone().unwrap_or_else(|| "—".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="text-right tabular">{format_money(item.total)}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class=estado_class(item.estado)>{item.estado.etiqueta()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {item.estado_dian.map(|e| view! {
                                                        <span class=dian_class(e)>{e.etiqueta()}</span>
                                                    })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Flex gap=FlexGap::Small>
                                                        <Button
                                                            size=ButtonSize::Small
                                                            appearance=ButtonAppearance::Subtle
                                                            disabled=Signal::derive(move || {
                                                                is_busy.get() || impreso
                                                            })
                                                            on_click={
                                                                let item = item_print.clone();
                                                                move |_| solicitar_impresion(item.clone())
                                                            }
                                                        >
                                                            {icon("printer")}
                                                        </Button>
                                                        <Button
                                                            size=ButtonSize::Small
                                                            appearance=ButtonAppearance::Subtle
                                                            disabled=is_busy
                                                            on_click=move |_| descargar_pdf(id)
                                                        >
                                                            {icon("download")}
                                                        </Button>
                                                        <Show when=move || puede_emitir>
                                                            <Button
                                                                size=ButtonSize::Small
                                                                appearance=ButtonAppearance::Primary
                                                                disabled=is_busy
                                                                on_click={
                                                                    let item = item_emit.clone();
                                                                    move |_| emitir(item.clone())
                                                                }
                                                            >
                                                                {icon("send")}
                                                                " DIAN"
                                                            </Button>
                                                        </Show>
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
                <Show when=move || !loading.get() && items.with(Vec::is_empty)>
                    <p class="empty-state">"No hay documentos registrados."</p>
                </Show>
            </div>
        </PageFrame>
    }
}
