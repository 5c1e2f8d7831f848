use super::view_model::{CampoLinea, FacturaDetailsViewModel};
use crate::domain::a003_tercero::ui::picker::TerceroPicker;
use crate::shared::icons::icon;
use crate::shared::message_bar::{ErrorBar, NoticeBar};
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use contracts::domain::a001_documento::balance::format_amount;
use contracts::domain::a005_centro_costo::CentroCostoId;
use contracts::domain::a006_factura::{NotaTipo, TipoFactura};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn FacturaDetails(tipo: TipoFactura) -> impl IntoView {
    let vm = FacturaDetailsViewModel::new(tipo);
    vm.load();

    let totales = Memo::new(move |_| vm.totales());
    let page_id = match tipo {
        TipoFactura::Venta => "a006_factura--detail",
        TipoFactura::Compra => "a006_compra--detail",
    };

    view! {
        <PageFrame page_id=page_id category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    {icon(if tipo == TipoFactura::Venta { "invoices" } else { "purchases" })}
                    <h1 class="page__title">{tipo.titulo()}</h1>
                </div>
                <div class="page__header-right">
                    <Show when=move || tipo == TipoFactura::Venta && vm.guardada.with(Option::is_some)>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.emitir_command()
                            disabled=Signal::derive(move || vm.saving.get())
                        >
                            {icon("send")}
                            " Emitir a la DIAN"
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.save_command()
                        disabled=Signal::derive(move || vm.saving.get())
                    >
                        {icon("save")}
                        {move || if vm.saving.get() { " Guardando…" } else { " Guardar" }}
                    </Button>
                </div>
            </div>

            <ErrorBar error=vm.error />
            <NoticeBar notice=vm.notice />

            <div class="page__content">
                <div class="form-grid">
                    <div class="form-group">
                        <label for="factura-tercero">{tipo.etiqueta_tercero()}</label>
                        <TerceroPicker
                            input_id="factura-tercero"
                            selected_label=vm.tercero_label
                            on_select=Callback::new(move |t| vm.seleccionar_tercero(t))
                        />
                    </div>
                    <div class="form-group">
                        <label for="factura-fecha">"Fecha"</label>
                        <input
                            type="date"
                            class="form-input"
                            id="factura-fecha"
                            prop:value=move || vm.fecha.get()
                            on:input=move |ev| vm.fecha.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="factura-vencimiento">"Vencimiento"</label>
                        <input
                            type="date"
                            class="form-input"
                            id="factura-vencimiento"
                            prop:value=move || vm.vencimiento.get()
                            on:input=move |ev| vm.vencimiento.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="factura-centro">"Centro de costo"</label>
                        <select
                            class="form-select"
                            id="factura-centro"
                            prop:value=move || vm.centro_costo_id.get().map(|c| c.as_string()).unwrap_or_default()
                            on:change=move |ev| {
                                vm.centro_costo_id.set(CentroCostoId::from_string(&event_target_value(&ev)).ok())
                            }
                        >
                            <option value="">"Ninguno"</option>
                            <For
                                each=move || vm.centros.get()
                                key=|c| c.id
                                children=move |c| view! { <option value=c.id.as_string()>{c.etiqueta()}</option> }
                            />
                        </select>
                    </div>
                    <Show when=move || tipo == TipoFactura::Compra>
                        <div class="form-group">
                            <label for="factura-numero-proveedor">"Factura del proveedor"</label>
                            <input
                                type="text"
                                class="form-input"
                                id="factura-numero-proveedor"
                                prop:value=move || vm.numero_proveedor.get()
                                on:input=move |ev| vm.numero_proveedor.set(event_target_value(&ev))
                            />
                        </div>
                    </Show>
                </div>

                <div class="form-grid form-section">
                    <div class="form-group">
                        <label for="factura-nota">"Tipo"</label>
                        <select
                            class="form-select"
                            id="factura-nota"
                            on:change=move |ev| {
                                vm.nota_tipo.set(match event_target_value(&ev).as_str() {
                                    "credito" => Some(NotaTipo::Credito),
                                    "debito" => Some(NotaTipo::Debito),
                                    _ => None,
                                })
                            }
                            prop:value=move || match vm.nota_tipo.get() {
                                Some(NotaTipo::Credito) => "credito",
                                Some(NotaTipo::Debito) => "debito",
                                None => "",
                            }
                        >
                            <option value="">"Factura"</option>
                            <option value="credito">{NotaTipo::Credito.etiqueta()}</option>
                            <option value="debito">{NotaTipo::Debito.etiqueta()}</option>
                        </select>
                    </div>
                    <Show when=move || vm.nota_tipo.with(Option::is_some)>
                        <div class="form-group">
                            <label for="factura-referencia">"Factura de referencia (id)"</label>
                            <input
                                type="text"
                                inputmode="numeric"
                                class="form-input"
                                id="factura-referencia"
                                prop:value=move || vm.referencia.get()
                                on:input=move |ev| vm.referencia.set(event_target_value(&ev))
                            />
                        </div>
                    </Show>
                </div>

                <div class="form-section">
                    <h3 class="form-section__title">"Líneas"</h3>
                    <table class="table factura-lineas">
                        <thead>
                            <tr>
                                <th>"Descripción"</th>
                                <th class="text-right">"Cantidad"</th>
                                <th class="text-right">"Precio unitario"</th>
                                <th class="text-right">"Desc. %"</th>
                                <th class="text-right">"IVA %"</th>
                                <th class="text-right">"Total"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || 0..vm.lineas.with(Vec::len)
                                key=|i| *i
                                children=move |i| view! { <LineaRow vm=vm linea=i /> }
                            />
                        </tbody>
                    </table>
                    <button class="btn btn-secondary" on:click=move |_| vm.agregar_linea()>
                        {icon("plus")}
                        "Agregar línea"
                    </button>
                </div>

                <div class="form-group form-section">
                    <label for="factura-observaciones">"Observaciones"</label>
                    <textarea
                        class="form-input"
                        id="factura-observaciones"
                        rows="2"
                        prop:value=move || vm.observaciones.get()
                        on:input=move |ev| vm.observaciones.set(event_target_value(&ev))
                    />
                </div>

                <div class="totales-box">
                    <div class="totales-box__row">
                        <span>"Subtotal"</span>
                        <span>{move || format_money(totales.get().subtotal)}</span>
                    </div>
                    <div class="totales-box__row">
                        <span>"Descuento"</span>
                        <span>{move || format_money(-totales.get().descuento)}</span>
                    </div>
                    <div class="totales-box__row">
                        <span>"IVA"</span>
                        <span>{move || format_money(totales.get().iva)}</span>
                    </div>
                    <div class="totales-box__row totales-box__row--total">
                        <span>"Total"</span>
                        <span>{move || format_money(totales.get().total)}</span>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

#[component]
fn LineaRow(vm: FacturaDetailsViewModel, linea: usize) -> impl IntoView {
    let numero = move |campo: CampoLinea| {
        move || {
            vm.lineas.with(|l| {
                l.get(linea)
                    .map(|x| {
                        let v = match campo {
                            CampoLinea::Cantidad => x.cantidad,
                            CampoLinea::Precio => x.precio_unitario,
                            CampoLinea::Descuento => x.descuento_pct,
                            CampoLinea::Iva => x.iva_pct,
                        };
                        format_amount(v)
                    })
                    .unwrap_or_default()
            })
        }
    };
    let celda = move |campo: CampoLinea| {
        view! {
            <td>
                <input
                    type="text"
                    inputmode="decimal"
                    class="form-input text-right"
                    prop:value=numero(campo)
                    on:change=move |ev| vm.set_numero(linea, campo, &event_target_value(&ev))
                />
            </td>
        }
    };

    view! {
        <tr>
            <td>
                <input
                    type="text"
                    class="form-input"
                    prop:value=move || {
                        vm.lineas.with(|l| l.get(linea).map(|x| x.descripcion.clone()).unwrap_or_default())
                    }
                    on:input=move |ev| vm.set_descripcion(linea, event_target_value(&ev))
                />
            </td>
            {celda(CampoLinea::Cantidad)}
            {celda(CampoLinea::Precio)}
            {celda(CampoLinea::Descuento)}
            {celda(CampoLinea::Iva)}
            <td class="text-right">
                {move || vm.lineas.with(|l| l.get(linea).map(|x| format_money(x.total())).unwrap_or_default())}
            </td>
            <td>
                <button
                    class="btn btn-icon"
                    title="Eliminar línea"
                    on:click=move |_| vm.eliminar_linea(linea)
                >
                    {icon("trash")}
                </button>
            </td>
        </tr>
    }
}
