use super::view_model::DocumentoDetailsViewModel;
use crate::domain::a003_tercero::ui::picker::TerceroPicker;
use crate::domain::a004_plan_cuentas::ui::cuenta_input::CuentaInput;
use crate::shared::date_utils::format_naive;
use crate::shared::icons::icon;
use crate::shared::message_bar::{ErrorBar, NoticeBar};
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use contracts::domain::a001_documento::form::{FormAction, OrigenFila, VistaFacturas};
use contracts::domain::a001_documento::{BodegaId, DocumentoId};
use contracts::domain::a005_centro_costo::CentroCostoId;
use contracts::domain::common::AggregateId;
use contracts::shared::focus::FieldId;
use leptos::prelude::*;

#[component]
pub fn DocumentoDetails(id: Option<DocumentoId>) -> impl IntoView {
    let vm = DocumentoDetailsViewModel::new();
    vm.load(id);

    let secciones = Memo::new(move |_| vm.form.with(|f| f.workflow.secciones()));
    let totales = Memo::new(move |_| vm.form.with(|f| f.totales()));

    let key = move |field: FieldId| move |ev: web_sys::KeyboardEvent| vm.handle_key(field, &ev);

    view! {
        <PageFrame page_id="a001_documento--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("book")}
                    <h1 class="page__title">
                        {move || {
                            if vm.is_edit_mode() {
                                format!("Documento {}", vm.form.with(|f| f.numero.clone()))
                            } else {
                                "Nuevo documento contable".to_string()
                            }
                        }}
                    </h1>
                </div>
                <div class="page__header-right">
                    <button
                        class="btn btn-primary"
                        id=FieldId::Guardar.dom_id()
                        disabled=move || vm.saving.get()
                        on:click=move |_| vm.save_command()
                    >
                        {icon("save")}
                        {move || if vm.saving.get() { "Guardando…" } else { "Guardar" }}
                    </button>
                </div>
            </div>

            <ErrorBar error=vm.error />
            <NoticeBar notice=vm.notice />

            <div class="page__content">
                <div class="form-grid">
                    <div class="form-group">
                        <label for=FieldId::TipoDocumento.dom_id()>"Tipo de documento"</label>
                        <select
                            class="form-select"
                            id=FieldId::TipoDocumento.dom_id()
                            prop:value=move || {
                                vm.form.with(|f| f.tipo.as_ref().map(|t| t.id.as_string()).unwrap_or_default())
                            }
                            on:change=move |ev| vm.seleccionar_tipo(&event_target_value(&ev))
                            on:keydown=key(FieldId::TipoDocumento)
                        >
                            <option value="">"Seleccione…"</option>
                            <For
                                each=move || vm.tipos.get()
                                key=|t| t.id
                                children=move |t| {
                                    view! { <option value=t.id.as_string()>{t.etiqueta()}</option> }
                                }
                            />
                        </select>
                        {move || {
                            vm.form.with(|f| {
                                f.tipo.as_ref().and_then(|t| t.funcion_especial).map(|fe| {
                                    view! { <span class="badge badge--info">{fe.etiqueta()}</span> }
                                })
                            })
                        }}
                    </div>

                    <div class="form-group">
                        <label for=FieldId::Numero.dom_id()>"Número"</label>
                        <input
                            type="text"
                            class="form-input"
                            id=FieldId::Numero.dom_id()
                            disabled=move || vm.form.with(|f| f.numero_automatico())
                            placeholder=move || {
                                if vm.form.with(|f| f.numero_automatico()) { "Automático" } else { "" }
                            }
                            prop:value=move || vm.form.with(|f| f.numero.clone())
                            on:input=move |ev| vm.dispatch(FormAction::SetNumero(event_target_value(&ev)))
                            on:keydown=key(FieldId::Numero)
                        />
                    </div>

                    <div class="form-group">
                        <label for=FieldId::Fecha.dom_id()>"Fecha"</label>
                        <input
                            type="date"
                            class="form-input"
                            id=FieldId::Fecha.dom_id()
                            prop:value=move || vm.form.with(|f| f.fecha.clone())
                            on:input=move |ev| vm.dispatch(FormAction::SetFecha(event_target_value(&ev)))
                            on:keydown=key(FieldId::Fecha)
                        />
                    </div>

                    <div class="form-group">
                        <label for=FieldId::Beneficiario.dom_id()>
                            "Beneficiario"
                            <Show when=move || secciones.get().beneficiario_requerido>
                                <span class="form-required">" *"</span>
                            </Show>
                        </label>
                        <TerceroPicker
                            input_id=FieldId::Beneficiario.dom_id()
                            selected_label=vm.beneficiario_label
                            on_select=Callback::new(move |t| vm.seleccionar_beneficiario(t))
                            on_key=Callback::new(move |ev: web_sys::KeyboardEvent| {
                                vm.handle_key(FieldId::Beneficiario, &ev)
                            })
                        />
                    </div>

                    <div class="form-group">
                        <label for=FieldId::CentroCosto.dom_id()>"Centro de costo"</label>
                        <select
                            class="form-select"
                            id=FieldId::CentroCosto.dom_id()
                            prop:value=move || {
                                vm.form.with(|f| f.centro_costo_id.map(|c| c.as_string()).unwrap_or_default())
                            }
                            on:change=move |ev| {
                                let raw = event_target_value(&ev);
                                vm.dispatch(FormAction::SetCentroCosto(CentroCostoId::from_string(&raw).ok()));
                            }
                            on:keydown=key(FieldId::CentroCosto)
                        >
                            <option value="">"Ninguno"</option>
                            <For
                                each=move || vm.centros.get()
                                key=|c| c.id
                                children=move |c| {
                                    view! { <option value=c.id.as_string()>{c.etiqueta()}</option> }
                                }
                            />
                        </select>
                    </div>
                </div>

                <Show when=move || secciones.get().bodegas>
                    <div class="form-grid form-section">
                        <BodegaSelect vm=vm field=FieldId::BodegaOrigen label="Bodega origen" />
                        <BodegaSelect vm=vm field=FieldId::BodegaDestino label="Bodega destino" />
                    </div>
                </Show>

                <Show when=move || secciones.get().monto_aplicar>
                    <AplicacionSection vm=vm />
                </Show>

                <Show when=move || secciones.get().emision_dian>
                    <p class="form-hint">
                        "Este documento se puede emitir a la DIAN desde la lista de documentos."
                    </p>
                </Show>

                <div class="form-section">
                    <h3 class="form-section__title">"Movimientos"</h3>
                    <table class="table movimientos-table">
                        <thead>
                            <tr>
                                <th>"Cuenta"</th>
                                <th>"Concepto"</th>
                                <th class="text-right">"Débito"</th>
                                <th class="text-right">"Crédito"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || 0..vm.form.with(|f| f.filas.len())
                                key=|i| *i
                                children=move |i| view! { <FilaRow vm=vm fila=i /> }
                            />
                        </tbody>
                        <tfoot>
                            <tr class="movimientos-table__totales">
                                <td colspan="2" class="text-right">"Totales"</td>
                                <td class="text-right">{move || format_money(totales.get().debito)}</td>
                                <td class="text-right">{move || format_money(totales.get().credito)}</td>
                                <td></td>
                            </tr>
                        </tfoot>
                    </table>
                    <div class="movimientos-footer">
                        <button class="btn btn-secondary" on:click=move |_| vm.agregar_fila()>
                            {icon("plus")}
                            "Agregar fila"
                        </button>
                        {move || {
                            let t = totales.get();
                            if t.esta_balanceado() {
                                view! { <span class="badge badge--success">"Balanceado"</span> }.into_any()
                            } else {
                                view! {
                                    <span class="badge badge--warning">
                                        {format!("Diferencia {}", format_money(t.diferencia()))}
                                    </span>
                                }
                                .into_any()
                            }
                        }}
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

#[component]
fn BodegaSelect(vm: DocumentoDetailsViewModel, field: FieldId, label: &'static str) -> impl IntoView {
    let current = move || {
        vm.form.with(|f| match field {
            FieldId::BodegaOrigen => f.bodega_origen_id,
            _ => f.bodega_destino_id,
        })
    };

    view! {
        <div class="form-group">
            <label for=field.dom_id()>{label}</label>
            <select
                class="form-select"
                id=field.dom_id()
                prop:value=move || current().map(|b| b.as_string()).unwrap_or_default()
                on:change=move |ev| {
                    let id = BodegaId::from_string(&event_target_value(&ev)).ok();
                    vm.dispatch(match field {
                        FieldId::BodegaOrigen => FormAction::SetBodegaOrigen(id),
                        _ => FormAction::SetBodegaDestino(id),
                    });
                }
                on:keydown=move |ev| vm.handle_key(field, &ev)
            >
                <option value="">"Seleccione…"</option>
                <For
                    each=move || vm.bodegas.get()
                    key=|b| b.id
                    children=move |b| view! { <option value=b.id.as_string()>{b.nombre}</option> }
                />
            </select>
        </div>
    }
}

/// Amount to pay plus the partner's pending invoices.
#[component]
fn AplicacionSection(vm: DocumentoDetailsViewModel) -> impl IntoView {
    let total_aplicado = Memo::new(move |_| vm.form.with(|f| f.total_aplicado()));
    // Keystrokes in the amount inputs must not rebuild the table under the cursor
    let vista = Memo::new(move |_| vm.form.with(|f| f.vista_facturas()));
    let facturas = Memo::new(move |_| vm.form.with(|f| f.facturas.clone()));

    view! {
        <div class="form-section">
            <div class="form-grid">
                <div class="form-group">
                    <label for=FieldId::MontoAplicar.dom_id()>"Monto a pagar"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        class="form-input text-right"
                        id=FieldId::MontoAplicar.dom_id()
                        prop:value=move || vm.form.with(|f| f.monto_aplicar.clone())
                        on:input=move |ev| vm.dispatch(FormAction::SetMontoAplicar(event_target_value(&ev)))
                        on:keydown=move |ev| vm.handle_key(FieldId::MontoAplicar, &ev)
                    />
                </div>
                <div class="form-group">
                    <label>"Total aplicado"</label>
                    <span class="form-static">{move || format_money(total_aplicado.get())}</span>
                </div>
            </div>

            {move || match vista.get() {
                VistaFacturas::SinBeneficiario => view! {
                    <p class="form-hint">"Seleccione el beneficiario para ver sus facturas pendientes."</p>
                }
                .into_any(),
                VistaFacturas::SinPendientes => {
                    view! { <p class="form-hint">"El tercero no tiene facturas pendientes."</p> }.into_any()
                }
                VistaFacturas::Tabla => view! {
                    <table class="table aplicaciones-table">
                        <thead>
                            <tr>
                                <th>"Factura"</th>
                                <th>"Fecha"</th>
                                <th>"Vencimiento"</th>
                                <th class="text-right">"Saldo"</th>
                                <th class="text-right">"Aplicar"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || { facturas.get().into_iter().enumerate().collect::<Vec<_>>() }
                                key=|(i, f)| (*i, f.id)
                                children=move |(i, factura)| {
                                    let factura_id = factura.id;
                                    let field = FieldId::Aplicacion(i);
                                    view! {
                                        <tr>
                                            <td>{factura.numero}</td>
                                            <td>{factura.fecha.map(format_naive).unwrap_or_default()}</td>
                                            <td>{factura.vencimiento.map(format_naive).unwrap_or_default()}</td>
                                            <td class="text-right">{format_money(factura.saldo)}</td>
                                            <td class="text-right">
                                                <input
                                                    type="text"
                                                    inputmode="decimal"
                                                    class="form-input text-right"
                                                    id=field.dom_id()
                                                    prop:value=move || {
                                                        vm.form.with(|f| f.aplicaciones.get(factura_id).to_string())
                                                    }
                                                    on:input=move |ev| {
                                                        vm.dispatch(FormAction::SetAplicacion {
                                                            factura_id,
                                                            valor: event_target_value(&ev),
                                                        })
                                                    }
                                                    on:keydown=move |ev| vm.handle_key(field, &ev)
                                                />
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn FilaRow(vm: DocumentoDetailsViewModel, fila: usize) -> impl IntoView {
    let generada = move || {
        vm.form
            .with(|f| f.filas.get(fila).map(|r| r.origen == OrigenFila::Aplicacion))
            .unwrap_or(false)
    };
    let valor = move |campo: FieldId| {
        move || {
            vm.form.with(|f| {
                f.filas
                    .get(fila)
                    .map(|r| match campo {
                        FieldId::Concepto(_) => r.concepto.clone(),
                        FieldId::Debito(_) => r.debito.clone(),
                        _ => r.credito.clone(),
                    })
                    .unwrap_or_default()
            })
        }
    };

    view! {
        <tr class=("fila--generada", generada)>
            <td>
                <CuentaInput
                    input_id=FieldId::Cuenta(fila).dom_id()
                    cuentas=vm.cuentas
                    selected=Signal::derive(move || vm.form.with(|f| f.filas.get(fila).and_then(|r| r.cuenta_id)))
                    on_select=Callback::new(move |cuenta_id| {
                        vm.dispatch(FormAction::SetCuenta { fila, cuenta_id })
                    })
                    on_key=Callback::new(move |ev: web_sys::KeyboardEvent| {
                        vm.handle_key(FieldId::Cuenta(fila), &ev)
                    })
                />
            </td>
            <td>
                <input
                    type="text"
                    class="form-input"
                    id=FieldId::Concepto(fila).dom_id()
                    prop:value=valor(FieldId::Concepto(fila))
                    on:input=move |ev| {
                        vm.dispatch(FormAction::SetConcepto { fila, texto: event_target_value(&ev) })
                    }
                    on:keydown=move |ev| vm.handle_key(FieldId::Concepto(fila), &ev)
                />
            </td>
            <td>
                <input
                    type="text"
                    inputmode="decimal"
                    class="form-input text-right"
                    id=FieldId::Debito(fila).dom_id()
                    prop:value=valor(FieldId::Debito(fila))
                    on:input=move |ev| {
                        vm.dispatch(FormAction::SetDebito { fila, valor: event_target_value(&ev) })
                    }
                    on:keydown=move |ev| vm.handle_key(FieldId::Debito(fila), &ev)
                />
            </td>
            <td>
                <input
                    type="text"
                    inputmode="decimal"
                    class="form-input text-right"
                    id=FieldId::Credito(fila).dom_id()
                    prop:value=valor(FieldId::Credito(fila))
                    on:input=move |ev| {
                        vm.dispatch(FormAction::SetCredito { fila, valor: event_target_value(&ev) })
                    }
                    on:keydown=move |ev| vm.handle_key(FieldId::Credito(fila), &ev)
                />
            </td>
            <td>
                <button
                    class="btn btn-icon"
                    title="Eliminar fila"
                    tabindex="-1"
                    on:click=move |_| vm.dispatch(FormAction::EliminarFila(fila))
                >
                    {icon("trash")}
                </button>
            </td>
        </tr>
    }
}
