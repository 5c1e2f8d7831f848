//! Ledger account input with code/name suggestions over the loaded chart.
use contracts::domain::a004_plan_cuentas::{buscar_cuenta, CuentaContable, CuentaId};
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

const MAX_SUGERENCIAS: usize = 8;

#[component]
pub fn CuentaInput(
    #[prop(into)] input_id: String,
    #[prop(into)] cuentas: Signal<Vec<CuentaContable>>,
    #[prop(into)] selected: Signal<Option<CuentaId>>,
    on_select: Callback<Option<CuentaId>>,
    #[prop(optional)] on_key: Option<Callback<KeyboardEvent>>,
) -> impl IntoView {
    let query = RwSignal::new(String::new());
    let editing = RwSignal::new(false);
    let highlighted = RwSignal::new(0usize);

    let selected_label = move || {
        let Some(id) = selected.get() else {
            return String::new();
        };
        cuentas.with(|list| {
            list.iter()
                .find(|c| c.id == id)
                .map(CuentaContable::etiqueta)
                .unwrap_or_else(|| id.to_string())
        })
    };

    let sugerencias = Memo::new(move |_| {
        if !editing.get() {
            return Vec::new();
        }
        let q = query.get();
        cuentas.with(|list| {
            buscar_cuenta(list, &q)
                .into_iter()
                .take(MAX_SUGERENCIAS)
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    let select = move |cuenta: Option<CuentaId>| {
        editing.set(false);
        query.set(String::new());
        on_select.run(cuenta);
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let len = sugerencias.with_untracked(Vec::len);
        match ev.key().as_str() {
            "ArrowDown" if len > 0 => {
                ev.prevent_default();
                highlighted.update(|h| *h = (*h + 1).min(len - 1));
            }
            "ArrowUp" if len > 0 => {
                ev.prevent_default();
                highlighted.update(|h| *h = h.saturating_sub(1));
            }
            "Enter" if len > 0 => {
                ev.prevent_default();
                let pick = sugerencias
                    .with_untracked(|s| s.get(highlighted.get_untracked()).map(|c| c.id));
                select(pick);
            }
            "Escape" => editing.set(false),
            _ => {
                if let Some(cb) = on_key {
                    cb.run(ev);
                }
            }
        }
    };

    view! {
        <div class="cuenta-input">
            <input
                type="text"
                class="form-input cuenta-input__field"
                id=input_id
                autocomplete="off"
                placeholder="Código o nombre"
                prop:value=move || if editing.get() { query.get() } else { selected_label() }
                on:input=move |ev| {
                    editing.set(true);
                    highlighted.set(0);
                    query.set(event_target_value(&ev));
                }
                on:keydown=on_keydown
                on:blur=move |_| editing.set(false)
            />
            <Show when=move || !sugerencias.with(Vec::is_empty)>
                <ul class="cuenta-input__list">
                    {move || {
                        sugerencias
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(i, c)| {
                                let id = c.id;
                                view! {
                                    <li
                                        class="cuenta-input__item"
                                        class=("cuenta-input__item--active", move || highlighted.get() == i)
                                        on:mousedown=move |ev| {
                                            ev.prevent_default();
                                            select(Some(id));
                                        }
                                    >
                                        <span class="cuenta-input__codigo">{c.codigo}</span>
                                        " "
                                        {c.nombre}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
