//! Business-partner search box with a debounced backend lookup.
use crate::domain::a003_tercero::api;
use crate::shared::debounce::use_debounced_search;
use contracts::domain::a003_tercero::Tercero;
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TerceroPicker(
    /// DOM id of the text input (focus routing target)
    #[prop(into)]
    input_id: String,
    /// Label of the current selection, shown while the user is not typing
    #[prop(into)]
    selected_label: Signal<String>,
    on_select: Callback<Option<Tercero>>,
    /// Keys the picker does not consume (Enter with the list closed, Tab)
    #[prop(optional)]
    on_key: Option<Callback<KeyboardEvent>>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "NIT o nombre...".to_string()
    } else {
        placeholder
    };

    let query = RwSignal::new(String::new());
    let editing = RwSignal::new(false);
    let results = RwSignal::new(Vec::<Tercero>::new());
    let open = RwSignal::new(false);
    let highlighted = RwSignal::new(0usize);
    let loading = RwSignal::new(false);
    let search = use_debounced_search();

    let close = move || {
        search.cancel();
        open.set(false);
        editing.set(false);
        loading.set(false);
    };

    let select = move |tercero: Option<Tercero>| {
        close();
        query.set(String::new());
        on_select.run(tercero);
    };

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        editing.set(true);
        query.set(value.clone());
        if value.trim().is_empty() {
            search.cancel();
            results.set(Vec::new());
            open.set(false);
            return;
        }
        search.input(value, move |term| {
            loading.set(true);
            spawn_local(async move {
                match api::buscar_terceros(&term).await {
                    Ok(list) => {
                        log::debug!("terceros '{}': {} results", term, list.len());
                        results.set(list);
                        highlighted.set(0);
                        open.set(true);
                    }
                    Err(e) => {
                        log::warn!("tercero search failed: {}", e);
                        results.set(Vec::new());
                    }
                }
                loading.set(false);
            });
        });
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let is_open = open.get_untracked() && !results.with_untracked(Vec::is_empty);
        match ev.key().as_str() {
            "ArrowDown" if is_open => {
                ev.prevent_default();
                let len = results.with_untracked(Vec::len);
                highlighted.update(|h| *h = (*h + 1).min(len.saturating_sub(1)));
            }
            "ArrowUp" if is_open => {
                ev.prevent_default();
                highlighted.update(|h| *h = h.saturating_sub(1));
            }
            "Enter" if is_open => {
                ev.prevent_default();
                let pick = results.with_untracked(|r| r.get(highlighted.get_untracked()).cloned());
                select(pick);
            }
            "Escape" => close(),
            _ => {
                if let Some(cb) = on_key {
                    cb.run(ev);
                }
            }
        }
    };

    view! {
        <div class="tercero-picker">
            <input
                type="text"
                class="form-input"
                id=input_id
                autocomplete="off"
                placeholder=placeholder
                disabled=move || disabled.get()
                prop:value=move || if editing.get() { query.get() } else { selected_label.get() }
                on:input=on_input
                on:keydown=on_keydown
                on:blur=move |_| {
                    // Clicks on the list fire mousedown before blur
                    if !open.get_untracked() {
                        editing.set(false);
                    }
                }
            />
            <Show when=move || loading.get()>
                <span class="tercero-picker__loading">"Buscando…"</span>
            </Show>
            <Show when=move || open.get()>
                <ul class="tercero-picker__list">
                    {move || {
                        let list = results.get();
                        if list.is_empty() {
                            return view! { <li class="tercero-picker__empty">"Sin resultados"</li> }
                                .into_any();
                        }
                        list.into_iter()
                            .enumerate()
                            .map(|(i, t)| {
                                let label = t.etiqueta();
                                view! {
                                    <li
                                        class="tercero-picker__item"
                                        class=("tercero-picker__item--active", move || highlighted.get() == i)
                                        on:mousedown=move |ev| {
                                            ev.prevent_default();
                                            select(Some(t.clone()));
                                        }
                                    >
                                        {label}
                                    </li>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                    <li class="tercero-picker__clear" on:mousedown=move |ev| {
                        ev.prevent_default();
                        select(None);
                    }>
                        "Quitar selección"
                    </li>
                </ul>
            </Show>
        </div>
    }
}
