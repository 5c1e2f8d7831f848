//! Sidebar with collapsible menu groups, one per business area.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabKey;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(TabKey, &'static str)>, // (tab, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "contabilidad",
            label: "Contabilidad",
            icon: "book",
            items: vec![
                (TabKey::DocumentoList, "book"),
                (TabKey::DocumentoNew, "plus"),
            ],
        },
        MenuGroup {
            id: "facturacion",
            label: "Facturación",
            icon: "invoices",
            items: vec![
                (TabKey::FacturaVenta, "invoices"),
                (TabKey::Compra, "purchases"),
            ],
        },
        MenuGroup {
            id: "nomina",
            label: "Nómina",
            icon: "users",
            items: vec![(TabKey::NominaLiquidacion, "users")],
        },
        MenuGroup {
            id: "produccion",
            label: "Producción",
            icon: "factory",
            items: vec![(TabKey::Produccion, "factory")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(vec!["contabilidad".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups()
                .into_iter()
                .map(|group| {
                    let gid = group.id.to_string();
                    let gid_for_click = gid.clone();
                    let gid_for_chevron = gid.clone();
                    let gid_for_show = gid;
                    let items = StoredValue::new(group.items);

                    view! {
                        <div>
                            <div
                                class="app-sidebar__item"
                                style:padding-left="12px"
                                on:click=move |_| {
                                    let gid = gid_for_click.clone();
                                    expanded_groups.update(move |groups| {
                                        if let Some(pos) = groups.iter().position(|x| x == &gid) {
                                            groups.remove(pos);
                                        } else {
                                            groups.push(gid);
                                        }
                                    });
                                }
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(group.icon)}
                                    <span>{group.label}</span>
                                </div>
                                <div
                                    class="app-sidebar__chevron"
                                    class=(
                                        "app-sidebar__chevron--expanded",
                                        move || expanded_groups.with(|g| g.contains(&gid_for_chevron)),
                                    )
                                >
                                    {icon("chevron-right")}
                                </div>
                            </div>

                            <Show when=move || expanded_groups.with(|g| g.contains(&gid_for_show))>
                                <div class="app-sidebar__children">
                                    {items
                                        .get_value()
                                        .into_iter()
                                        .map(|(tab, icon_name)| {
                                            let key_for_active = tab.key();
                                            let label = tab.label();
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class=(
                                                        "app-sidebar__item--active",
                                                        move || ctx.active.with(|a| a.as_deref() == Some(key_for_active.as_str())),
                                                    )
                                                    style:padding-left="10px"
                                                    on:click=move |_| ctx.open(tab)
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(icon_name)}
                                                        <span>{label}</span>
                                                    </div>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </Show>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
