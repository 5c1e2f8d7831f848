//! Page-level alerts shown above the content.
use leptos::prelude::*;
use thaw::*;

/// Error text of the last failed action; hidden while `None`.
#[component]
pub fn ErrorBar(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || error.get().map(|e| view! {
            <div class="page__alert">
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            </div>
        })}
    }
}

/// Confirmation of the last successful action.
#[component]
pub fn NoticeBar(#[prop(into)] notice: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || notice.get().map(|n| view! {
            <div class="page__alert">
                <MessageBar intent=MessageBarIntent::Success>{n}</MessageBar>
            </div>
        })}
    }
}
