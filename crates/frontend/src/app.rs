use crate::app_shell::MainLayout;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());

    view! {
        <ConfigProvider>
            <MainLayout />
        </ConfigProvider>
    }
}
