//! Main layout: sidebar on the left, open tabs in the center

use crate::layout::global_context::{use_app_context, Tab as TabData};
use crate::layout::left::Sidebar;
use crate::layout::tabs::{tab_label_for_key, TabPage};
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn AppShell() -> impl IntoView {
    let tabs_store = use_app_context();

    tabs_store.init_router_integration();
    if tabs_store.opened.with_untracked(|t| t.is_empty()) {
        tabs_store.open_tab("a006_cashflow_plan", tab_label_for_key("a006_cashflow_plan"));
    }

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                    />
                }
                .into_any()
            }
        />
    }
}
