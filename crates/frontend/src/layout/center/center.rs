use super::tabs::TabStrip;
use leptos::prelude::*;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <TabStrip />
            <div class="tabs__content">{children()}</div>
        </div>
    }
}
