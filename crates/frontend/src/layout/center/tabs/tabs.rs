use super::tab::Tab;
use crate::layout::global_context::use_app_context;
use leptos::prelude::*;

/// Bar with one button per open tab
#[component]
pub fn TabStrip() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <Show when=move || ctx.opened.with(|t| !t.is_empty())>
            <div class="tabs-bar">
                <For
                    each=move || ctx.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <Tab tab=tab /> }
                />
            </div>
        </Show>
    }
}
