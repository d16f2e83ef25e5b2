//! Top bar: sidebar toggle, application title and the active project picker

use crate::domain::a001_project::ui::model::fetch_projects;
use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use contracts::domain::a001_project::aggregate::Project;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_app_context();
    let notify = use_notify();

    let projects = RwSignal::new(Vec::<Project>::new());
    let selected = RwSignal::new(ctx.active_project.get_untracked().unwrap_or_default());

    Effect::new(move |_| {
        ctx.projects_version.track();
        spawn_local(async move {
            match fetch_projects().await {
                Ok(list) => {
                    log::debug!("loaded {} projects", list.len());
                    let current = ctx.active_project.get_untracked();
                    let known = current
                        .as_deref()
                        .map(|c| list.iter().any(|p| p.meta.name == c))
                        .unwrap_or(false);
                    // a remembered project that no longer exists falls back to the first one
                    if !known {
                        let first = list.first().map(|p| p.meta.name.clone());
                        ctx.set_active_project(first.clone());
                        selected.set(first.unwrap_or_default());
                    }
                    projects.set(list);
                }
                Err(e) => notify.error("Failed to load projects", e),
            }
        });
    });

    // the picker and the context stay in step both ways
    Effect::new(move |_| {
        let value = selected.get();
        ctx.set_active_project(Some(value));
    });
    Effect::new(move |_| {
        let active = ctx.active_project.get().unwrap_or_default();
        if selected.get_untracked() != active {
            selected.set(active);
        }
    });

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"Project Planner"</span>
            </div>

            <div class="top-header__actions">
                <Label>"Project"</Label>
                <Select value=selected>
                    <Show when=move || projects.with(|p| p.is_empty())>
                        <option value="">"No projects"</option>
                    </Show>
                    <For
                        each=move || projects.get()
                        key=|p| p.meta.name.clone()
                        children=move |p| {
                            view! { <option value=p.meta.name.clone()>{p.display_label()}</option> }
                        }
                    />
                </Select>
            </div>
        </div>
    }
}
