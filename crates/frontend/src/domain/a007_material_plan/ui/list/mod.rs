mod state;

use super::details::{MaterialDetailsViewModel, MaterialPlanDialog};
use super::model;
use crate::layout::global_context::use_app_context;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::table::number_format::format_quantity;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::print_button::PrintButton;
use crate::usecases::u501_plan_submission::AddMaterialPlanForm;
use contracts::domain::a007_material_plan::aggregate::MaterialDeliveryPlan;
use contracts::domain::a007_material_plan::grouping::{group_by_category, MaterialGroup};
use contracts::domain::common::DocType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{create_state, MaterialListState};
use thaw::*;

#[component]
pub fn MaterialPlanList() -> impl IntoView {
    let ctx = use_app_context();
    let notify = use_notify();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let state = create_state();
    let filter_expanded = RwSignal::new(false);
    let details = MaterialDetailsViewModel::new();
    let dialog_open = RwSignal::new(false);
    let project = Signal::derive(move || ctx.active_project.get().unwrap_or_default());

    let load = move || {
        let project = project.get_untracked();
        let generation = state.try_update(|s| s.begin_load()).unwrap_or_default();
        if project.is_empty() {
            state.update(|s| {
                s.finish_load(generation, Some(Vec::new()));
            });
            return;
        }
        spawn_local(async move {
            match model::fetch_plans(&project).await {
                Ok(plans) => {
                    let count = plans.len();
                    if state.try_update(|s| s.finish_load(generation, Some(plans))) == Some(true) {
                        log::debug!("loaded {} material plans for {}", count, project);
                    }
                }
                Err(e) => {
                    if state.try_update(|s| s.finish_load(generation, None)) == Some(true) {
                        notify.error("Failed to load material plans", e);
                    }
                }
            }
        });
    };

    Effect::new(move |_| {
        project.track();
        load();
    });

    let groups =
        Memo::new(move |_| state.with(|s| group_by_category(&s.filter().apply(&s.plans))));
    let shown =
        Signal::derive(move || groups.with(|g| g.iter().map(|g| g.plans.len()).sum::<usize>()));
    let active_filters = Signal::derive(move || state.with(|s| s.active_filters()));
    let refresh = Callback::new(move |_| load());

    let on_edit = Callback::new(move |plan: MaterialDeliveryPlan| {
        details.open(&plan, notify);
        dialog_open.set(true);
    });

    let on_delete = Callback::new(move |plan: MaterialDeliveryPlan| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "Delete the delivery of {} planned for {}?",
                    plan.po_link.as_deref().unwrap_or("a new order"),
                    format_date(&plan.delivery_date)
                ))
                .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match model::delete_plan(&plan.meta.name).await {
                Ok(()) => {
                    log::info!("deleted {} {}", MaterialDeliveryPlan::element_name(), plan.name());
                    notify.success("Material plan deleted");
                    load();
                }
                Err(e) => notify.error("Failed to delete material plan", e),
            }
        });
    });

    let open_add = move |_| {
        let project = project.get_untracked();
        let existing = state.with_untracked(|s| s.plans.clone());
        let submitting = RwSignal::new(false);
        modal_stack.push_with(
            ModalOptions::class("plan-flow-modal").guarded(move || !submitting.get_untracked()),
            move |handle| {
                view! {
                    <AddMaterialPlanForm
                        project=project.clone()
                        existing=existing.clone()
                        is_submitting=submitting
                        on_close=Callback::new(move |_| handle.close())
                        on_created=refresh
                    />
                }
                .into_any()
            },
        );
    };

    let no_project = Signal::derive(move || project.get().is_empty());

    view! {
        <PageFrame page_id="a007_material_plan--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h1 class="page__title">{MaterialDeliveryPlan::list_name()}</h1>
                <div class="header__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=open_add disabled=no_project>
                        {icon("plus")}
                        " Add"
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| load()>
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <PrintButton
                        doctype="Projects"
                        format="Project Material Delivery Report"
                        name=project
                        from_date=Signal::derive(move || state.with(|s| s.from.clone()))
                        to_date=Signal::derive(move || state.with(|s| s.to.clone()))
                    />
                </div>
            </div>

            <FilterPanel
                is_expanded=filter_expanded
                active_filters_count=active_filters
                summary=move || view! {
                    <span class="filter-panel__summary">{move || format!("{} plan(s)", shown.get())}</span>
                }
                filter_tags=move || view! { {move || active_filter_tags(state)} }
            >
                <div class="filter-panel__fields">
                    <div class="form-group">
                        <label>"Search"</label>
                        <input
                            type="text"
                            class="form-input"
                            placeholder="PO, item, package, task"
                            prop:value=move || state.with(|s| s.search.clone())
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                state.update(|s| s.search = v);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label>"Critical category"</label>
                        <select
                            class="form-input"
                            prop:value=move || state.with(|s| s.category.clone())
                            on:change=move |ev| {
                                let v = event_target_value(&ev);
                                state.update(|s| s.category = v);
                            }
                        >
                            <option value="">"All"</option>
                            {move || state.with(|s| s.categories()).into_iter().map(|c| {
                                view! { <option value=c.clone()>{c.clone()}</option> }
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>"From"</label>
                        <input
                            type="date"
                            class="form-input"
                            prop:value=move || state.with(|s| s.from.clone())
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                state.update(|s| s.from = v);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label>"To"</label>
                        <input
                            type="date"
                            class="form-input"
                            prop:value=move || state.with(|s| s.to.clone())
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                state.update(|s| s.to = v);
                            }
                        />
                    </div>
                </div>
            </FilterPanel>

            <div class="page__content">
                <Show when=move || state.with(|s| s.is_loaded && s.plans.is_empty())>
                    <div class="empty-state">
                        {move || if no_project.get() { "Select a project" } else { "No material plans yet" }}
                    </div>
                </Show>
                {move || groups.get().into_iter().map(|group| {
                    view! { <CategoryGroup group=group state=state on_edit=on_edit on_delete=on_delete /> }
                }).collect_view()}
            </div>

            <MaterialPlanDialog open=dialog_open vm=details on_saved=refresh />
        </PageFrame>
    }
}

fn active_filter_tags(state: RwSignal<MaterialListState>) -> AnyView {
    let s = state.get();
    let mut tags = Vec::new();
    if !s.search.is_empty() {
        tags.push(view! {
            <FilterTag
                label=format!("Search: {}", s.search)
                on_remove=Callback::new(move |_| state.update(|s| s.search.clear()))
            />
        }.into_any());
    }
    if !s.category.is_empty() {
        tags.push(view! {
            <FilterTag
                label=format!("Category: {}", s.category)
                on_remove=Callback::new(move |_| state.update(|s| s.category.clear()))
            />
        }.into_any());
    }
    if !s.from.is_empty() || !s.to.is_empty() {
        let range = format!(
            "Delivery: {} – {}",
            if s.from.is_empty() { "…".to_string() } else { format_date(&s.from) },
            if s.to.is_empty() { "…".to_string() } else { format_date(&s.to) }
        );
        tags.push(view! {
            <FilterTag
                label=range
                on_remove=Callback::new(move |_| state.update(|s| {
                    s.from.clear();
                    s.to.clear();
                }))
            />
        }.into_any());
    }
    tags.collect_view().into_any()
}

#[component]
fn CategoryGroup(
    group: MaterialGroup,
    state: RwSignal<MaterialListState>,
    on_edit: Callback<MaterialDeliveryPlan>,
    on_delete: Callback<MaterialDeliveryPlan>,
) -> impl IntoView {
    let key = StoredValue::new(if group.key.is_empty() {
        group.label.clone()
    } else {
        group.key.clone()
    });
    let expanded = move || state.with(|s| key.with_value(|k| !s.collapsed.contains(k)));
    let summary = format!("{} delivery(ies) · {} item line(s)", group.plans.len(), group.item_count());
    let plans = StoredValue::new(group.plans);

    view! {
        <section class="plan-group">
            <div
                class="plan-group__header"
                on:click=move |_| state.update(|s| key.with_value(|k| s.toggle_group(k)))
            >
                {move || if expanded() { icon("chevron-down") } else { icon("chevron-right") }}
                <h3 class="plan-group__title">{group.label}</h3>
                <span class="plan-group__summary">{summary}</span>
            </div>
            <Show when=expanded>
                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"Delivery"</th>
                                <th class="table__header-cell">"Purchase order"</th>
                                <th class="table__header-cell">"Task / package"</th>
                                <th class="table__header-cell">"Items"</th>
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || plans.get_value().into_iter().map(|plan| {
                                view! { <PlanRow plan=plan on_edit=on_edit on_delete=on_delete /> }
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            </Show>
        </section>
    }
}

#[component]
fn PlanRow(
    plan: MaterialDeliveryPlan,
    on_edit: Callback<MaterialDeliveryPlan>,
    on_delete: Callback<MaterialDeliveryPlan>,
) -> impl IntoView {
    let date = format_date(&plan.delivery_date);
    let po = plan.po_link.clone().unwrap_or_else(|| plan.po_type.clone());
    let task = [plan.critical_po_task.clone(), plan.package_name.clone()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
    let items = plan.items();
    let plan = StoredValue::new(plan);

    view! {
        <tr class="table__row">
            <td class="table__cell">{date}</td>
            <td class="table__cell">{po}</td>
            <td class="table__cell table__cell--muted">{task}</td>
            <td class="table__cell">
                <ul class="item-list">
                    {items.into_iter().map(|i| view! {
                        <li>
                            {i.item_name}
                            <span class="item-list__qty">{format!(" {} {}", format_quantity(i.quantity), i.unit)}</span>
                        </li>
                    }).collect_view()}
                </ul>
            </td>
            <td class="table__cell table__cell--actions">
                <button class="button button--icon" title="Edit" on:click=move |_| on_edit.run(plan.get_value())>
                    {icon("edit")}
                </button>
                <button class="button button--icon" title="Delete" on:click=move |_| on_delete.run(plan.get_value())>
                    {icon("delete")}
                </button>
            </td>
        </tr>
    }
}
