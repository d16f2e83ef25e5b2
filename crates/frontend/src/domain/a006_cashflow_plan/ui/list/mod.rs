mod state;

use super::details::{CashflowDetailsViewModel, CashflowPlanDialog};
use super::model;
use crate::layout::global_context::use_app_context;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::table::number_format::{format_inr, format_quantity};
use crate::shared::components::table_totals_row::TableTotalsRow;
use crate::shared::date_utils::{format_date, format_month};
use crate::shared::icons::icon;
use crate::shared::modal_stack::{ModalOptions, ModalStackService};
use crate::shared::notify::use_notify;
use crate::shared::print_button::PrintButton;
use crate::usecases::u501_plan_submission::AddPoCashflowForm;
use crate::usecases::u502_from_material_plan::FromMaterialPlanDialog;
use contracts::domain::a006_cashflow_plan::aggregate::{CashflowPlan, CashflowType};
use contracts::domain::a006_cashflow_plan::grouping::{
    group_by_category, group_by_link, monthly_totals, total_planned, PlanGroup,
};
use contracts::domain::common::DocType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{create_state, Grouping};
use thaw::*;

/// Plans of one cashflow type for the active project
#[component]
pub fn CashflowList(plan_type: CashflowType) -> impl IntoView {
    let ctx = use_app_context();
    let notify = use_notify();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let initial_grouping = if plan_type.requires_link() {
        Grouping::Link
    } else {
        Grouping::None
    };
    let state = create_state(initial_grouping);
    let filter_expanded = RwSignal::new(false);
    let details = CashflowDetailsViewModel::new();
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
            match model::fetch_plans(&project, plan_type).await {
                Ok(plans) => {
                    let count = plans.len();
                    if state.try_update(|s| s.finish_load(generation, Some(plans))) == Some(true) {
                        log::debug!(
                            "loaded {} {} plans for {}",
                            count,
                            plan_type.as_str(),
                            project
                        );
                    }
                }
                Err(e) => {
                    if state.try_update(|s| s.finish_load(generation, None)) == Some(true) {
                        notify.error("Failed to load cashflow plans", e);
                    }
                }
            }
        });
    };

    Effect::new(move |_| {
        project.track();
        load();
    });

    let filtered = Memo::new(move |_| state.with(|s| s.inputs.to_filter().apply(&s.plans)));
    let groups = Memo::new(move |_| {
        let grouping = state.with(|s| s.grouping);
        filtered.with(|plans| match grouping {
            Grouping::Link => group_by_link(plans),
            Grouping::Category => group_by_category(plans),
            Grouping::None => Vec::new(),
        })
    });
    let total = Signal::derive(move || filtered.with(|p| total_planned(p)));
    let months = Memo::new(move |_| filtered.with(|p| monthly_totals(p)));
    let active_filters = Signal::derive(move || state.with(|s| s.inputs.active_count()));

    let refresh = Callback::new(move |_| load());

    let open_add = move |_| {
        details.open_new(plan_type, project.get_untracked(), notify);
        dialog_open.set(true);
    };

    let on_edit = Callback::new(move |plan: CashflowPlan| {
        details.open_edit(plan, notify);
        dialog_open.set(true);
    });

    let on_delete = Callback::new(move |plan: CashflowPlan| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "Delete the {} plan of {} for {}?",
                    plan.plan_type.as_str(),
                    format_date(&plan.planned_date),
                    format_inr(plan.planned_amount)
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
                    log::info!("deleted {} {}", CashflowPlan::element_name(), plan.name());
                    notify.success("Cashflow plan deleted");
                    load();
                }
                Err(e) => notify.error("Failed to delete cashflow plan", e),
            }
        });
    });

    let open_bulk = move |_| {
        let project = project.get_untracked();
        let submitting = RwSignal::new(false);
        modal_stack.push_with(
            ModalOptions::class("plan-flow-modal").guarded(move || !submitting.get_untracked()),
            move |handle| {
                view! {
                    <AddPoCashflowForm
                        project=project.clone()
                        is_submitting=submitting
                        on_close=Callback::new(move |_| handle.close())
                        on_created=refresh
                    />
                }
                .into_any()
            },
        );
    };

    let open_from_material = move |_| {
        let project = project.get_untracked();
        let submitting = RwSignal::new(false);
        modal_stack.push_with(
            ModalOptions::class("plan-flow-modal").guarded(move || !submitting.get_untracked()),
            move |handle| {
                view! {
                    <FromMaterialPlanDialog
                        project=project.clone()
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
        <div class="cashflow-list">
            <div class="header__actions">
                <Button appearance=ButtonAppearance::Primary on_click=open_add disabled=no_project>
                    {icon("plus")}
                    " Add"
                </Button>
                <Show when=move || plan_type == CashflowType::Po>
                    <Button appearance=ButtonAppearance::Secondary on_click=open_bulk disabled=no_project>
                        {icon("layers")}
                        " Add from POs"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=open_from_material disabled=no_project>
                        {icon("truck")}
                        " From material plans"
                    </Button>
                </Show>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| load()>
                    {icon("refresh")}
                    " Refresh"
                </Button>
                <PrintButton
                    doctype="Projects"
                    format="Project Cashflow Report"
                    name=project
                    from_date=Signal::derive(move || state.with(|s| s.inputs.from.clone()))
                    to_date=Signal::derive(move || state.with(|s| s.inputs.to.clone()))
                />
            </div>

            <FilterPanel
                is_expanded=filter_expanded
                active_filters_count=active_filters
                summary=move || view! {
                    <span class="filter-panel__summary">
                        {move || format!("{} plan(s) · {}", filtered.with(|p| p.len()), format_inr(total.get()))}
                    </span>
                }
                filter_tags=move || view! {
                    {move || {
                        let inputs = state.with(|s| s.inputs.clone());
                        let mut tags = Vec::new();
                        if !inputs.search.is_empty() {
                            tags.push(view! {
                                <FilterTag
                                    label=format!("Search: {}", inputs.search)
                                    on_remove=Callback::new(move |_| state.update(|s| s.inputs.search.clear()))
                                />
                            }.into_any());
                        }
                        if !inputs.from.is_empty() {
                            tags.push(view! {
                                <FilterTag
                                    label=format!("From {}", format_date(&inputs.from))
                                    on_remove=Callback::new(move |_| state.update(|s| s.inputs.from.clear()))
                                />
                            }.into_any());
                        }
                        if !inputs.to.is_empty() {
                            tags.push(view! {
                                <FilterTag
                                    label=format!("To {}", format_date(&inputs.to))
                                    on_remove=Callback::new(move |_| state.update(|s| s.inputs.to.clear()))
                                />
                            }.into_any());
                        }
                        if !inputs.category.is_empty() {
                            tags.push(view! {
                                <FilterTag
                                    label=format!("Category: {}", inputs.category)
                                    on_remove=Callback::new(move |_| state.update(|s| s.inputs.category.clear()))
                                />
                            }.into_any());
                        }
                        tags.collect_view()
                    }}
                }
            >
                <div class="filter-panel__fields">
                    <div class="form-group">
                        <label>"Search"</label>
                        <input
                            type="text"
                            class="form-input"
                            placeholder="PO, vendor, item, remarks"
                            prop:value=move || state.with(|s| s.inputs.search.clone())
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                state.update(|s| s.inputs.search = v);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label>"From"</label>
                        <input
                            type="date"
                            class="form-input"
                            prop:value=move || state.with(|s| s.inputs.from.clone())
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                state.update(|s| s.inputs.from = v);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label>"To"</label>
                        <input
                            type="date"
                            class="form-input"
                            prop:value=move || state.with(|s| s.inputs.to.clone())
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                state.update(|s| s.inputs.to = v);
                            }
                        />
                    </div>
                    <Show when=move || plan_type == CashflowType::Po>
                        <div class="form-group">
                            <label>"Critical category"</label>
                            <select
                                class="form-input"
                                prop:value=move || state.with(|s| s.inputs.category.clone())
                                on:change=move |ev| {
                                    let v = event_target_value(&ev);
                                    state.update(|s| s.inputs.category = v);
                                }
                            >
                                <option value="">"All"</option>
                                {move || state.with(|s| s.categories()).into_iter().map(|c| {
                                    view! { <option value=c.clone()>{c.clone()}</option> }
                                }).collect_view()}
                            </select>
                        </div>
                        <div class="form-group">
                            <label>"Group by"</label>
                            <select
                                class="form-input"
                                on:change=move |ev| {
                                    let grouping = if event_target_value(&ev) == "category" {
                                        Grouping::Category
                                    } else {
                                        Grouping::Link
                                    };
                                    state.update(|s| {
                                        s.grouping = grouping;
                                        s.expanded.clear();
                                    });
                                }
                            >
                                <option value="link">"Purchase order"</option>
                                <option value="category">"Critical category"</option>
                            </select>
                        </div>
                    </Show>
                </div>
            </FilterPanel>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell table__header-cell--narrow"></th>
                            <th class="table__header-cell">"Date"</th>
                            <th class="table__header-cell">
                                {if plan_type.requires_link() { "Order / vendor" } else { "Remarks" }}
                            </th>
                            <th class="table__header-cell">"Items / task"</th>
                            <th class="table__header-cell table__header-cell--right">"Estimated"</th>
                            <th class="table__header-cell table__header-cell--right">"Planned"</th>
                            <th class="table__header-cell table__header-cell--actions"></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || state.with(|s| s.is_loaded && s.plans.is_empty())>
                            <tr>
                                <td class="table__cell table__cell--empty" colspan="7">
                                    {move || if no_project.get() { "Select a project" } else { "No plans yet" }}
                                </td>
                            </tr>
                        </Show>
                        {move || {
                            if state.with(|s| s.grouping) == Grouping::None {
                                filtered.get().into_iter().map(|plan| {
                                    view! { <PlanRow plan=plan nested=false on_edit=on_edit on_delete=on_delete /> }
                                }).collect_view().into_any()
                            } else {
                                groups.get().into_iter().map(|group| {
                                    view! { <GroupRows group=group state=state on_edit=on_edit on_delete=on_delete /> }
                                }).collect_view().into_any()
                            }
                        }}
                        <TableTotalsRow amount=total span=5 trailing=1 />
                    </tbody>
                </table>
            </div>

            <Show when=move || months.with(|m| m.len() > 1)>
                <h3 class="section-title">"By month"</h3>
                <div class="table">
                    <table class="table__data table--compact">
                        <tbody>
                            {move || months.get().into_iter().map(|(month, sum)| view! {
                                <tr class="table__row">
                                    <td class="table__cell">{format_month(&month)}</td>
                                    <td class="table__cell table__cell--right">{format_inr(sum)}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            </Show>

            <CashflowPlanDialog open=dialog_open vm=details project=project on_saved=refresh />
        </div>
    }
}

#[component]
fn GroupRows(
    group: PlanGroup,
    state: RwSignal<state::CashflowListState>,
    on_edit: Callback<CashflowPlan>,
    on_delete: Callback<CashflowPlan>,
) -> impl IntoView {
    let key = StoredValue::new(if group.key.is_empty() {
        group.label.clone()
    } else {
        group.key.clone()
    });
    let expanded = move || state.with(|s| key.with_value(|k| s.expanded.contains(k)));
    let plans = StoredValue::new(group.plans.clone());
    let count = group.plans.len();

    view! {
        <tr
            class="table__row table__row--group"
            on:click=move |_| state.update(|s| key.with_value(|k| s.toggle_expanded(k)))
        >
            <td class="table__cell">
                {move || if expanded() { icon("chevron-down") } else { icon("chevron-right") }}
            </td>
            <td class="table__cell" colspan="2">
                <strong>{group.label.clone()}</strong>
            </td>
            <td class="table__cell">{format!("{} plan(s)", count)}</td>
            <td class="table__cell table__cell--right">
                {group.estimated().map(format_inr).unwrap_or_else(|| "-".to_string())}
            </td>
            <td class="table__cell table__cell--right">{format_inr(group.total)}</td>
            <td class="table__cell"></td>
        </tr>
        <Show when=expanded>
            {move || plans.get_value().into_iter().map(|plan| {
                view! { <PlanRow plan=plan nested=true on_edit=on_edit on_delete=on_delete /> }
            }).collect_view()}
        </Show>
    }
}

#[component]
fn PlanRow(
    plan: CashflowPlan,
    nested: bool,
    on_edit: Callback<CashflowPlan>,
    on_delete: Callback<CashflowPlan>,
) -> impl IntoView {
    let items = plan.item_list();
    let items_label = if items.is_empty() {
        plan.critical_po_task.clone().unwrap_or_default()
    } else {
        items
            .iter()
            .map(|i| format!("{} × {}", i.item_name, format_quantity(i.quantity)))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let second_column = if plan.plan_type.requires_link() {
        let link = plan.id_link.clone().unwrap_or_default();
        let vendor = plan.vendor_label();
        if vendor.is_empty() {
            link
        } else {
            format!("{} · {}", link, vendor)
        }
    } else {
        plan.remarks.clone().unwrap_or_default()
    };
    let estimated = plan
        .estimated_price
        .map(format_inr)
        .unwrap_or_else(|| "-".to_string());
    let date = format_date(&plan.planned_date);
    let amount = format_inr(plan.planned_amount);
    let plan = StoredValue::new(plan);

    view! {
        <tr class="table__row" class:table__row--nested=nested>
            <td class="table__cell"></td>
            <td class="table__cell">{date}</td>
            <td class="table__cell">{second_column}</td>
            <td class="table__cell table__cell--muted">{items_label}</td>
            <td class="table__cell table__cell--right">{estimated}</td>
            <td class="table__cell table__cell--right">{amount}</td>
            <td class="table__cell table__cell--actions">
                <button
                    class="button button--icon"
                    title="Edit"
                    on:click=move |e| {
                        e.stop_propagation();
                        on_edit.run(plan.get_value());
                    }
                >
                    {icon("edit")}
                </button>
                <button
                    class="button button--icon"
                    title="Delete"
                    on:click=move |e| {
                        e.stop_propagation();
                        on_delete.run(plan.get_value());
                    }
                >
                    {icon("delete")}
                </button>
            </td>
        </tr>
    }
}
