use crate::domain::a003_procurement_order::ui::model::fetch_project_pos;
use crate::domain::a007_material_plan::ui::model::fetch_plans;
use crate::shared::components::table_checkbox::TableCheckbox;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use crate::usecases::u501_plan_submission::api::{submit_review, SubmitContext};
use crate::usecases::u501_plan_submission::review::CashflowReviewTable;
use contracts::domain::a003_procurement_order::aggregate::ProcurementOrder;
use contracts::domain::a006_cashflow_plan::aggregate::CashflowPlan;
use contracts::domain::a007_material_plan::aggregate::MaterialDeliveryPlan;
use contracts::usecases::u501_plan_submission::{CashflowDraft, PlanReview};
use contracts::usecases::u502_from_material_plan::{
    linked_plans, to_cashflow_drafts, MaterialPlanPicker,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Picks PO-linked material plans and turns them into PO cashflow plans
#[component]
pub fn FromMaterialPlanDialog(
    project: String,
    is_submitting: RwSignal<bool>,
    on_close: Callback<()>,
    on_created: Callback<()>,
) -> impl IntoView {
    let notify = use_notify();
    let plans = RwSignal::new(Vec::<MaterialDeliveryPlan>::new());
    let pos = RwSignal::new(Vec::<ProcurementOrder>::new());
    let picker = RwSignal::new(MaterialPlanPicker::new());
    let review = RwSignal::new(PlanReview::<CashflowDraft>::new(Vec::new()));
    let reviewing = RwSignal::new(false);
    let show_errors = RwSignal::new(false);
    let is_loading = RwSignal::new(true);

    {
        let project = project.clone();
        spawn_local(async move {
            match fetch_plans(&project).await {
                Ok(list) => plans.set(list),
                Err(e) => notify.error("Failed to load material plans", e),
            }
            match fetch_project_pos(&project).await {
                Ok(list) => pos.set(list),
                Err(e) => notify.error("Failed to load purchase orders", e),
            }
            is_loading.set(false);
        });
    }

    let project = StoredValue::new(project);
    let linked = Memo::new(move |_| {
        plans.with(|p| linked_plans(p).into_iter().cloned().collect::<Vec<_>>())
    });
    let all_selected = Signal::derive(move || {
        let total = linked.with(|l| l.len());
        total > 0 && picker.with(|p| p.len()) == total
    });

    let go_review = move |_| {
        let conv = plans.with_untracked(|p| {
            picker.with_untracked(|sel| pos.with_untracked(|po| to_cashflow_drafts(p, sel, po)))
        });
        if !conv.skipped.is_empty() {
            notify.info(
                "Some plans were skipped",
                format!("Their PO is not open: {}", conv.skipped.join(", ")),
            );
        }
        log::debug!("{} cashflow draft(s) from material plans", conv.drafts.len());
        review.set(PlanReview::new(conv.drafts));
        show_errors.set(false);
        reviewing.set(true);
    };
    let on_submit = move |_| {
        submit_review::<CashflowPlan, CashflowDraft>(
            review,
            project.get_value(),
            SubmitContext {
                notify,
                is_submitting,
                show_errors,
                on_created,
                on_close,
            },
            move |created: &[CashflowDraft]| {
                picker.update(|p| {
                    p.forget(created.iter().filter_map(|d| d.source_plan.as_deref()))
                });
            },
        );
    };

    view! {
        <div class="plan-flow">
            <div class="modal-header">
                <h2 class="modal-title">"PO cashflow from material plans"</h2>
                <button
                    class="button button--icon"
                    title="Close"
                    disabled=move || is_submitting.get()
                    on:click=move |_| on_close.run(())
                >
                    {icon("x")}
                </button>
            </div>

            <div class="modal-body">
                <Show
                    when=move || !is_loading.get()
                    fallback=|| view! { <Spinner label="Loading material plans..." /> }
                >
                    <Show
                        when=move || reviewing.get()
                        fallback=move || view! {
                            <div class="table">
                                <table class="table__data table--striped">
                                    <thead class="table__head">
                                        <tr>
                                            <th class="table__header-cell table__header-cell--checkbox">
                                                <input
                                                    type="checkbox"
                                                    class="table__checkbox"
                                                    prop:checked=all_selected
                                                    on:change=move |ev| {
                                                        if event_target_checked(&ev) {
                                                            plans.with_untracked(|p| picker.update(|s| s.select_all(p)));
                                                        } else {
                                                            picker.update(|s| s.clear());
                                                        }
                                                    }
                                                />
                                            </th>
                                            <th class="table__header-cell">"PO"</th>
                                            <th class="table__header-cell">"Category"</th>
                                            <th class="table__header-cell">"Delivery"</th>
                                            <th class="table__header-cell table__header-cell--right">"Items"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <Show when=move || linked.with(|l| l.is_empty())>
                                            <tr>
                                                <td class="table__cell table__cell--empty" colspan="5">
                                                    "No PO-linked material plans in this project"
                                                </td>
                                            </tr>
                                        </Show>
                                        <For
                                            each=move || linked.get()
                                            key=|p| p.meta.name.clone()
                                            children=move |plan| {
                                                let name = StoredValue::new(plan.meta.name.clone());
                                                let checked = Signal::derive(move || {
                                                    picker.with(|p| name.with_value(|n| p.is_selected(n)))
                                                });
                                                view! {
                                                    <tr class="table__row" class:table__row--selected=move || checked.get()>
                                                        <TableCheckbox
                                                            checked=checked
                                                            on_change=Callback::new(move |_| {
                                                                name.with_value(|n| picker.update(|p| p.toggle(n)))
                                                            })
                                                        />
                                                        <td class="table__cell">{plan.po_link.clone().unwrap_or_default()}</td>
                                                        <td class="table__cell">{plan.critical_po_category.clone().unwrap_or_default()}</td>
                                                        <td class="table__cell">{format_date(&plan.delivery_date)}</td>
                                                        <td class="table__cell table__cell--right">{plan.items().len()}</td>
                                                    </tr>
                                                }
                                            }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        }
                    >
                        <Show
                            when=move || !review.with(|r| r.is_empty())
                            fallback=|| view! { <p class="form-hint">"No plans left to create."</p> }
                        >
                            <CashflowReviewTable
                                review=review
                                show_errors=show_errors
                                locked=is_submitting.into()
                            />
                        </Show>
                    </Show>
                </Show>
            </div>

            <div class="modal-footer">
                <Show
                    when=move || reviewing.get()
                    fallback=move || view! {
                        <span class="form-hint">{move || format!("{} selected", picker.with(|p| p.len()))}</span>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || picker.with(|p| p.is_empty()))
                            on_click=go_review
                        >
                            "Next "
                            {icon("arrow-right")}
                        </Button>
                    }
                >
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || is_submitting.get())
                        on_click=move |_| reviewing.set(false)
                    >
                        {icon("arrow-left")}
                        " Back"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || is_submitting.get() || review.with(|r| r.is_empty()))
                        on_click=on_submit
                    >
                        {move || if is_submitting.get() {
                            "Creating...".to_string()
                        } else {
                            format!("Create {} plan(s)", review.with(|r| r.len()))
                        }}
                    </Button>
                </Show>
            </div>
        </div>
    }
}
