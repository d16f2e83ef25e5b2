//! Bulk PO cashflow: task, POs and items, then one plan row per PO

use super::api::{submit_review, SubmitContext};
use super::frame::{FlowFooter, FlowHeader};
use super::review::CashflowReviewTable;
use super::selection::{PoStep, TaskStep};
use super::view_model::PlanFlowViewModel;
use crate::shared::notify::use_notify;
use contracts::domain::a006_cashflow_plan::aggregate::CashflowPlan;
use contracts::usecases::u501_plan_submission::{
    build_cashflow_drafts, CashflowDraft, PlanReview, PlanStage,
};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn AddPoCashflowForm(
    project: String,
    is_submitting: RwSignal<bool>,
    on_close: Callback<()>,
    on_created: Callback<()>,
) -> impl IntoView {
    let notify = use_notify();
    let vm = PlanFlowViewModel::new();
    vm.load(project.clone(), notify);

    let project = StoredValue::new(project);
    let review = RwSignal::new(PlanReview::<CashflowDraft>::new(Vec::new()));
    let show_errors = RwSignal::new(false);
    let stage = Memo::new(move |_| vm.selection.with(|s| s.stage));

    let on_next = Callback::new(move |_| {
        let moved = vm.selection.try_update(|s| s.advance()).unwrap_or(false);
        if moved && vm.selection.with_untracked(|s| s.stage) == PlanStage::Review {
            let drafts = vm
                .selection
                .with_untracked(|s| vm.pos.with_untracked(|pos| build_cashflow_drafts(s, pos)));
            log::debug!("{} cashflow draft(s) for review", drafts.len());
            review.set(PlanReview::new(drafts));
            show_errors.set(false);
        }
    });
    let on_back = Callback::new(move |_| vm.selection.update(|s| s.back()));
    let on_submit = Callback::new(move |_| {
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
                vm.selection
                    .update(|s| s.forget_pos(created.iter().map(|d| d.po_id.as_str())));
            },
        );
    });

    view! {
        <div class="plan-flow">
            <FlowHeader
                title="Add PO cashflow plans"
                stage=stage
                is_submitting=is_submitting
                on_close=on_close
            />
            <div class="modal-body">
                <Show
                    when=move || !vm.is_loading.get()
                    fallback=|| view! { <Spinner label="Loading tasks and POs..." /> }
                >
                    {move || match stage.get() {
                        PlanStage::SelectTask => view! { <TaskStep vm=vm /> }.into_any(),
                        PlanStage::SelectPos => view! { <PoStep vm=vm /> }.into_any(),
                        PlanStage::Review => view! {
                            <Show
                                when=move || !review.with(|r| r.is_empty())
                                fallback=|| {
                                    view! { <p class="form-hint">"No plans left to create."</p> }
                                }
                            >
                                <CashflowReviewTable
                                    review=review
                                    show_errors=show_errors
                                    locked=is_submitting.into()
                                />
                            </Show>
                        }
                        .into_any(),
                    }}
                </Show>
            </div>
            <FlowFooter
                stage=stage
                can_next=Signal::derive(move || vm.selection.with(|s| s.can_advance()))
                submit_label=Signal::derive(move || {
                    format!("Create {} plan(s)", review.with(|r| r.len()))
                })
                can_submit=Signal::derive(move || !review.with(|r| r.is_empty()))
                is_submitting=is_submitting
                on_back=on_back
                on_next=on_next
                on_submit=on_submit
            />
        </div>
    }
}
