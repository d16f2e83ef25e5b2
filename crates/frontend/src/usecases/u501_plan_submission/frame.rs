use crate::shared::icons::icon;
use contracts::usecases::u501_plan_submission::PlanStage;
use leptos::prelude::*;
use thaw::*;

const STAGES: [PlanStage; 3] = [PlanStage::SelectTask, PlanStage::SelectPos, PlanStage::Review];

#[component]
pub fn FlowHeader(
    #[prop(into)] title: String,
    #[prop(into)] stage: Signal<PlanStage>,
    is_submitting: RwSignal<bool>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-header">
            <h2 class="modal-title">{title}</h2>
            <ol class="flow-steps">
                {STAGES.into_iter().enumerate().map(|(i, s)| view! {
                    <li
                        class="flow-steps__item"
                        class:flow-steps__item--active=move || stage.get() == s
                    >
                        {format!("{}. {}", i + 1, s.title())}
                    </li>
                }).collect_view()}
            </ol>
            <button
                class="button button--icon"
                title="Close"
                disabled=move || is_submitting.get()
                on:click=move |_| on_close.run(())
            >
                {icon("x")}
            </button>
        </div>
    }
}

#[component]
pub fn FlowFooter(
    #[prop(into)] stage: Signal<PlanStage>,
    #[prop(into)] can_next: Signal<bool>,
    #[prop(into)] submit_label: Signal<String>,
    #[prop(into)] can_submit: Signal<bool>,
    is_submitting: RwSignal<bool>,
    on_back: Callback<()>,
    on_next: Callback<()>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let is_review = move || stage.get() == PlanStage::Review;
    let back_disabled =
        Signal::derive(move || stage.get().prev().is_none() || is_submitting.get());
    let next_disabled = Signal::derive(move || !can_next.get());
    let submit_disabled = Signal::derive(move || !can_submit.get() || is_submitting.get());

    view! {
        <div class="modal-footer">
            <Button
                appearance=ButtonAppearance::Secondary
                disabled=back_disabled
                on_click=move |_| on_back.run(())
            >
                {icon("arrow-left")}
                " Back"
            </Button>
            <Show
                when=is_review
                fallback=move || view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=next_disabled
                        on_click=move |_| on_next.run(())
                    >
                        "Next "
                        {icon("arrow-right")}
                    </Button>
                }
            >
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=submit_disabled
                    on_click=move |_| on_submit.run(())
                >
                    {move || if is_submitting.get() { "Creating...".to_string() } else { submit_label.get() }}
                </Button>
            </Show>
        </div>
    }
}
