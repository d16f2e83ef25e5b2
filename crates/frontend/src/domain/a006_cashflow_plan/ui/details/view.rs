use super::view_model::CashflowDetailsViewModel;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::table::number_format::{format_inr, format_quantity};
use crate::shared::date_utils::today;
use crate::shared::notify::use_notify;
use contracts::domain::a006_cashflow_plan::aggregate::CashflowType;
use contracts::shared::dates::format_date as iso_date;
use leptos::prelude::*;
use thaw::*;

/// Add/Edit dialog for a single cashflow plan
#[component]
pub fn CashflowPlanDialog(
    open: RwSignal<bool>,
    vm: CashflowDetailsViewModel,
    #[prop(into)]
    project: Signal<String>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let notify = use_notify();
    let plan_type = Signal::derive(move || vm.form.with(|f| f.plan_type));
    let is_edit = Signal::derive(move || vm.is_edit_mode());
    let needs_link = Signal::derive(move || plan_type.get().requires_link());

    let title = move || {
        let verb = if is_edit.get() { "Edit" } else { "Add" };
        format!("{} {}", verb, plan_type.get().label())
    };

    let link_error = vm.error_for("id_link");
    let amount_error = vm.error_for("planned_amount");
    let date_error = vm.error_for("planned_date");
    let remarks_error = vm.error_for("remarks");

    let min_date = iso_date(today());

    let save = move |_| {
        vm.save(
            project.get_untracked(),
            notify,
            Callback::new(move |_| {
                open.set(false);
                on_saved.run(());
            }),
        )
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{title}</DialogTitle>
                    <DialogContent>
                        <div class="form-grid form-grid--single">
                            <Show when=move || needs_link.get()>
                                <div class="form-group" class:form-group--invalid=move || link_error.get().is_some()>
                                    <label>{move || if plan_type.get() == CashflowType::Wo { "Work order" } else { "Purchase order" }}</label>
                                    <Show
                                        when=move || !is_edit.get()
                                        fallback=move || view! {
                                            <div class="form-static">{move || vm.form.with(|f| f.id_link.clone())}</div>
                                        }
                                    >
                                        <select
                                            class="form-input"
                                            prop:value=move || vm.form.with(|f| f.id_link.clone())
                                            on:change=move |ev| vm.select_link(event_target_value(&ev))
                                        >
                                            <option value="">"Select..."</option>
                                            {move || vm.link_options().into_iter().map(|o| {
                                                view! { <option value=o.id>{o.label}</option> }
                                            }).collect_view()}
                                        </select>
                                    </Show>
                                    {move || link_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                                </div>

                                <div class="form-group">
                                    <label>"Vendor"</label>
                                    <div class="form-static">{move || {
                                        let v = vm.vendor_label();
                                        if v.is_empty() { "-".to_string() } else { v }
                                    }}</div>
                                </div>

                                <ItemsSummary vm=vm />
                            </Show>

                            <div class="form-group" class:form-group--invalid=move || amount_error.get().is_some()>
                                <label>"Planned amount (₹)"</label>
                                <input
                                    type="text"
                                    inputmode="decimal"
                                    class="form-input"
                                    prop:value=move || vm.form.with(|f| f.planned_amount.clone())
                                    on:input=move |ev| {
                                        let v = event_target_value(&ev);
                                        vm.edit("planned_amount", |f| f.planned_amount = v);
                                    }
                                />
                                {move || amount_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                            </div>

                            <div class="form-group" class:form-group--invalid=move || date_error.get().is_some()>
                                <label>"Planned date"</label>
                                <DateInput
                                    value=Signal::derive(move || vm.form.with(|f| f.planned_date.clone()))
                                    on_change=Callback::new(move |v: String| vm.edit("planned_date", |f| f.planned_date = v))
                                    min=min_date.clone()
                                    invalid=Signal::derive(move || date_error.get().is_some())
                                />
                                {move || date_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                            </div>

                            <div class="form-group" class:form-group--invalid=move || remarks_error.get().is_some()>
                                <label>
                                    "Remarks"
                                    {move || (plan_type.get() == CashflowType::Misc)
                                        .then_some(view! { <span class="form-group__required">" *"</span> })}
                                </label>
                                <textarea
                                    class="form-input"
                                    rows="3"
                                    prop:value=move || vm.form.with(|f| f.remarks.clone())
                                    on:input=move |ev| {
                                        let v = event_target_value(&ev);
                                        vm.edit("remarks", |f| f.remarks = v);
                                    }
                                ></textarea>
                                {move || remarks_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                            </div>
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || vm.is_saving.get())
                            on_click=save
                        >
                            {move || if vm.is_saving.get() { "Saving..." } else { "Save" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
fn ItemsSummary(vm: CashflowDetailsViewModel) -> impl IntoView {
    view! {
        <Show when=move || vm.form.with(|f| !f.items.is_empty())>
            <table class="table__data table--compact">
                <thead>
                    <tr>
                        <th class="table__header-cell">"Item"</th>
                        <th class="table__header-cell table__header-cell--right">"Qty"</th>
                        <th class="table__header-cell table__header-cell--right">"Rate"</th>
                        <th class="table__header-cell table__header-cell--right">"Tax %"</th>
                        <th class="table__header-cell table__header-cell--right">"Amount"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || vm.form.with(|f| f.items.iter().map(|i| {
                        view! {
                            <tr class="table__row">
                                <td class="table__cell">{i.item_name.clone()}</td>
                                <td class="table__cell table__cell--right">
                                    {format!("{} {}", format_quantity(i.quantity), i.unit)}
                                </td>
                                <td class="table__cell table__cell--right">{format_inr(i.rate)}</td>
                                <td class="table__cell table__cell--right">{format_quantity(i.tax)}</td>
                                <td class="table__cell table__cell--right">{format_inr(i.amount_with_tax())}</td>
                            </tr>
                        }
                    }).collect_view())}
                </tbody>
            </table>
            <div class="form-hint">
                "Estimated: "
                {move || vm.form.with(|f| f.estimated_price).map(format_inr).unwrap_or_default()}
            </div>
        </Show>
    }
}
