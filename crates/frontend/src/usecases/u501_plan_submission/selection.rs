//! First two stages of the add-plan dialogs: critical task, then POs and items

use super::view_model::PlanFlowViewModel;
use crate::shared::components::table::number_format::{format_inr, format_quantity};
use crate::shared::components::table_checkbox::TableCheckbox;
use contracts::domain::a003_procurement_order::aggregate::ProcurementOrder;
use leptos::prelude::*;

fn none_if_empty(v: String) -> Option<String> {
    (!v.is_empty()).then_some(v)
}

#[component]
pub fn TaskStep(vm: PlanFlowViewModel) -> impl IntoView {
    let category = move || vm.selection.with(|s| s.category.clone().unwrap_or_default());
    let task = move || vm.selection.with(|s| s.task.clone().unwrap_or_default());

    view! {
        <p class="form-hint">
            "Pick a critical PO task to offer only its POs, or leave the category empty to "
            "choose from every open PO."
        </p>
        <div class="form-grid">
            <div class="form-group">
                <label>"Critical category"</label>
                <select
                    class="form-input"
                    prop:value=category
                    on:change=move |ev| {
                        let v = none_if_empty(event_target_value(&ev));
                        vm.selection.update(|s| s.select_category(v));
                    }
                >
                    <option value="">"Any"</option>
                    {move || vm.categories().into_iter().map(|c| {
                        view! { <option value=c.clone()>{c.clone()}</option> }
                    }).collect_view()}
                </select>
            </div>
            <div
                class="form-group"
                class:form-group--invalid=move || !vm.selection.with(|s| s.can_advance())
            >
                <label>"Task"</label>
                <select
                    class="form-input"
                    prop:value=task
                    prop:disabled=move || category().is_empty()
                    on:change=move |ev| {
                        let v = none_if_empty(event_target_value(&ev));
                        vm.selection.update(|s| s.select_task(v));
                    }
                >
                    <option value="">"Select task"</option>
                    {move || vm.task_options().into_iter().map(|(id, label)| {
                        view! { <option value=id>{label}</option> }
                    }).collect_view()}
                </select>
            </div>
        </div>
    }
}

#[component]
pub fn PoStep(vm: PlanFlowViewModel) -> impl IntoView {
    let incomplete = move || {
        vm.selection.with(|s| {
            s.incomplete_pos()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="form-group">
            <input
                type="search"
                class="form-input"
                placeholder="Search PO, vendor or item"
                prop:value=move || vm.selection.with(|s| s.search.clone())
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    vm.selection.update(|s| s.search = v);
                }
            />
        </div>

        {move || {
            let missing = incomplete();
            (!missing.is_empty()).then(|| view! {
                <div class="warning-box">
                    {format!("Select at least one item of {}", missing.join(", "))}
                </div>
            })
        }}

        <div class="table">
            <table class="table__data">
                <thead class="table__head">
                    <tr>
                        <th class="table__header-cell table__header-cell--checkbox"></th>
                        <th class="table__header-cell">"PO / item"</th>
                        <th class="table__header-cell">"Vendor / unit"</th>
                        <th class="table__header-cell table__header-cell--right">"Qty"</th>
                        <th class="table__header-cell table__header-cell--right">"Amount"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || !vm.is_loading.get() && vm.candidates().is_empty()>
                        <tr>
                            <td class="table__cell table__cell--empty" colspan="5">
                                "No open POs match"
                            </td>
                        </tr>
                    </Show>
                    <For
                        each=move || vm.candidates()
                        key=|po| po.meta.name.clone()
                        children=move |po| view! { <PoRows vm=vm po=po /> }
                    />
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn PoRows(vm: PlanFlowViewModel, po: ProcurementOrder) -> impl IntoView {
    let po_id = StoredValue::new(po.meta.name.clone());
    let selected = Signal::derive(move || {
        vm.selection.with(|s| po_id.with_value(|id| s.is_po_selected(id)))
    });
    let total = format_inr(po.total_with_tax());
    let before_tax = format!("{} before tax", format_inr(po.total_amount()));
    let items = po.items();
    let item_count = format!("{} item(s)", items.len());
    let po = StoredValue::new(po);

    view! {
        <tr class="table__row table__row--group" class:table__row--selected=move || selected.get()>
            <TableCheckbox
                checked=selected
                on_change=Callback::new(move |_| {
                    po.with_value(|p| vm.selection.update(|s| s.toggle_po(p)))
                })
            />
            <td class="table__cell"><strong>{po_id.get_value()}</strong></td>
            <td class="table__cell">{po.with_value(|p| p.vendor_name.clone())}</td>
            <td class="table__cell table__cell--right">{item_count}</td>
            <td class="table__cell table__cell--right" title=before_tax>{total}</td>
        </tr>
        <Show when=move || selected.get()>
            {items.iter().map(|item| {
                let line = item.line;
                let checked = Signal::derive(move || {
                    vm.selection.with(|s| po_id.with_value(|id| s.is_item_selected(id, line)))
                });
                view! {
                    <tr class="table__row table__row--nested">
                        <TableCheckbox
                            checked=checked
                            on_change=Callback::new(move |_| {
                                po_id.with_value(|id| vm.selection.update(|s| s.toggle_item(id, line)))
                            })
                        />
                        <td class="table__cell">{item.item_name.clone()}</td>
                        <td class="table__cell table__cell--muted">{item.unit.clone()}</td>
                        <td class="table__cell table__cell--right">
                            {format_quantity(item.quantity)}
                        </td>
                        <td class="table__cell table__cell--right">
                            {format_inr(item.amount_with_tax())}
                        </td>
                    </tr>
                }
            }).collect_view()}
        </Show>
    }
}
