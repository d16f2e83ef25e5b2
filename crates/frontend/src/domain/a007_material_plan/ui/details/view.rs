use super::view_model::MaterialDetailsViewModel;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::table::number_format::format_quantity;
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use contracts::domain::a007_material_plan::aggregate::MaterialPlanItem;
use contracts::domain::a007_material_plan::form::QuantityCaps;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn MaterialPlanDialog(
    open: RwSignal<bool>,
    vm: MaterialDetailsViewModel,
    on_saved: Callback<()>,
) -> impl IntoView {
    let notify = use_notify();

    let title = move || {
        vm.edit
            .with(|e| e.as_ref().map(|e| format!("Edit {}", e.name)))
            .unwrap_or_else(|| "Edit material plan".to_string())
    };
    let po_label = move || {
        vm.edit
            .with(|e| e.as_ref().and_then(|e| e.po_link.clone()))
            .unwrap_or_else(|| "New order".to_string())
    };
    let message = move || vm.errors.with(|e| e.first_message());
    // items may repeat on separate lines, so rows are keyed by position
    let items = move || {
        vm.edit
            .with(|e| {
                e.as_ref()
                    .map(|e| e.items.iter().cloned().enumerate().collect::<Vec<_>>())
            })
            .unwrap_or_default()
    };

    let save = move |_| {
        vm.save(
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
                            <div class="form-group">
                                <label>"Purchase order"</label>
                                <div class="form-static">{po_label}</div>
                            </div>
                            <div class="form-group" class:form-group--invalid=move || vm.errors.with(|e| e.has("delivery_date"))>
                                <label>"Delivery date"</label>
                                <DateInput
                                    value=Signal::derive(move || {
                                        vm.edit.with(|e| e.as_ref().map(|e| e.delivery_date.clone())).unwrap_or_default()
                                    })
                                    on_change=Callback::new(move |v: String| vm.update(|e| e.set_delivery_date(&v)))
                                    invalid=Signal::derive(move || vm.errors.with(|e| e.has("delivery_date")))
                                />
                            </div>
                        </div>

                        {move || message().map(|m| view! { <div class="warning-box">{m}</div> })}

                        <table class="table__data table--compact">
                            <thead>
                                <tr>
                                    <th class="table__header-cell">"Item"</th>
                                    <th class="table__header-cell table__header-cell--right">"Ordered"</th>
                                    <th class="table__header-cell table__header-cell--right">"Quantity"</th>
                                    <th class="table__header-cell"></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=items
                                    key=|(line, i): &(usize, MaterialPlanItem)| (*line, i.item_id.clone())
                                    children=move |(line, item)| {
                                        let item_id = StoredValue::new(item.item_id.clone());
                                        let ordered = move || {
                                            vm.ordered
                                                .with(|o| item_id.with_value(|id| o.get(id)))
                                                .map(format_quantity)
                                                .unwrap_or_else(|| "-".to_string())
                                        };
                                        view! {
                                            <tr class="table__row">
                                                <td class="table__cell">{item.item_name.clone()}</td>
                                                <td class="table__cell table__cell--right">
                                                    {ordered}" "{item.unit.clone()}
                                                </td>
                                                <td class="table__cell table__cell--right">
                                                    <input
                                                        type="number"
                                                        min="0"
                                                        step="any"
                                                        class="form-input form-input--narrow"
                                                        value=format_quantity(item.quantity)
                                                        on:input=move |ev| {
                                                            let raw = event_target_value(&ev);
                                                            vm.set_quantity(line, &raw);
                                                        }
                                                    />
                                                </td>
                                                <td class="table__cell table__cell--actions">
                                                    <button
                                                        class="button button--icon"
                                                        title="Remove item"
                                                        on:click=move |_| vm.update(|e| e.remove_item(line))
                                                    >
                                                        {icon("x")}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                        {move || match vm.ordered.get() {
                            QuantityCaps::Loading => Some(view! {
                                <p class="form-hint">"Loading ordered quantities of the PO..."</p>
                            }.into_any()),
                            QuantityCaps::Failed => Some(view! {
                                <div class="warning-box">
                                    "The purchase order could not be loaded, so quantities cannot be checked. Reopen the plan to retry."
                                </div>
                            }.into_any()),
                            _ => None,
                        }}
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || !vm.can_save())
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
