//! Review stage tables. Rows are edited in place; errors show after the
//! first submit attempt. Everything is read-only while a submit runs.

use crate::shared::components::date_input::DateInput;
use crate::shared::components::table::number_format::{format_inr, format_quantity};
use crate::shared::date_utils::today;
use crate::shared::icons::icon;
use contracts::shared::dates::format_date as iso_date;
use contracts::domain::a007_material_plan::aggregate::MaterialPlanItem;
use contracts::usecases::u501_plan_submission::{
    CashflowDraft, MaterialDraft, PlanReview, ReviewRow,
};
use leptos::prelude::*;

fn row_keys<D: ReviewRow>(review: &PlanReview<D>) -> Vec<(usize, String)> {
    review
        .rows()
        .iter()
        .enumerate()
        .map(|(i, d)| (i, d.label()))
        .collect()
}

fn row_error<D>(
    review: RwSignal<PlanReview<D>>,
    show: RwSignal<bool>,
    idx: usize,
) -> Option<String>
where
    D: ReviewRow + Send + Sync + 'static,
{
    if !show.get() {
        return None;
    }
    review.with(|r| {
        r.rows()
            .get(idx)
            .and_then(|d| d.validate(today()).err())
            .and_then(|e| e.first_message())
    })
}

/// No-op while a submit runs
fn edit_row<D>(
    review: RwSignal<PlanReview<D>>,
    locked: Signal<bool>,
    idx: usize,
    f: impl FnOnce(&mut D),
) where
    D: ReviewRow + Send + Sync + 'static,
{
    if locked.get_untracked() {
        return;
    }
    review.update(|r| {
        r.update(idx, f);
    });
}

#[component]
pub fn CashflowReviewTable(
    review: RwSignal<PlanReview<CashflowDraft>>,
    show_errors: RwSignal<bool>,
    locked: Signal<bool>,
) -> impl IntoView {
    let min = iso_date(today());
    let read = move |idx: usize, f: fn(&CashflowDraft) -> String| {
        review.with(|r| r.rows().get(idx).map(f).unwrap_or_default())
    };

    view! {
        <div class="table">
            <table class="table__data">
                <thead class="table__head">
                    <tr>
                        <th class="table__header-cell">"PO"</th>
                        <th class="table__header-cell table__header-cell--right">"Estimated"</th>
                        <th class="table__header-cell">"Planned amount"</th>
                        <th class="table__header-cell">"Planned date"</th>
                        <th class="table__header-cell">"Remarks"</th>
                        <th class="table__header-cell table__header-cell--actions"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || review.with(row_keys)
                        key=|k| k.clone()
                        children=move |(idx, label)| {
                            let min = min.clone();
                            let vendor = read(idx, |d| d.vendor_name.clone());
                            let items = read(idx, |d| {
                                d.items
                                    .iter()
                                    .map(|i| i.item_name.clone())
                                    .collect::<Vec<_>>()
                                    .join(", ")
                            });
                            let estimated = review.with_untracked(|r| {
                                r.rows().get(idx).map(|d| d.estimated).unwrap_or(0.0)
                            });
                            view! {
                                <tr class="table__row">
                                    <td class="table__cell">
                                        <strong>{label}</strong>
                                        <div class="table__cell--muted">{vendor}</div>
                                        <div class="table__cell--muted">{items}</div>
                                    </td>
                                    <td class="table__cell table__cell--right">
                                        {format_inr(estimated)}
                                    </td>
                                    <td class="table__cell">
                                        <input
                                            type="text"
                                            inputmode="decimal"
                                            class="form-input form-input--narrow"
                                            disabled=move || locked.get()
                                            prop:value=move || {
                                                read(idx, |d| d.planned_amount.clone())
                                            }
                                            on:input=move |ev| {
                                                let v = event_target_value(&ev);
                                                edit_row(review, locked, idx, |d| d.set_amount(&v));
                                            }
                                        />
                                    </td>
                                    <td class="table__cell">
                                        <DateInput
                                            value=Signal::derive(move || {
                                                read(idx, |d| d.planned_date.clone())
                                            })
                                            on_change=Callback::new(move |v: String| {
                                                edit_row(review, locked, idx, |d| d.set_date(&v));
                                            })
                                            min=min
                                            disabled=locked
                                        />
                                    </td>
                                    <td class="table__cell">
                                        <input
                                            type="text"
                                            class="form-input"
                                            disabled=move || locked.get()
                                            prop:value=move || read(idx, |d| d.remarks.clone())
                                            on:input=move |ev| {
                                                let v = event_target_value(&ev);
                                                edit_row(review, locked, idx, |d| d.set_remarks(&v));
                                            }
                                        />
                                    </td>
                                    <td class="table__cell table__cell--actions">
                                        <button
                                            class="button button--icon"
                                            title="Remove row"
                                            disabled=move || locked.get()
                                            on:click=move |_| {
                                                if !locked.get_untracked() {
                                                    review.update(|r| {
                                                        r.remove(idx);
                                                    });
                                                }
                                            }
                                        >
                                            {icon("delete")}
                                        </button>
                                    </td>
                                </tr>
                                {move || row_error(review, show_errors, idx).map(|e| view! {
                                    <tr class="table__row table__row--error">
                                        <td class="table__cell field-error" colspan="6">{e}</td>
                                    </tr>
                                })}
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

#[component]
pub fn MaterialReviewTable(
    review: RwSignal<PlanReview<MaterialDraft>>,
    show_errors: RwSignal<bool>,
    locked: Signal<bool>,
) -> impl IntoView {
    let min = iso_date(today());

    view! {
        <div class="review-list">
            <For
                each=move || review.with(row_keys)
                key=|k| k.clone()
                children=move |(idx, label)| {
                    let min = min.clone();
                    let vendor = review.with_untracked(|r| {
                        r.rows().get(idx).map(|d| d.vendor_name.clone()).unwrap_or_default()
                    });
                    // a PO may list one item on several lines
                    let lines = move || {
                        review.with(|r| {
                            r.rows()
                                .get(idx)
                                .map(|d| d.items.iter().cloned().enumerate().collect::<Vec<_>>())
                                .unwrap_or_default()
                        })
                    };
                    let available = move |item_id: &str| {
                        review.with_untracked(|r| {
                            r.rows().get(idx).and_then(|d| d.available.get(item_id).copied())
                        })
                    };
                    view! {
                        <section class="review-card">
                            <div class="review-card__header">
                                <strong>{label}</strong>
                                <span class="table__cell--muted">{vendor}</span>
                                <DateInput
                                    value=Signal::derive(move || {
                                        review.with(|r| {
                                            r.rows()
                                                .get(idx)
                                                .map(|d| d.delivery_date.clone())
                                                .unwrap_or_default()
                                        })
                                    })
                                    on_change=Callback::new(move |v: String| {
                                        edit_row(review, locked, idx, |d| d.set_date(&v));
                                    })
                                    min=min
                                    disabled=locked
                                />
                                <button
                                    class="button button--icon"
                                    title="Remove PO"
                                    disabled=move || locked.get()
                                    on:click=move |_| {
                                        if !locked.get_untracked() {
                                            review.update(|r| {
                                                r.remove(idx);
                                            });
                                        }
                                    }
                                >
                                    {icon("delete")}
                                </button>
                            </div>
                            <table class="table__data table--compact">
                                <thead>
                                    <tr>
                                        <th class="table__header-cell">"Item"</th>
                                        <th class="table__header-cell table__header-cell--right">
                                            "Open"
                                        </th>
                                        <th class="table__header-cell">"Quantity"</th>
                                        <th class="table__header-cell"></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=lines
                                        key=|(line, i): &(usize, MaterialPlanItem)| {
                                            (*line, i.item_id.clone())
                                        }
                                        children=move |(line, item)| {
                                            let open = available(&item.item_id)
                                                .map(format_quantity)
                                                .unwrap_or_else(|| "-".to_string());
                                            let set_quantity = move |qty: f64| {
                                                edit_row(review, locked, idx, |d| d.set_quantity(line, qty));
                                            };
                                            let remove_line = move || {
                                                edit_row(review, locked, idx, |d| d.remove_item(line));
                                            };
                                            view! {
                                                <tr class="table__row">
                                                    <td class="table__cell">
                                                        {item.item_name.clone()}
                                                    </td>
                                                    <td class="table__cell table__cell--right">
                                                        {format!("{} {}", open, item.unit)}
                                                    </td>
                                                    <td class="table__cell">
                                                        <input
                                                            type="number"
                                                            min="0"
                                                            step="any"
                                                            class="form-input form-input--narrow"
                                                            disabled=move || locked.get()
                                                            value=format_quantity(item.quantity)
                                                            on:input=move |ev| {
                                                                let qty = event_target_value(&ev)
                                                                    .trim()
                                                                    .parse::<f64>()
                                                                    .unwrap_or(0.0);
                                                                set_quantity(qty);
                                                            }
                                                        />
                                                    </td>
                                                    <td class="table__cell table__cell--actions">
                                                        <button
                                                            class="button button--icon"
                                                            title="Remove item"
                                                            disabled=move || locked.get()
                                                            on:click=move |_| {
                                                                remove_line();
                                                            }
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
                            {move || row_error(review, show_errors, idx).map(|e| view! {
                                <div class="field-error">{e}</div>
                            })}
                        </section>
                    }
                }
            />
        </div>
    }
}
