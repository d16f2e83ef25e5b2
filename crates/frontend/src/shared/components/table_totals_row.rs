use crate::shared::components::table::number_format::format_inr;
use leptos::prelude::*;

/// `Total` row: label across `span` columns, the amount, then `trailing`
/// empty cells
#[component]
pub fn TableTotalsRow(
    #[prop(into)] amount: Signal<f64>,
    span: u32,
    #[prop(optional)] trailing: u32,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let label = label.unwrap_or_else(|| "Total".to_string());
    view! {
        <tr class="table__totals-row">
            <td class="table__cell" colspan=span.to_string()>{label}</td>
            <td class="table__cell table__cell--right">{move || format_inr(amount.get())}</td>
            {(0..trailing).map(|_| view! { <td class="table__cell"></td> }).collect_view()}
        </tr>
    }
}
