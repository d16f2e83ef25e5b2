use super::list::CashflowList;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a006_cashflow_plan::aggregate::{CashflowPlan, CashflowType};
use contracts::domain::common::DocType;
use leptos::prelude::*;
use thaw::*;

const TAB_ORDER: [CashflowType; 4] = [
    CashflowType::Po,
    CashflowType::Wo,
    CashflowType::Inflow,
    CashflowType::Misc,
];

#[component]
pub fn CashflowPage() -> impl IntoView {
    let selected = RwSignal::new(CashflowType::Po.as_str().to_string());
    // one list per type, rebuilt only when the tab changes
    let current = Memo::new(move |_| CashflowType::from_str_opt(&selected.get()));

    view! {
        <PageFrame page_id="a006_cashflow_plan--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h1 class="page__title">{CashflowPlan::list_name()}</h1>
            </div>
            <TabList selected_value=selected>
                {TAB_ORDER.into_iter().map(|t| view! {
                    <Tab value=t.as_str()>{t.label()}</Tab>
                }).collect_view()}
            </TabList>
            <div class="page__content">
                {move || match current.get() {
                    Some(plan_type) => view! { <CashflowList plan_type=plan_type /> }.into_any(),
                    None => view! { <div class="warning-box">"Unknown cashflow type"</div> }.into_any(),
                }}
            </div>
        </PageFrame>
    }
}
