//! Maps a tab key to its view

use crate::domain::a001_project::ui::wizard::ProjectWizardPage;
use crate::domain::a006_cashflow_plan::ui::CashflowPage;
use crate::domain::a007_material_plan::ui::list::MaterialPlanList;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();

    match key {
        "a001_project_wizard" => view! {
            <ProjectWizardPage on_close=Callback::new(move |_| tabs_store.close_tab(&key_for_close)) />
        }
        .into_any(),
        "a006_cashflow_plan" => view! { <CashflowPage /> }.into_any(),
        "a007_material_plan" => view! { <MaterialPlanList /> }.into_any(),
        _ => {
            log::warn!("unknown tab key: {}", key);
            view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
        }
    }
}
