//! Tab titles, one place for all of them

use contracts::domain::a006_cashflow_plan::aggregate::CashflowPlan;
use contracts::domain::a007_material_plan::aggregate::MaterialDeliveryPlan;
use contracts::domain::common::DocType;

/// Title for a tab key; empty for unknown keys
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_project_wizard" => "New project",
        "a006_cashflow_plan" => CashflowPlan::list_name(),
        "a007_material_plan" => MaterialDeliveryPlan::list_name(),
        _ => "",
    }
}
