use crate::shared::frappe_client::{create_doc, delete_doc, fetch_list, update_doc};
use contracts::domain::a006_cashflow_plan::aggregate::{
    CashflowPlan, CashflowPlanCreate, CashflowPlanUpdate, CashflowType,
};
use contracts::shared::frappe::{DocFilter, ListQuery};

/// All plans of one type for a project, oldest date first
pub async fn fetch_plans(
    project: &str,
    plan_type: CashflowType,
) -> Result<Vec<CashflowPlan>, String> {
    fetch_list(
        &ListQuery::new()
            .filter(DocFilter::eq("project", project))
            .filter(DocFilter::eq("type", plan_type.as_str()))
            .order_by("planned_date asc"),
    )
    .await
}

pub async fn create_plan(body: &CashflowPlanCreate) -> Result<CashflowPlan, String> {
    create_doc(body).await
}

pub async fn update_plan(name: &str, body: &CashflowPlanUpdate) -> Result<CashflowPlan, String> {
    update_doc(name, body).await
}

pub async fn delete_plan(name: &str) -> Result<(), String> {
    delete_doc::<CashflowPlan>(name).await
}
