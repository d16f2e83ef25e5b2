use crate::shared::frappe_client::{delete_doc, fetch_doc, fetch_list, update_doc};
use contracts::domain::a003_procurement_order::aggregate::ProcurementOrder;
use contracts::domain::a007_material_plan::aggregate::{MaterialDeliveryPlan, MaterialPlanUpdate};
use contracts::shared::frappe::{DocFilter, ListQuery};

pub async fn fetch_plans(project: &str) -> Result<Vec<MaterialDeliveryPlan>, String> {
    fetch_list(
        &ListQuery::new()
            .filter(DocFilter::eq("project", project))
            .order_by("delivery_date asc"),
    )
    .await
}

/// PO of a plan, loaded for its ordered quantities
pub async fn fetch_po(name: &str) -> Result<ProcurementOrder, String> {
    fetch_doc(name).await
}

pub async fn update_plan(
    name: &str,
    body: &MaterialPlanUpdate,
) -> Result<MaterialDeliveryPlan, String> {
    update_doc(name, body).await
}

pub async fn delete_plan(name: &str) -> Result<(), String> {
    delete_doc::<MaterialDeliveryPlan>(name).await
}
