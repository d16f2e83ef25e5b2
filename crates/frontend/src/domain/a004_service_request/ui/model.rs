use crate::shared::frappe_client::fetch_list;
use contracts::domain::a004_service_request::aggregate::ServiceRequest;
use contracts::shared::frappe::{DocFilter, ListQuery};

pub async fn fetch_approved_work_orders(project: &str) -> Result<Vec<ServiceRequest>, String> {
    fetch_list(
        &ListQuery::new()
            .filter(DocFilter::eq("project", project))
            .filter(DocFilter::eq("status", "Approved"))
            .order_by("creation desc"),
    )
    .await
}
