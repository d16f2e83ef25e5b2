use crate::shared::frappe_client::fetch_list;
use contracts::domain::a003_procurement_order::aggregate::{ProcurementOrder, CLOSED_STATUSES};
use contracts::shared::frappe::{DocFilter, ListQuery};

/// Open POs of a project, items included
pub async fn fetch_project_pos(project: &str) -> Result<Vec<ProcurementOrder>, String> {
    fetch_list(
        &ListQuery::new()
            .filter(DocFilter::eq("project", project))
            .filter(DocFilter::not_in_list("status", CLOSED_STATUSES))
            .order_by("creation desc"),
    )
    .await
}
