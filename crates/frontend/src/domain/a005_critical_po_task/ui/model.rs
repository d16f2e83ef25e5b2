use crate::shared::frappe_client::fetch_list;
use contracts::domain::a005_critical_po_task::aggregate::CriticalPoTask;
use contracts::shared::frappe::{DocFilter, ListQuery};

pub async fn fetch_project_tasks(project: &str) -> Result<Vec<CriticalPoTask>, String> {
    fetch_list(
        &ListQuery::new()
            .filter(DocFilter::eq("project", project))
            .order_by("critical_po_category asc"),
    )
    .await
}
