use crate::shared::frappe_client::{create_doc, fetch_list};
use contracts::domain::a001_project::aggregate::{
    Category, Customer, Project, ProjectCreate, ProjectType, WorkPackage,
};
use contracts::shared::frappe::ListQuery;

pub async fn fetch_projects() -> Result<Vec<Project>, String> {
    fetch_list(
        &ListQuery::new()
            .fields(&["name", "project_name", "project_city", "status", "creation"])
            .order_by("creation desc"),
    )
    .await
}

pub async fn fetch_customers() -> Result<Vec<Customer>, String> {
    fetch_list(
        &ListQuery::new()
            .fields(&["name", "company_name"])
            .order_by("company_name asc"),
    )
    .await
}

pub async fn fetch_project_types() -> Result<Vec<ProjectType>, String> {
    fetch_list(&ListQuery::new().fields(&["name", "project_type_name"])).await
}

pub async fn fetch_work_packages() -> Result<Vec<WorkPackage>, String> {
    fetch_list(
        &ListQuery::new()
            .fields(&["name", "work_package_name"])
            .order_by("work_package_name asc"),
    )
    .await
}

pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    fetch_list(&ListQuery::new().fields(&["name", "category_name", "work_package"])).await
}

pub async fn create_project(body: &ProjectCreate) -> Result<Project, String> {
    create_doc(body).await
}
