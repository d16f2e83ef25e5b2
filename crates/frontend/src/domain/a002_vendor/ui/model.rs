use crate::shared::frappe_client::fetch_list;
use contracts::domain::a002_vendor::aggregate::Vendor;
use contracts::shared::frappe::ListQuery;

pub async fn fetch_vendors() -> Result<Vec<Vendor>, String> {
    fetch_list(&ListQuery::new().fields(&["name", "vendor_name", "vendor_type", "vendor_city"]))
        .await
}
