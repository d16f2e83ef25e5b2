use crate::domain::common::lenient::{de_bool, de_f64};
use crate::domain::common::{decode_items_lenient, DocMeta, DocType, LIST_KEY};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GST_RATE: f64 = 0.18;

/// Line of the `service_order_list` blob of a work order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub uom: String,
    #[serde(default, deserialize_with = "de_f64")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "de_f64")]
    pub rate: f64,
}

impl ServiceItem {
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }
}

/// Work order (doctype "Service Requests")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(flatten)]
    pub meta: DocMeta,

    #[serde(default)]
    pub project: String,

    #[serde(default)]
    pub vendor: String,

    #[serde(default)]
    pub status: String,

    #[serde(default, deserialize_with = "de_bool")]
    pub gst: bool,

    /// JSON blob `{"list": [ServiceItem...]}`
    #[serde(default)]
    pub service_order_list: Option<Value>,
}

impl ServiceRequest {
    pub fn items(&self) -> Vec<ServiceItem> {
        decode_items_lenient(self.service_order_list.as_ref(), LIST_KEY)
    }

    pub fn total_amount(&self) -> f64 {
        self.items().iter().map(ServiceItem::amount).sum()
    }

    pub fn total_with_gst(&self) -> f64 {
        let base = self.total_amount();
        if self.gst {
            base * (1.0 + GST_RATE)
        } else {
            base
        }
    }

    /// Only approved work orders can be planned
    pub fn is_plannable(&self) -> bool {
        self.status == "Approved"
    }

    pub fn matches_search(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty()
            || self.meta.name.to_lowercase().contains(&q)
            || self.vendor.to_lowercase().contains(&q)
            || self
                .items()
                .iter()
                .any(|i| i.description.to_lowercase().contains(&q))
    }
}

impl DocType for ServiceRequest {
    fn doctype() -> &'static str {
        "Service Requests"
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn element_name() -> &'static str {
        "Work Order"
    }

    fn list_name() -> &'static str {
        "Work Orders"
    }

    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_totals_with_and_without_gst() {
        let mut wo: ServiceRequest = serde_json::from_value(json!({
            "name": "SR-PROJ-0001-000004",
            "project": "PROJ-0001",
            "vendor": "VEN-0007",
            "status": "Approved",
            "gst": 1,
            "service_order_list": {"list": [
                {"id": "a1", "category": "Carpentry", "description": "False ceiling", "uom": "Sqft", "quantity": 1200, "rate": 85},
                {"id": "a2", "category": "Carpentry", "description": "Wardrobe shutters", "uom": "Nos", "quantity": 6, "rate": 9000}
            ]}
        }))
        .unwrap();

        assert_eq!(wo.total_amount(), 102_000.0 + 54_000.0);
        assert!((wo.total_with_gst() - 156_000.0 * 1.18).abs() < 1e-6);
        assert!(wo.matches_search("ceiling"));
        assert!(wo.is_plannable());

        wo.gst = false;
        assert_eq!(wo.total_with_gst(), 156_000.0);
    }
}
