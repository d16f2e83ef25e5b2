use crate::domain::common::lenient::{de_f64, de_opt_string};
use crate::domain::common::{decode_items_lenient, DocMeta, DocType, LIST_KEY};
use crate::shared::dates::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PO_TYPE_EXISTING: &str = "Existing PO";
pub const PO_TYPE_NEW: &str = "New Order";

/// Line of the `mp_items` blob
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialPlanItem {
    /// Row id inside the blob, empty for rows added on the client
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default, deserialize_with = "de_f64")]
    pub quantity: f64,
    #[serde(default)]
    pub category: String,
}

/// Planned delivery of materials (doctype "Material Delivery Plan")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialDeliveryPlan {
    #[serde(flatten)]
    pub meta: DocMeta,

    #[serde(default)]
    pub project: String,

    /// Purchase order this delivery belongs to, absent for new orders
    #[serde(default, deserialize_with = "de_opt_string")]
    pub po_link: Option<String>,

    /// "Existing PO" or "New Order"
    #[serde(default)]
    pub po_type: String,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub critical_po_category: Option<String>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub critical_po_task: Option<String>,

    /// YYYY-MM-DD
    #[serde(default)]
    pub delivery_date: String,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub package_name: Option<String>,

    /// JSON blob `{"list": [MaterialPlanItem...]}`
    #[serde(default)]
    pub mp_items: Option<Value>,
}

impl MaterialDeliveryPlan {
    pub fn items(&self) -> Vec<MaterialPlanItem> {
        decode_items_lenient(self.mp_items.as_ref(), LIST_KEY)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.delivery_date)
    }

    pub fn is_po_linked(&self) -> bool {
        self.po_link.is_some()
    }
}

impl DocType for MaterialDeliveryPlan {
    fn doctype() -> &'static str {
        "Material Delivery Plan"
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn element_name() -> &'static str {
        "Material Plan"
    }

    fn list_name() -> &'static str {
        "Material Plans"
    }

    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialPlanCreate {
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_link: Option<String>,
    pub po_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_po_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_po_task: Option<String>,
    pub delivery_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// String form of `{"list": [...]}`
    pub mp_items: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialPlanUpdate {
    pub delivery_date: String,
    pub mp_items: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_from_document() {
        let plan: MaterialDeliveryPlan = serde_json::from_value(json!({
            "name": "MDP-0009",
            "project": "PROJ-0001",
            "po_link": "PO/024/00012/25-26",
            "po_type": "Existing PO",
            "delivery_date": "2026-11-10",
            "mp_items": {"list": [
                {"item_id": "ITEM-1", "item_name": "Cement OPC 53", "unit": "Bag", "quantity": "40", "category": "Cement"}
            ]}
        }))
        .unwrap();

        assert!(plan.is_po_linked());
        assert_eq!(plan.items()[0].quantity, 40.0);
        assert_eq!(plan.date(), NaiveDate::from_ymd_opt(2026, 11, 10));
        assert_eq!(plan.critical_po_category, None);
    }
}
