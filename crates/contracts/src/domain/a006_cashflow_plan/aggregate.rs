use crate::domain::a003_procurement_order::aggregate::PoItem;
use crate::domain::a004_service_request::aggregate::ServiceItem;
use crate::domain::common::lenient::{de_f64, de_opt_f64, de_opt_string};
use crate::domain::common::{decode_items_lenient, DocMeta, DocType, LIST_KEY};
use crate::shared::dates::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a planned payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashflowType {
    #[serde(rename = "PO")]
    Po,
    #[serde(rename = "WO")]
    Wo,
    #[serde(rename = "Misc")]
    Misc,
    #[serde(rename = "Inflow")]
    Inflow,
}

impl CashflowType {
    pub const ALL: [CashflowType; 4] = [
        CashflowType::Po,
        CashflowType::Wo,
        CashflowType::Misc,
        CashflowType::Inflow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CashflowType::Po => "PO",
            CashflowType::Wo => "WO",
            CashflowType::Misc => "Misc",
            CashflowType::Inflow => "Inflow",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CashflowType::Po => "PO Cashflow",
            CashflowType::Wo => "WO Cashflow",
            CashflowType::Misc => "Misc Cashflow",
            CashflowType::Inflow => "Inflow",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<CashflowType> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// PO and WO plans must reference their order
    pub fn requires_link(self) -> bool {
        matches!(self, CashflowType::Po | CashflowType::Wo)
    }

    pub fn is_outflow(self) -> bool {
        !matches!(self, CashflowType::Inflow)
    }
}

/// Item copied into a plan from its PO/WO at planning time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashflowItem {
    /// Item master id (PO) or service line id (WO)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default, deserialize_with = "de_f64")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "de_f64")]
    pub rate: f64,
    #[serde(default, deserialize_with = "de_f64")]
    pub tax: f64,
}

impl CashflowItem {
    pub fn amount_with_tax(&self) -> f64 {
        self.quantity * self.rate * (1.0 + self.tax / 100.0)
    }
}

impl From<&PoItem> for CashflowItem {
    fn from(item: &PoItem) -> Self {
        Self {
            name: item.item_id.clone(),
            item_name: item.item_name.clone(),
            unit: item.unit.clone(),
            quantity: item.quantity,
            rate: item.quote,
            tax: item.tax,
        }
    }
}

impl CashflowItem {
    /// Service line of a work order; `tax` is the order-level GST percentage
    pub fn from_service(item: &ServiceItem, tax: f64) -> Self {
        Self {
            name: item.id.clone(),
            item_name: item.description.clone(),
            unit: item.uom.clone(),
            quantity: item.quantity,
            rate: item.rate,
            tax,
        }
    }
}

/// Planned payment (doctype "Cashflow Plan")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowPlan {
    #[serde(flatten)]
    pub meta: DocMeta,

    #[serde(default)]
    pub project: String,

    #[serde(rename = "type")]
    pub plan_type: CashflowType,

    /// PO or WO id
    #[serde(default, deserialize_with = "de_opt_string")]
    pub id_link: Option<String>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub vendor: Option<String>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub vendor_name: Option<String>,

    /// YYYY-MM-DD
    #[serde(default)]
    pub planned_date: String,

    #[serde(default, deserialize_with = "de_f64")]
    pub planned_amount: f64,

    /// Value of the linked items when the plan was made
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub estimated_price: Option<f64>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub remarks: Option<String>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub critical_po_category: Option<String>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub critical_po_task: Option<String>,

    /// JSON blob `{"list": [CashflowItem...]}`
    #[serde(default)]
    pub items: Option<Value>,
}

impl CashflowPlan {
    pub fn item_list(&self) -> Vec<CashflowItem> {
        decode_items_lenient(self.items.as_ref(), LIST_KEY)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.planned_date)
    }

    /// Vendor display name, falling back to the vendor id
    pub fn vendor_label(&self) -> &str {
        self.vendor_name
            .as_deref()
            .or(self.vendor.as_deref())
            .unwrap_or("")
    }
}

impl DocType for CashflowPlan {
    fn doctype() -> &'static str {
        "Cashflow Plan"
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn element_name() -> &'static str {
        "Cashflow Plan"
    }

    fn list_name() -> &'static str {
        "Cashflow Plans"
    }

    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

/// Body of a create call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashflowPlanCreate {
    pub project: String,
    #[serde(rename = "type")]
    pub plan_type: CashflowType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    pub planned_date: String,
    pub planned_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_po_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_po_task: Option<String>,
    /// String form of `{"list": [...]}`; omitted when there are no items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
}

/// Body of an update call; only fields editable after creation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashflowPlanUpdate {
    pub planned_date: String,
    pub planned_amount: f64,
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_from_document() {
        let plan: CashflowPlan = serde_json::from_value(json!({
            "name": "CFP-00021",
            "project": "PROJ-0001",
            "type": "PO",
            "id_link": "PO/024/00012/25-26",
            "vendor": "VEN-0001",
            "vendor_name": null,
            "planned_date": "2026-11-05",
            "planned_amount": 25000,
            "estimated_price": "47200.0",
            "remarks": "",
            "items": "{\"list\": [{\"name\": \"ITEM-1\", \"item_name\": \"Cement OPC 53\", \"unit\": \"Bag\", \"quantity\": 100, \"rate\": 400, \"tax\": 18}]}"
        }))
        .unwrap();

        assert_eq!(plan.plan_type, CashflowType::Po);
        assert_eq!(plan.remarks, None);
        assert_eq!(plan.estimated_price, Some(47_200.0));
        assert_eq!(plan.vendor_label(), "VEN-0001");
        assert_eq!(plan.date(), NaiveDate::from_ymd_opt(2026, 11, 5));
        let items = plan.item_list();
        assert_eq!(items.len(), 1);
        assert!((items[0].amount_with_tax() - 47_200.0).abs() < 1e-6);
    }

    #[test]
    fn test_type_wire_values() {
        assert_eq!(serde_json::to_value(CashflowType::Inflow).unwrap(), json!("Inflow"));
        assert_eq!(CashflowType::from_str_opt("WO"), Some(CashflowType::Wo));
        assert_eq!(CashflowType::from_str_opt("wo"), None);
        assert!(CashflowType::Wo.requires_link());
        assert!(!CashflowType::Misc.requires_link());
        assert!(!CashflowType::Inflow.is_outflow());
    }
}
