use crate::domain::common::lenient::{de_f64, de_opt_string};
use crate::domain::common::{decode_items_lenient, DocMeta, DocType, LIST_KEY};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Statuses a PO can no longer be planned against
pub const CLOSED_STATUSES: &[&str] = &["Merged", "Cancelled", "Inactive"];

/// Line of the `order_list` blob of a purchase order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoItem {
    /// Item master id
    #[serde(rename = "name", default)]
    pub item_id: String,

    #[serde(rename = "item", default)]
    pub item_name: String,

    #[serde(default)]
    pub unit: String,

    #[serde(default, deserialize_with = "de_f64")]
    pub quantity: f64,

    /// Quoted rate per unit, excluding tax
    #[serde(default, deserialize_with = "de_f64")]
    pub quote: f64,

    #[serde(default)]
    pub category: String,

    /// GST percent
    #[serde(default, deserialize_with = "de_f64")]
    pub tax: f64,

    #[serde(default, deserialize_with = "de_f64")]
    pub received: f64,

    /// Position in `order_list`. A PO may list the same item on several
    /// lines, so selections refer to lines by position.
    #[serde(skip)]
    pub line: usize,
}

impl PoItem {
    pub fn amount(&self) -> f64 {
        self.quantity * self.quote
    }

    pub fn amount_with_tax(&self) -> f64 {
        self.amount() * (1.0 + self.tax / 100.0)
    }

    /// Ordered minus delivered, never negative
    pub fn remaining_quantity(&self) -> f64 {
        (self.quantity - self.received).max(0.0)
    }
}

/// Purchase order (doctype "Procurement Orders")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcurementOrder {
    #[serde(flatten)]
    pub meta: DocMeta,

    #[serde(default)]
    pub project: String,

    /// Vendor id
    #[serde(default)]
    pub vendor: String,

    #[serde(default)]
    pub vendor_name: String,

    #[serde(default)]
    pub status: String,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub procurement_request: Option<String>,

    /// JSON blob `{"list": [PoItem...]}`
    #[serde(default)]
    pub order_list: Option<Value>,
}

impl ProcurementOrder {
    pub fn items(&self) -> Vec<PoItem> {
        let mut items: Vec<PoItem> = decode_items_lenient(self.order_list.as_ref(), LIST_KEY);
        for (line, item) in items.iter_mut().enumerate() {
            item.line = line;
        }
        items
    }

    /// Ordered quantity per item id, summed over lines of the same item
    pub fn ordered_quantities(&self) -> HashMap<String, f64> {
        let mut out = HashMap::new();
        for item in self.items() {
            *out.entry(item.item_id).or_insert(0.0) += item.quantity;
        }
        out
    }

    pub fn find_item(&self, item_id: &str) -> Option<PoItem> {
        self.items().into_iter().find(|i| i.item_id == item_id)
    }

    pub fn total_amount(&self) -> f64 {
        self.items().iter().map(PoItem::amount).sum()
    }

    pub fn total_with_tax(&self) -> f64 {
        self.items().iter().map(PoItem::amount_with_tax).sum()
    }

    pub fn is_plannable(&self) -> bool {
        !CLOSED_STATUSES.contains(&self.status.as_str())
    }

    /// Case-insensitive match over PO id, vendor and item names.
    /// An empty query matches every PO.
    pub fn matches_search(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.meta.name.to_lowercase().contains(&q)
            || self.vendor_name.to_lowercase().contains(&q)
            || self
                .items()
                .iter()
                .any(|i| i.item_name.to_lowercase().contains(&q))
    }

    /// Short id for tables: "PO/024/00012/25-26" -> "00012"
    pub fn short_id(&self) -> &str {
        self.meta
            .name
            .split('/')
            .nth(2)
            .unwrap_or(self.meta.name.as_str())
    }
}

impl DocType for ProcurementOrder {
    fn doctype() -> &'static str {
        "Procurement Orders"
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn element_name() -> &'static str {
        "Purchase Order"
    }

    fn list_name() -> &'static str {
        "Purchase Orders"
    }

    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_po() -> ProcurementOrder {
        serde_json::from_value(json!({
            "name": "PO/024/00012/25-26",
            "project": "PROJ-0001",
            "vendor": "VEN-0001",
            "vendor_name": "Shree Traders",
            "status": "PO Approved",
            "order_list": "{\"list\": [{\"name\": \"ITEM-1\", \"item\": \"Cement OPC 53\", \"unit\": \"Bag\", \"quantity\": 100, \"quote\": 400, \"tax\": 18, \"received\": 30}, {\"name\": \"ITEM-2\", \"item\": \"River Sand\", \"unit\": \"Brass\", \"quantity\": \"4\", \"quote\": 5000, \"tax\": 5}]}"
        }))
        .unwrap()
    }

    #[test]
    fn test_totals() {
        let po = sample_po();
        assert_eq!(po.items().len(), 2);
        assert_eq!(po.total_amount(), 40_000.0 + 20_000.0);
        assert!((po.total_with_tax() - (47_200.0 + 21_000.0)).abs() < 1e-6);
        assert_eq!(po.find_item("ITEM-1").unwrap().remaining_quantity(), 70.0);
    }

    #[test]
    fn test_search_and_status() {
        let mut po = sample_po();
        assert!(po.matches_search(""));
        assert!(po.matches_search("00012"));
        assert!(po.matches_search("shree"));
        assert!(po.matches_search("SAND"));
        assert!(!po.matches_search("steel"));
        assert_eq!(po.short_id(), "00012");

        assert!(po.is_plannable());
        po.status = "Merged".into();
        assert!(!po.is_plannable());
    }

    #[test]
    fn test_repeated_item_lines_stay_distinct() {
        let po: ProcurementOrder = serde_json::from_value(json!({
            "name": "PO/024/00013/25-26",
            "order_list": {"list": [
                {"name": "ITEM-1", "item": "Cement", "quantity": 100, "quote": 400},
                {"name": "ITEM-2", "item": "Sand", "quantity": 4, "quote": 5000},
                {"name": "ITEM-1", "item": "Cement", "quantity": 20, "quote": 410}
            ]}
        }))
        .unwrap();

        let lines: Vec<usize> = po.items().iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![0, 1, 2]);
        assert_eq!(po.total_amount(), 40_000.0 + 20_000.0 + 8_200.0);

        let ordered = po.ordered_quantities();
        assert_eq!(ordered.get("ITEM-1"), Some(&120.0));
        assert_eq!(ordered.get("ITEM-2"), Some(&4.0));
    }

    #[test]
    fn test_received_beyond_ordered_floors_at_zero() {
        let item = PoItem {
            quantity: 5.0,
            received: 7.0,
            ..PoItem::default()
        };
        assert_eq!(item.remaining_quantity(), 0.0);
    }
}
