//! Edit dialog of a material delivery plan.
//!
//! Items are decoded from `mp_items` on open, edited as a list and encoded
//! back into the blob on save.

use super::aggregate::{MaterialDeliveryPlan, MaterialPlanItem, MaterialPlanUpdate};
use crate::domain::common::{encode_items, LIST_KEY};
use crate::shared::validation::{require_date_not_past, FieldErrors, ValidationError};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Ordered quantities of the linked PO as known to the Edit dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QuantityCaps {
    /// Plan has no PO, quantities are not bounded
    #[default]
    Unlinked,
    Loading,
    Loaded(HashMap<String, f64>),
    Failed,
}

impl QuantityCaps {
    /// Whether a save can be validated
    pub fn is_ready(&self) -> bool {
        matches!(self, QuantityCaps::Unlinked | QuantityCaps::Loaded(_))
    }

    pub fn get(&self, item_id: &str) -> Option<f64> {
        match self {
            QuantityCaps::Loaded(caps) => caps.get(item_id).copied(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialPlanEdit {
    pub name: String,
    pub po_link: Option<String>,
    pub delivery_date: String,
    pub items: Vec<MaterialPlanItem>,
    original_date: String,
}

impl MaterialPlanEdit {
    pub fn from_plan(plan: &MaterialDeliveryPlan) -> Self {
        Self {
            name: plan.meta.name.clone(),
            po_link: plan.po_link.clone(),
            delivery_date: plan.delivery_date.clone(),
            items: plan.items(),
            original_date: plan.delivery_date.clone(),
        }
    }

    pub fn set_delivery_date(&mut self, date: &str) {
        self.delivery_date = date.to_string();
    }

    /// Returns false when there is no item at `index`
    pub fn set_quantity(&mut self, index: usize, quantity: f64) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// A PO-linked plan validates only against loaded caps. Items missing
    /// from the loaded map are not capped.
    pub fn validate(&self, today: NaiveDate, caps: &QuantityCaps) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_date_not_past(
            &mut errors,
            "delivery_date",
            &self.delivery_date,
            today,
            Some(&self.original_date),
        );

        match (self.po_link.as_ref(), caps) {
            (None, _) => check_items(&mut errors, &self.items, None),
            (Some(_), QuantityCaps::Loaded(max)) => {
                check_items(&mut errors, &self.items, Some(max))
            }
            (Some(_), _) => errors.push("quantity", ValidationError::Unverified("quantity")),
        }
        errors.into_result()
    }

    pub fn to_update(
        &self,
        today: NaiveDate,
        caps: &QuantityCaps,
    ) -> Result<MaterialPlanUpdate, FieldErrors> {
        self.validate(today, caps)?;
        Ok(MaterialPlanUpdate {
            delivery_date: self.delivery_date.trim().to_string(),
            mp_items: encode_items(&self.items, LIST_KEY),
        })
    }
}

/// Item list must be non-empty with positive quantities.
/// `caps` bounds the total quantity per item id, summed over every line of
/// that item.
pub fn check_items(
    errors: &mut FieldErrors,
    items: &[MaterialPlanItem],
    caps: Option<&HashMap<String, f64>>,
) {
    if items.is_empty() {
        errors.push("mp_items", ValidationError::Empty("mp_items"));
        return;
    }
    if items.iter().any(|i| !(i.quantity > 0.0)) {
        errors.push("quantity", ValidationError::NotPositive("quantity"));
        return;
    }
    let Some(caps) = caps else {
        return;
    };

    let mut totals: Vec<(&MaterialPlanItem, f64)> = Vec::new();
    for item in items {
        match totals.iter_mut().find(|(first, _)| first.item_id == item.item_id) {
            Some((_, total)) => *total += item.quantity,
            None => totals.push((item, item.quantity)),
        }
    }
    for (item, total) in totals {
        let Some(max) = caps.get(&item.item_id) else {
            continue;
        };
        if total > *max {
            errors.push(
                "quantity",
                ValidationError::OutOfRange {
                    field: "quantity",
                    detail: format!(
                        "{} exceeds {} {} available on the PO",
                        item.item_name, max, item.unit
                    ),
                },
            );
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::decode_items;
    use serde_json::{json, Value};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn plan() -> MaterialDeliveryPlan {
        serde_json::from_value(json!({
            "name": "MDP-0009",
            "project": "PROJ-0001",
            "po_link": "PO/024/00012/25-26",
            "po_type": "Existing PO",
            "delivery_date": "2026-10-01",
            "mp_items": "{\"list\": [{\"item_id\": \"ITEM-1\", \"item_name\": \"Cement\", \"unit\": \"Bag\", \"quantity\": 40}, {\"item_id\": \"ITEM-2\", \"item_name\": \"Sand\", \"unit\": \"Brass\", \"quantity\": 2}]}"
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_and_reassemble_blob() {
        let mut edit = MaterialPlanEdit::from_plan(&plan());
        assert!(edit.set_quantity(0, 55.0));
        assert!(!edit.set_quantity(9, 1.0));
        edit.remove_item(1);

        let update = edit.to_update(today(), &QuantityCaps::Loaded(HashMap::new())).unwrap();
        let items: Vec<MaterialPlanItem> =
            decode_items(Some(&Value::String(update.mp_items)), LIST_KEY).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 55.0);
        assert_eq!(update.delivery_date, "2026-10-01");
    }

    #[test]
    fn test_rejects_zero_quantity_and_empty_list() {
        let mut edit = MaterialPlanEdit::from_plan(&plan());
        edit.set_quantity(1, 0.0);
        let errors = edit
            .validate(today(), &QuantityCaps::Loaded(HashMap::new()))
            .unwrap_err();
        assert_eq!(errors.get("quantity"), Some(&ValidationError::NotPositive("quantity")));

        edit.remove_item(0);
        edit.remove_item(0);
        let errors = edit
            .validate(today(), &QuantityCaps::Loaded(HashMap::new()))
            .unwrap_err();
        assert!(errors.has("mp_items"));
    }

    #[test]
    fn test_quantity_capped_by_po_and_date_rules() {
        let mut edit = MaterialPlanEdit::from_plan(&plan());
        let caps = QuantityCaps::Loaded(HashMap::from([("ITEM-1".to_string(), 30.0)]));
        assert!(edit.validate(today(), &caps).unwrap_err().has("quantity"));

        edit.set_quantity(0, 30.0);
        assert!(edit.validate(today(), &caps).is_ok());

        edit.set_delivery_date("2026-10-05");
        assert!(edit.validate(today(), &caps).unwrap_err().has("delivery_date"));
        edit.set_delivery_date("2026-10-20");
        assert!(edit.validate(today(), &caps).is_ok());
    }

    #[test]
    fn test_linked_plan_cannot_save_without_loaded_caps() {
        let mut edit = MaterialPlanEdit::from_plan(&plan());
        edit.set_quantity(0, 5_000.0);

        for caps in [QuantityCaps::Loading, QuantityCaps::Failed, QuantityCaps::Unlinked] {
            let errors = edit.to_update(today(), &caps).unwrap_err();
            assert_eq!(errors.get("quantity"), Some(&ValidationError::Unverified("quantity")));
        }
        assert!(!QuantityCaps::Loading.is_ready());
        assert!(!QuantityCaps::Failed.is_ready());

        let loaded = QuantityCaps::Loaded(HashMap::from([("ITEM-1".to_string(), 100.0)]));
        assert_eq!(loaded.get("ITEM-1"), Some(100.0));
        assert!(edit.validate(today(), &loaded).unwrap_err().has("quantity"));
    }

    #[test]
    fn test_plan_without_po_is_not_capped() {
        let mut edit = MaterialPlanEdit::from_plan(&plan());
        edit.po_link = None;
        edit.set_quantity(0, 5_000.0);
        assert!(edit.validate(today(), &QuantityCaps::Unlinked).is_ok());
    }

    #[test]
    fn test_repeated_item_lines_are_capped_together() {
        let mut items = plan().items();
        let mut repeat = items[0].clone();
        repeat.quantity = 15.0;
        items.push(repeat);
        assert_eq!(items.len(), 3);

        let caps = HashMap::from([("ITEM-1".to_string(), 50.0)]);
        let mut errors = FieldErrors::new();
        check_items(&mut errors, &items, Some(&caps));
        // 40 + 15 over a cap of 50
        assert!(errors.has("quantity"));

        items[2].quantity = 10.0;
        let mut errors = FieldErrors::new();
        check_items(&mut errors, &items, Some(&caps));
        assert!(errors.is_empty());
    }
}
