//! Editable rows of the review stage, one per selected PO

use super::selection::PlanSelection;
use crate::domain::a003_procurement_order::aggregate::ProcurementOrder;
use crate::domain::a006_cashflow_plan::aggregate::{
    CashflowItem, CashflowPlanCreate, CashflowType,
};
use crate::domain::a006_cashflow_plan::form::{format_amount_input, CashflowPlanForm};
use crate::domain::a007_material_plan::aggregate::{
    MaterialDeliveryPlan, MaterialPlanCreate, MaterialPlanItem, PO_TYPE_EXISTING,
};
use crate::domain::a007_material_plan::form::check_items;
use crate::domain::a007_material_plan::grouping::planned_quantities;
use crate::domain::common::{encode_items, LIST_KEY};
use crate::shared::validation::{require_date_not_past, FieldErrors};
use chrono::NaiveDate;
use std::collections::HashMap;

/// A row of the review table that turns into one create call
pub trait ReviewRow {
    type Body;

    /// Shown in notifications and error lists
    fn label(&self) -> String;

    fn validate(&self, today: NaiveDate) -> Result<(), FieldErrors>;

    fn to_body(&self, project: &str, today: NaiveDate) -> Result<Self::Body, FieldErrors>;
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Cashflow
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CashflowDraft {
    pub po_id: String,
    pub vendor: String,
    pub vendor_name: String,
    pub items: Vec<CashflowItem>,
    /// Selected items including tax
    pub estimated: f64,
    pub planned_amount: String,
    pub planned_date: String,
    pub remarks: String,
    pub critical_po_category: Option<String>,
    pub critical_po_task: Option<String>,
    /// Material plan the row was converted from
    pub source_plan: Option<String>,
}

impl CashflowDraft {
    pub fn new(po: &ProcurementOrder, items: Vec<CashflowItem>) -> Self {
        let estimated = round2(items.iter().map(CashflowItem::amount_with_tax).sum());
        Self {
            po_id: po.meta.name.clone(),
            vendor: po.vendor.clone(),
            vendor_name: po.vendor_name.clone(),
            items,
            estimated,
            planned_amount: format_amount_input(estimated),
            planned_date: String::new(),
            remarks: String::new(),
            critical_po_category: None,
            critical_po_task: None,
            source_plan: None,
        }
    }

    pub fn set_amount(&mut self, raw: &str) {
        self.planned_amount = raw.to_string();
    }

    pub fn set_date(&mut self, raw: &str) {
        self.planned_date = raw.to_string();
    }

    pub fn set_remarks(&mut self, raw: &str) {
        self.remarks = raw.to_string();
    }

    fn to_form(&self) -> CashflowPlanForm {
        let mut form = CashflowPlanForm::new(CashflowType::Po);
        form.id_link = self.po_id.clone();
        form.vendor = self.vendor.clone();
        form.planned_date = self.planned_date.clone();
        form.planned_amount = self.planned_amount.clone();
        form.remarks = self.remarks.clone();
        form.critical_po_category = self.critical_po_category.clone().unwrap_or_default();
        form.critical_po_task = self.critical_po_task.clone().unwrap_or_default();
        form.items = self.items.clone();
        form.estimated_price = Some(self.estimated);
        form
    }
}

impl ReviewRow for CashflowDraft {
    type Body = CashflowPlanCreate;

    /// Several material plans may share one PO, so converted rows carry
    /// their plan as well
    fn label(&self) -> String {
        match &self.source_plan {
            Some(plan) => format!("{} ({})", self.po_id, plan),
            None => self.po_id.clone(),
        }
    }

    fn validate(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        self.to_form().validate(today, None)
    }

    fn to_body(&self, project: &str, today: NaiveDate) -> Result<CashflowPlanCreate, FieldErrors> {
        self.to_form().to_create(project, today)
    }
}

/// One draft per selected PO in id order. POs missing from `pos` are skipped.
pub fn build_cashflow_drafts(
    selection: &PlanSelection,
    pos: &[ProcurementOrder],
) -> Vec<CashflowDraft> {
    selection
        .selected_po_ids()
        .filter_map(|po_id| {
            let po = pos.iter().find(|p| p.meta.name == po_id)?;
            let items = po
                .items()
                .iter()
                .filter(|i| selection.is_item_selected(po_id, i.line))
                .map(CashflowItem::from)
                .collect();
            let mut draft = CashflowDraft::new(po, items);
            draft.critical_po_category = selection.category.clone();
            draft.critical_po_task = selection.task.clone();
            Some(draft)
        })
        .collect()
}

// ============================================================================
// Material delivery
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDraft {
    pub po_id: String,
    pub vendor_name: String,
    pub items: Vec<MaterialPlanItem>,
    /// Item id -> quantity still open on the PO, over all lines of the item
    pub available: HashMap<String, f64>,
    pub delivery_date: String,
    pub critical_po_category: Option<String>,
    pub critical_po_task: Option<String>,
}

impl MaterialDraft {
    pub fn set_quantity(&mut self, index: usize, quantity: f64) {
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
    }

    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn set_date(&mut self, raw: &str) {
        self.delivery_date = raw.to_string();
    }
}

impl ReviewRow for MaterialDraft {
    type Body = MaterialPlanCreate;

    fn label(&self) -> String {
        self.po_id.clone()
    }

    fn validate(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_date_not_past(&mut errors, "delivery_date", &self.delivery_date, today, None);
        check_items(&mut errors, &self.items, Some(&self.available));
        errors.into_result()
    }

    fn to_body(&self, project: &str, today: NaiveDate) -> Result<MaterialPlanCreate, FieldErrors> {
        self.validate(today)?;
        Ok(MaterialPlanCreate {
            project: project.to_string(),
            po_link: Some(self.po_id.clone()),
            po_type: PO_TYPE_EXISTING.to_string(),
            critical_po_category: self.critical_po_category.clone(),
            critical_po_task: self.critical_po_task.clone(),
            delivery_date: self.delivery_date.trim().to_string(),
            package_name: None,
            mp_items: encode_items(&self.items, LIST_KEY),
        })
    }
}

/// One draft per selected PO. The open quantity of an item is what is
/// neither delivered nor planned in `existing` yet, summed over its lines.
/// Selected lines take their default quantity from it in PO order.
pub fn build_material_drafts(
    selection: &PlanSelection,
    pos: &[ProcurementOrder],
    existing: &[MaterialDeliveryPlan],
) -> Vec<MaterialDraft> {
    selection
        .selected_po_ids()
        .filter_map(|po_id| {
            let po = pos.iter().find(|p| p.meta.name == po_id)?;
            let po_items = po.items();
            let planned = planned_quantities(existing, po_id);

            let mut open: HashMap<String, f64> = HashMap::new();
            for item in &po_items {
                *open.entry(item.item_id.clone()).or_insert(0.0) += item.remaining_quantity();
            }
            for (item_id, total) in open.iter_mut() {
                let already = planned.get(item_id).copied().unwrap_or(0.0);
                *total = (*total - already).max(0.0);
            }

            let mut left = open.clone();
            let mut available = HashMap::new();
            let items = po_items
                .into_iter()
                .filter(|i| selection.is_item_selected(po_id, i.line))
                .map(|i| {
                    let remaining = left.entry(i.item_id.clone()).or_insert(0.0);
                    let quantity = i.remaining_quantity().min(*remaining);
                    *remaining -= quantity;
                    let total = open.get(&i.item_id).copied().unwrap_or(0.0);
                    available.insert(i.item_id.clone(), total);
                    MaterialPlanItem {
                        name: String::new(),
                        item_id: i.item_id,
                        item_name: i.item_name,
                        unit: i.unit,
                        quantity,
                        category: i.category,
                    }
                })
                .collect();
            Some(MaterialDraft {
                po_id: po.meta.name.clone(),
                vendor_name: po.vendor_name.clone(),
                items,
                available,
                delivery_date: String::new(),
                critical_po_category: selection.category.clone(),
                critical_po_task: selection.task.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_plan_submission::{BulkSubmitReport, PlanReview};
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn pos() -> Vec<ProcurementOrder> {
        serde_json::from_value(json!([
            {"name": "PO/1/00001/25-26", "vendor": "VEN-0001", "vendor_name": "Shree Traders",
             "status": "PO Approved",
             "order_list": {"list": [
                 {"name": "I-1", "item": "Cement", "unit": "Bag", "quantity": 100, "quote": 400,
                  "tax": 18, "received": 30, "category": "Cement"},
                 {"name": "I-2", "item": "Sand", "unit": "Brass", "quantity": 4, "quote": 3000,
                  "tax": 5}
             ]}}
        ]))
        .unwrap()
    }

    #[test]
    fn test_cashflow_draft_estimate_from_selected_items() {
        let pos = pos();
        let mut sel = PlanSelection::new();
        sel.toggle_po(&pos[0]);
        sel.toggle_item("PO/1/00001/25-26", 1);

        let drafts = build_cashflow_drafts(&sel, &pos);
        assert_eq!(drafts.len(), 1);
        let d = &drafts[0];
        assert_eq!(d.items.len(), 1);
        assert_eq!(d.estimated, 47_200.0);
        assert_eq!(d.planned_amount, "47200");
        assert!(d.planned_date.is_empty());
        assert!(d.remarks.is_empty());
    }

    #[test]
    fn test_cashflow_draft_needs_date_before_submit() {
        let pos = pos();
        let mut sel = PlanSelection::new();
        sel.toggle_po(&pos[0]);
        let mut d = build_cashflow_drafts(&sel, &pos).remove(0);

        assert!(d.validate(today()).unwrap_err().has("planned_date"));
        d.set_date("2026-11-01");
        let body = d.to_body("PROJ-0001", today()).unwrap();
        assert_eq!(body.id_link.as_deref(), Some("PO/1/00001/25-26"));
        assert_eq!(body.vendor.as_deref(), Some("VEN-0001"));
        assert_eq!(body.estimated_price, Some(59_800.0));
        assert!(body.items.is_some());
    }

    #[test]
    fn test_material_draft_defaults_to_open_quantity() {
        let pos = pos();
        let existing: Vec<MaterialDeliveryPlan> = serde_json::from_value(json!([
            {"name": "MDP-1", "po_link": "PO/1/00001/25-26", "delivery_date": "2026-10-20",
             "mp_items": {"list": [{"item_id": "I-1", "quantity": 50},
                                   {"item_id": "I-2", "quantity": 6}]}}
        ]))
        .unwrap();

        let mut sel = PlanSelection::new();
        sel.toggle_po(&pos[0]);
        let mut d = build_material_drafts(&sel, &pos, &existing).remove(0);

        assert_eq!(d.items[0].quantity, 20.0);
        assert_eq!(d.items[1].quantity, 0.0);
        d.set_date("2026-11-01");
        assert!(d.validate(today()).unwrap_err().has("quantity"));

        d.remove_item(1);
        d.set_quantity(0, 25.0);
        assert!(d.validate(today()).unwrap_err().has("quantity"));
        d.set_quantity(0, 20.0);
        let body = d.to_body("PROJ-0001", today()).unwrap();
        assert_eq!(body.po_type, "Existing PO");
        assert!(body.mp_items.contains("\"I-1\""));
    }

    fn three_pos() -> Vec<ProcurementOrder> {
        serde_json::from_value(json!([
            {"name": "PO/1/00001/25-26", "vendor_name": "Shree Traders",
             "order_list": {"list": [
                 {"name": "I-1", "item": "Cement", "quantity": 10, "quote": 400}
             ]}},
            {"name": "PO/1/00002/25-26", "vendor_name": "Om Electricals",
             "order_list": {"list": [
                 {"name": "I-7", "item": "MCB 32A", "quantity": 12, "quote": 350}
             ]}},
            {"name": "PO/1/00003/25-26", "vendor_name": "Balaji Steel",
             "order_list": {"list": [
                 {"name": "I-9", "item": "TMT 12mm", "quantity": 2, "quote": 60000}
             ]}}
        ]))
        .unwrap()
    }

    #[test]
    fn test_rebuilt_review_skips_pos_already_created() {
        let pos = three_pos();
        let mut sel = PlanSelection::new();
        for po in &pos {
            sel.toggle_po(po);
        }
        let mut review = PlanReview::new(build_cashflow_drafts(&sel, &pos));
        assert_eq!(review.len(), 3);

        // first and third created, second rejected by the server
        let mut report = BulkSubmitReport::new();
        report.record_success("PO/1/00001/25-26");
        report.record_failure("PO/1/00002/25-26", "Insufficient Permission");
        report.record_success("PO/1/00003/25-26");

        let created = review.take_created(report.created());
        sel.forget_pos(created.iter().map(|d| d.po_id.as_str()));
        assert_eq!(review.len(), 1);

        // back to the PO step and on to the review again
        let rebuilt: Vec<String> = build_cashflow_drafts(&sel, &pos)
            .into_iter()
            .map(|d| d.po_id)
            .collect();
        assert_eq!(rebuilt, vec!["PO/1/00002/25-26"]);
    }

    #[test]
    fn test_material_lines_of_one_item_share_the_open_quantity() {
        let pos: Vec<ProcurementOrder> = serde_json::from_value(json!([
            {"name": "PO/1/00004/25-26", "vendor_name": "Shree Traders",
             "order_list": {"list": [
                 {"name": "I-1", "item": "Cement", "unit": "Bag", "quantity": 60, "quote": 400},
                 {"name": "I-1", "item": "Cement", "unit": "Bag", "quantity": 40, "quote": 410}
             ]}}
        ]))
        .unwrap();
        let existing: Vec<MaterialDeliveryPlan> = serde_json::from_value(json!([
            {"name": "MDP-1", "po_link": "PO/1/00004/25-26", "delivery_date": "2026-10-20",
             "mp_items": {"list": [{"item_id": "I-1", "quantity": 70}]}}
        ]))
        .unwrap();

        let mut sel = PlanSelection::new();
        sel.toggle_po(&pos[0]);
        let mut d = build_material_drafts(&sel, &pos, &existing).remove(0);

        assert_eq!(d.items.len(), 2);
        assert_eq!(d.available.get("I-1"), Some(&30.0));
        assert_eq!(d.items[0].quantity, 30.0);
        assert_eq!(d.items[1].quantity, 0.0);

        d.set_date("2026-11-01");
        d.set_quantity(0, 20.0);
        d.set_quantity(1, 15.0);
        assert!(d.validate(today()).unwrap_err().has("quantity"));
        d.set_quantity(1, 10.0);
        assert!(d.validate(today()).is_ok());

        d.remove_item(0);
        assert_eq!(d.items.len(), 1);
        assert_eq!(d.items[0].quantity, 10.0);
    }
}
