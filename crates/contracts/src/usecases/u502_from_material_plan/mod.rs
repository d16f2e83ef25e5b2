//! Turns PO-linked material delivery plans into PO cashflow drafts.
//!
//! The drafts are reviewed and submitted through
//! [`crate::usecases::u501_plan_submission::PlanReview`].

use crate::domain::a003_procurement_order::aggregate::ProcurementOrder;
use crate::domain::a006_cashflow_plan::aggregate::CashflowItem;
use crate::domain::a007_material_plan::aggregate::MaterialDeliveryPlan;
use crate::usecases::common::UseCaseMetadata;
use crate::usecases::u501_plan_submission::CashflowDraft;
use std::collections::BTreeSet;

pub struct FromMaterialPlan;

impl UseCaseMetadata for FromMaterialPlan {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "from_material_plan"
    }

    fn display_name() -> &'static str {
        "Cashflow from material plans"
    }
}

/// Plans that can be converted, ordered by delivery date
pub fn linked_plans(plans: &[MaterialDeliveryPlan]) -> Vec<&MaterialDeliveryPlan> {
    let mut out: Vec<&MaterialDeliveryPlan> =
        plans.iter().filter(|p| p.is_po_linked()).collect();
    out.sort_by(|a, b| a.delivery_date.cmp(&b.delivery_date));
    out
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialPlanPicker {
    selected: BTreeSet<String>,
}

impl MaterialPlanPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, plan_name: &str) {
        if !self.selected.remove(plan_name) {
            self.selected.insert(plan_name.to_string());
        }
    }

    pub fn select_all(&mut self, plans: &[MaterialDeliveryPlan]) {
        self.selected = plans
            .iter()
            .filter(|p| p.is_po_linked())
            .map(|p| p.meta.name.clone())
            .collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drops plans that were already converted
    pub fn forget<'a>(&mut self, plan_names: impl IntoIterator<Item = &'a str>) {
        for name in plan_names {
            self.selected.remove(name);
        }
    }

    pub fn is_selected(&self, plan_name: &str) -> bool {
        self.selected.contains(plan_name)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    pub drafts: Vec<CashflowDraft>,
    /// Selected plans whose PO is not among the loaded POs
    pub skipped: Vec<String>,
}

/// One PO cashflow draft per selected plan. Rates and tax come from the PO
/// line with the same item id; items gone from the PO are priced at zero.
pub fn to_cashflow_drafts(
    plans: &[MaterialDeliveryPlan],
    picker: &MaterialPlanPicker,
    pos: &[ProcurementOrder],
) -> Conversion {
    let mut out = Conversion::default();
    for plan in linked_plans(plans) {
        if !picker.is_selected(&plan.meta.name) {
            continue;
        }
        let po = plan
            .po_link
            .as_deref()
            .and_then(|link| pos.iter().find(|p| p.meta.name == link));
        let Some(po) = po else {
            out.skipped.push(plan.meta.name.clone());
            continue;
        };

        let po_items = po.items();
        let items = plan
            .items()
            .into_iter()
            .map(|i| {
                let line = po_items.iter().find(|p| p.item_id == i.item_id);
                CashflowItem {
                    name: i.item_id,
                    item_name: i.item_name,
                    unit: i.unit,
                    quantity: i.quantity,
                    rate: line.map(|l| l.quote).unwrap_or(0.0),
                    tax: line.map(|l| l.tax).unwrap_or(0.0),
                }
            })
            .collect();

        let mut draft = CashflowDraft::new(po, items);
        draft.planned_date = plan.delivery_date.clone();
        draft.critical_po_category = plan.critical_po_category.clone();
        draft.critical_po_task = plan.critical_po_task.clone();
        draft.source_plan = Some(plan.meta.name.clone());
        out.drafts.push(draft);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_plan_submission::{BulkSubmitReport, PlanReview, ReviewRow};
    use chrono::NaiveDate;
    use serde_json::json;

    fn pos() -> Vec<ProcurementOrder> {
        serde_json::from_value(json!([
            {"name": "PO/1/00001/25-26", "vendor": "VEN-0001", "vendor_name": "Shree Traders",
             "order_list": {"list": [
                 {"name": "I-1", "item": "Cement", "quantity": 100, "quote": 400, "tax": 18},
                 {"name": "I-2", "item": "Sand", "quantity": 4, "quote": 3000, "tax": 5}
             ]}}
        ]))
        .unwrap()
    }

    fn plans() -> Vec<MaterialDeliveryPlan> {
        serde_json::from_value(json!([
            {"name": "MDP-1", "po_link": "PO/1/00001/25-26", "delivery_date": "2026-11-20",
             "critical_po_category": "Civil",
             "mp_items": {"list": [{"item_id": "I-1", "item_name": "Cement", "quantity": 10},
                                   {"item_id": "I-2", "item_name": "Sand", "quantity": 2}]}},
            {"name": "MDP-2", "po_link": "PO/1/00077/25-26", "delivery_date": "2026-11-05",
             "mp_items": {"list": [{"item_id": "I-9", "quantity": 1}]}},
            {"name": "MDP-3", "po_type": "New Order", "delivery_date": "2026-11-01"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_picker_select_all_only_takes_linked_plans() {
        let mut picker = MaterialPlanPicker::new();
        picker.select_all(&plans());
        assert_eq!(picker.len(), 2);
        assert!(!picker.is_selected("MDP-3"));

        picker.toggle("MDP-1");
        assert!(!picker.is_selected("MDP-1"));
        picker.clear();
        assert!(picker.is_empty());
    }

    #[test]
    fn test_conversion_prices_items_from_po() {
        let mut picker = MaterialPlanPicker::new();
        picker.select_all(&plans());

        let conv = to_cashflow_drafts(&plans(), &picker, &pos());
        assert_eq!(conv.skipped, vec!["MDP-2".to_string()]);
        assert_eq!(conv.drafts.len(), 1);

        let d = &conv.drafts[0];
        assert_eq!(d.po_id, "PO/1/00001/25-26");
        assert_eq!(d.planned_date, "2026-11-20");
        assert_eq!(d.critical_po_category.as_deref(), Some("Civil"));
        // 10 * 400 * 1.18 + 2 * 3000 * 1.05
        assert_eq!(d.estimated, 11_020.0);
    }

    #[test]
    fn test_drafts_go_through_review() {
        let mut picker = MaterialPlanPicker::new();
        picker.toggle("MDP-1");
        let conv = to_cashflow_drafts(&plans(), &picker, &pos());
        let review = PlanReview::new(conv.drafts);

        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        assert!(review.is_submittable(today));
        let bodies = review.payloads("PROJ-0001", today).unwrap();
        assert_eq!(bodies[0].0, review.rows()[0].label());
        assert_eq!(bodies[0].1.planned_amount, 11_020.0);
    }

    #[test]
    fn test_plans_sharing_a_po_keep_apart_after_partial_submit() {
        let mut all = plans();
        all.push(
            serde_json::from_value(json!({
                "name": "MDP-4", "po_link": "PO/1/00001/25-26", "delivery_date": "2026-12-01",
                "mp_items": {"list": [{"item_id": "I-2", "item_name": "Sand", "quantity": 1}]}
            }))
            .unwrap(),
        );
        let mut picker = MaterialPlanPicker::new();
        picker.toggle("MDP-1");
        picker.toggle("MDP-4");

        let mut review = PlanReview::new(to_cashflow_drafts(&all, &picker, &pos()).drafts);
        let labels: Vec<String> = review.rows().iter().map(|d| d.label()).collect();
        assert_eq!(
            labels,
            vec!["PO/1/00001/25-26 (MDP-1)", "PO/1/00001/25-26 (MDP-4)"]
        );

        let mut report = BulkSubmitReport::new();
        report.record_success("PO/1/00001/25-26 (MDP-1)");
        report.record_failure("PO/1/00001/25-26 (MDP-4)", "Planned Date is required");

        let created = review.take_created(report.created());
        picker.forget(created.iter().filter_map(|d| d.source_plan.as_deref()));
        assert_eq!(review.len(), 1);
        assert!(!picker.is_selected("MDP-1"));
        assert!(picker.is_selected("MDP-4"));

        let again = to_cashflow_drafts(&all, &picker, &pos());
        assert_eq!(again.drafts.len(), 1);
        assert_eq!(again.drafts[0].source_plan.as_deref(), Some("MDP-4"));
    }
}
