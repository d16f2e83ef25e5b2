//! State of the Add/Edit cashflow dialogs

use super::aggregate::{
    CashflowItem, CashflowPlan, CashflowPlanCreate, CashflowPlanUpdate, CashflowType,
};
use crate::domain::a003_procurement_order::aggregate::ProcurementOrder;
use crate::domain::a004_service_request::aggregate::{ServiceRequest, GST_RATE};
use crate::domain::common::{encode_items, LIST_KEY};
use crate::shared::validation::{
    parse_amount, require_date_not_past, require_positive, require_text, FieldErrors,
};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct CashflowPlanForm {
    pub plan_type: CashflowType,
    pub id_link: String,
    pub vendor: String,
    pub planned_date: String,
    /// As typed by the user
    pub planned_amount: String,
    pub remarks: String,
    pub critical_po_category: String,
    pub critical_po_task: String,
    pub items: Vec<CashflowItem>,
    pub estimated_price: Option<f64>,
}

impl CashflowPlanForm {
    pub fn new(plan_type: CashflowType) -> Self {
        Self {
            plan_type,
            id_link: String::new(),
            vendor: String::new(),
            planned_date: String::new(),
            planned_amount: String::new(),
            remarks: String::new(),
            critical_po_category: String::new(),
            critical_po_task: String::new(),
            items: Vec::new(),
            estimated_price: None,
        }
    }

    /// Pre-fill an Edit dialog
    pub fn from_plan(plan: &CashflowPlan) -> Self {
        Self {
            plan_type: plan.plan_type,
            id_link: plan.id_link.clone().unwrap_or_default(),
            vendor: plan.vendor.clone().unwrap_or_default(),
            planned_date: plan.planned_date.clone(),
            planned_amount: format_amount_input(plan.planned_amount),
            remarks: plan.remarks.clone().unwrap_or_default(),
            critical_po_category: plan.critical_po_category.clone().unwrap_or_default(),
            critical_po_task: plan.critical_po_task.clone().unwrap_or_default(),
            items: plan.item_list(),
            estimated_price: plan.estimated_price,
        }
    }

    /// Takes vendor, items and estimate from the selected PO. An amount the
    /// user already typed is kept.
    pub fn link_po(&mut self, po: &ProcurementOrder) {
        let items: Vec<CashflowItem> = po.items().iter().map(CashflowItem::from).collect();
        self.set_link(&po.meta.name, &po.vendor, items);
    }

    pub fn link_wo(&mut self, wo: &ServiceRequest) {
        let tax = if wo.gst { GST_RATE * 100.0 } else { 0.0 };
        let items = wo
            .items()
            .iter()
            .map(|i| CashflowItem::from_service(i, tax))
            .collect();
        self.set_link(&wo.meta.name, &wo.vendor, items);
    }

    pub fn clear_link(&mut self) {
        self.id_link.clear();
        self.vendor.clear();
        self.items.clear();
        self.estimated_price = None;
    }

    fn set_link(&mut self, id: &str, vendor: &str, items: Vec<CashflowItem>) {
        let total: f64 = items.iter().map(CashflowItem::amount_with_tax).sum();
        let estimated = (total * 100.0).round() / 100.0;
        self.id_link = id.to_string();
        self.vendor = vendor.to_string();
        self.items = items;
        self.estimated_price = Some(estimated);
        if self.planned_amount.trim().is_empty() {
            self.planned_amount = format_amount_input(estimated);
        }
    }

    /// `original_date` is the stored date of an edited plan; keeping it
    /// unchanged is allowed even when it already passed.
    pub fn validate(
        &self,
        today: NaiveDate,
        original_date: Option<&str>,
    ) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_positive(&mut errors, "planned_amount", &self.planned_amount);
        require_date_not_past(
            &mut errors,
            "planned_date",
            &self.planned_date,
            today,
            original_date,
        );
        if self.plan_type.requires_link() {
            require_text(&mut errors, "id_link", &self.id_link);
        }
        if self.plan_type == CashflowType::Misc {
            require_text(&mut errors, "remarks", &self.remarks);
        }
        errors.into_result()
    }

    pub fn to_create(
        &self,
        project: &str,
        today: NaiveDate,
    ) -> Result<CashflowPlanCreate, FieldErrors> {
        self.validate(today, None)?;
        Ok(CashflowPlanCreate {
            project: project.to_string(),
            plan_type: self.plan_type,
            id_link: non_empty(&self.id_link),
            vendor: non_empty(&self.vendor),
            planned_date: self.planned_date.trim().to_string(),
            planned_amount: parse_amount(&self.planned_amount).unwrap_or(0.0),
            estimated_price: self.estimated_price,
            remarks: non_empty(&self.remarks),
            critical_po_category: non_empty(&self.critical_po_category),
            critical_po_task: non_empty(&self.critical_po_task),
            items: (!self.items.is_empty()).then(|| encode_items(&self.items, LIST_KEY)),
        })
    }

    pub fn to_update(
        &self,
        today: NaiveDate,
        original_date: &str,
    ) -> Result<CashflowPlanUpdate, FieldErrors> {
        self.validate(today, Some(original_date))?;
        Ok(CashflowPlanUpdate {
            planned_date: self.planned_date.trim().to_string(),
            planned_amount: parse_amount(&self.planned_amount).unwrap_or(0.0),
            remarks: non_empty(&self.remarks),
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// Amount as an input value: no trailing ".0" for whole numbers
pub fn format_amount_input(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::ValidationError;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    #[test]
    fn test_rejects_empty_zero_and_past() {
        let form = CashflowPlanForm::new(CashflowType::Inflow);
        let errors = form.validate(today(), None).unwrap_err();
        assert!(errors.has("planned_amount"));
        assert!(errors.has("planned_date"));

        let mut form = CashflowPlanForm::new(CashflowType::Inflow);
        form.planned_amount = "0".into();
        form.planned_date = "2026-10-13".into();
        let errors = form.validate(today(), None).unwrap_err();
        assert_eq!(
            errors.get("planned_amount"),
            Some(&ValidationError::NotPositive("planned_amount"))
        );
        assert_eq!(
            errors.get("planned_date"),
            Some(&ValidationError::InPast("planned_date"))
        );
    }

    #[test]
    fn test_type_specific_requirements() {
        let mut po = CashflowPlanForm::new(CashflowType::Po);
        po.planned_amount = "1000".into();
        po.planned_date = "2026-10-20".into();
        assert!(po.validate(today(), None).unwrap_err().has("id_link"));
        po.id_link = "PO/024/00012/25-26".into();
        assert!(po.validate(today(), None).is_ok());

        let mut misc = CashflowPlanForm::new(CashflowType::Misc);
        misc.planned_amount = "1000".into();
        misc.planned_date = "2026-10-20".into();
        assert!(misc.validate(today(), None).unwrap_err().has("remarks"));
        misc.remarks = "Site security deposit".into();
        assert!(misc.validate(today(), None).is_ok());
    }

    #[test]
    fn test_create_body() {
        let mut form = CashflowPlanForm::new(CashflowType::Wo);
        form.id_link = "SR-PROJ-0001-000004".into();
        form.vendor = "VEN-0007".into();
        form.planned_amount = "1,20,000".into();
        form.planned_date = "2026-12-01".into();

        let body = form.to_create("PROJ-0001", today()).unwrap();
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["type"], json!("WO"));
        assert_eq!(value["planned_amount"], json!(120000.0));
        assert!(value.get("items").is_none());
        assert!(value.get("remarks").is_none());
    }

    #[test]
    fn test_edit_keeps_past_date_when_untouched() {
        let plan: CashflowPlan = serde_json::from_value(json!({
            "name": "CFP-00003", "project": "PROJ-0001", "type": "Misc",
            "planned_date": "2026-09-01", "planned_amount": 5000.5, "remarks": "Labour advance"
        }))
        .unwrap();

        let mut form = CashflowPlanForm::from_plan(&plan);
        assert_eq!(form.planned_amount, "5000.50");
        form.planned_amount = "6000".into();
        let update = form.to_update(today(), &plan.planned_date).unwrap();
        assert_eq!(update.planned_amount, 6000.0);
        assert_eq!(update.remarks.as_deref(), Some("Labour advance"));

        form.planned_date = "2026-09-15".into();
        assert!(form.to_update(today(), &plan.planned_date).is_err());
    }

    #[test]
    fn test_link_po_fills_items_and_estimate() {
        let po: ProcurementOrder = serde_json::from_value(json!({
            "name": "PO/1/00004/25-26", "vendor": "VEN-0002", "vendor_name": "Om Electricals",
            "order_list": {"list": [
                {"name": "I-1", "item": "Cable", "unit": "m", "quantity": 100, "quote": 50, "tax": 18}
            ]}
        }))
        .unwrap();

        let mut form = CashflowPlanForm::new(CashflowType::Po);
        form.link_po(&po);
        assert_eq!(form.id_link, "PO/1/00004/25-26");
        assert_eq!(form.vendor, "VEN-0002");
        assert_eq!(form.items.len(), 1);
        assert_eq!(form.estimated_price, Some(5_900.0));
        assert_eq!(form.planned_amount, "5900");

        form.planned_amount = "3000".into();
        form.link_po(&po);
        assert_eq!(form.planned_amount, "3000");

        form.clear_link();
        assert!(form.id_link.is_empty());
        assert!(form.items.is_empty());
        assert_eq!(form.estimated_price, None);
    }

    #[test]
    fn test_link_wo_applies_gst() {
        let wo: ServiceRequest = serde_json::from_value(json!({
            "name": "SR-0009", "vendor": "VEN-0003", "status": "Approved", "gst": 1,
            "service_order_list": {"list": [
                {"id": "S-1", "description": "Plastering", "uom": "sqft", "quantity": 1000, "rate": 20}
            ]}
        }))
        .unwrap();

        let mut form = CashflowPlanForm::new(CashflowType::Wo);
        form.link_wo(&wo);
        assert_eq!(form.items[0].item_name, "Plastering");
        assert_eq!(form.items[0].tax, 18.0);
        assert_eq!(form.estimated_price, Some(23_600.0));
    }
}
