use super::aggregate::MaterialDeliveryPlan;
use crate::shared::dates::in_range;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialPlanFilter {
    pub search: String,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl MaterialPlanFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.category.is_none()
            && self.from.is_none()
            && self.to.is_none()
    }

    pub fn matches(&self, plan: &MaterialDeliveryPlan) -> bool {
        if let Some(cat) = &self.category {
            if plan.critical_po_category.as_deref() != Some(cat.as_str()) {
                return false;
            }
        }

        if self.from.is_some() || self.to.is_some() {
            match plan.date() {
                Some(d) if in_range(d, self.from, self.to) => {}
                _ => return false,
            }
        }

        let q = self.search.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        let hay = [
            plan.meta.name.as_str(),
            plan.po_link.as_deref().unwrap_or(""),
            plan.package_name.as_deref().unwrap_or(""),
            plan.critical_po_task.as_deref().unwrap_or(""),
        ];
        hay.iter().any(|h| h.to_lowercase().contains(&q))
            || plan
                .items()
                .iter()
                .any(|i| i.item_name.to_lowercase().contains(&q))
    }

    pub fn apply(&self, plans: &[MaterialDeliveryPlan]) -> Vec<MaterialDeliveryPlan> {
        plans.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialGroup {
    pub key: String,
    pub label: String,
    pub plans: Vec<MaterialDeliveryPlan>,
}

impl MaterialGroup {
    pub fn item_count(&self) -> usize {
        self.plans.iter().map(|p| p.items().len()).sum()
    }
}

/// One group per critical PO category ordered by name, plans inside by
/// delivery date. Plans without a category come last.
pub fn group_by_category(plans: &[MaterialDeliveryPlan]) -> Vec<MaterialGroup> {
    let mut by_cat: BTreeMap<String, Vec<MaterialDeliveryPlan>> = BTreeMap::new();
    let mut rest = Vec::new();
    for plan in plans {
        match &plan.critical_po_category {
            Some(cat) => by_cat.entry(cat.clone()).or_default().push(plan.clone()),
            None => rest.push(plan.clone()),
        }
    }

    let sort = |plans: &mut Vec<MaterialDeliveryPlan>| {
        plans.sort_by(|a, b| {
            a.delivery_date
                .cmp(&b.delivery_date)
                .then_with(|| a.meta.name.cmp(&b.meta.name))
        })
    };

    let mut groups: Vec<MaterialGroup> = by_cat
        .into_iter()
        .map(|(key, mut plans)| {
            sort(&mut plans);
            MaterialGroup {
                label: key.clone(),
                key,
                plans,
            }
        })
        .collect();
    if !rest.is_empty() {
        sort(&mut rest);
        groups.push(MaterialGroup {
            key: String::new(),
            label: "Uncategorised".to_string(),
            plans: rest,
        });
    }
    groups
}

/// Quantity already planned per item id across every plan linked to `po_id`
pub fn planned_quantities(plans: &[MaterialDeliveryPlan], po_id: &str) -> HashMap<String, f64> {
    let mut out: HashMap<String, f64> = HashMap::new();
    for plan in plans.iter().filter(|p| p.po_link.as_deref() == Some(po_id)) {
        for item in plan.items() {
            *out.entry(item.item_id).or_insert(0.0) += item.quantity;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plans() -> Vec<MaterialDeliveryPlan> {
        serde_json::from_value(json!([
            {"name": "MDP-1", "po_link": "PO/1/00001/25-26", "po_type": "Existing PO",
             "critical_po_category": "Civil", "delivery_date": "2026-11-20",
             "mp_items": {"list": [{"item_id": "I-1", "item_name": "Cement", "quantity": 40},
                                   {"item_id": "I-2", "item_name": "Sand", "quantity": 2}]}},
            {"name": "MDP-2", "po_link": "PO/1/00001/25-26", "po_type": "Existing PO",
             "critical_po_category": "Civil", "delivery_date": "2026-11-02",
             "mp_items": {"list": [{"item_id": "I-1", "item_name": "Cement", "quantity": 25}]}},
            {"name": "MDP-3", "po_type": "New Order", "delivery_date": "2026-12-10",
             "package_name": "Electrical Work",
             "mp_items": {"list": [{"item_id": "I-7", "item_name": "MCB 32A", "quantity": 12}]}}
        ]))
        .unwrap()
    }

    #[test]
    fn test_planned_quantities_sum_per_item() {
        let planned = planned_quantities(&plans(), "PO/1/00001/25-26");
        assert_eq!(planned.get("I-1"), Some(&65.0));
        assert_eq!(planned.get("I-2"), Some(&2.0));
        assert!(planned.get("I-7").is_none());
        assert!(planned_quantities(&plans(), "PO/9/00009/25-26").is_empty());
    }

    #[test]
    fn test_group_by_category() {
        let groups = group_by_category(&plans());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Civil");
        assert_eq!(groups[0].plans[0].meta.name, "MDP-2");
        assert_eq!(groups[0].item_count(), 3);
        assert_eq!(groups[1].label, "Uncategorised");
    }

    #[test]
    fn test_filter() {
        let all = plans();
        let f = MaterialPlanFilter {
            search: "mcb".into(),
            ..MaterialPlanFilter::default()
        };
        assert_eq!(f.apply(&all)[0].meta.name, "MDP-3");

        let f = MaterialPlanFilter {
            category: Some("Civil".into()),
            from: NaiveDate::from_ymd_opt(2026, 11, 10),
            ..MaterialPlanFilter::default()
        };
        let names: Vec<String> = f.apply(&all).into_iter().map(|p| p.meta.name).collect();
        assert_eq!(names, vec!["MDP-1".to_string()]);
        assert!(!f.is_empty());
    }
}
