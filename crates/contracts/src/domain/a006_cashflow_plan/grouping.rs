//! Client-side filtering and grouping of fetched cashflow plans

use super::aggregate::CashflowPlan;
use crate::shared::dates::{in_range, month_key};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashflowFilter {
    pub search: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<String>,
}

impl CashflowFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.from.is_none()
            && self.to.is_none()
            && self.category.is_none()
    }

    pub fn matches(&self, plan: &CashflowPlan) -> bool {
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
            plan.id_link.as_deref().unwrap_or(""),
            plan.vendor_label(),
            plan.remarks.as_deref().unwrap_or(""),
            plan.critical_po_task.as_deref().unwrap_or(""),
        ];
        hay.iter().any(|h| h.to_lowercase().contains(&q))
            || plan
                .item_list()
                .iter()
                .any(|i| i.item_name.to_lowercase().contains(&q))
    }

    pub fn apply(&self, plans: &[CashflowPlan]) -> Vec<CashflowPlan> {
        plans.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Plans sharing one key (PO/WO id or category), rendered as one expandable row
#[derive(Debug, Clone, PartialEq)]
pub struct PlanGroup {
    pub key: String,
    pub label: String,
    pub plans: Vec<CashflowPlan>,
    pub total: f64,
}

impl PlanGroup {
    pub fn estimated(&self) -> Option<f64> {
        self.plans.iter().find_map(|p| p.estimated_price)
    }
}

fn sort_by_date(plans: &mut [CashflowPlan]) {
    plans.sort_by(|a, b| {
        a.planned_date
            .cmp(&b.planned_date)
            .then_with(|| a.meta.name.cmp(&b.meta.name))
    });
}

fn build_groups(
    map: BTreeMap<String, Vec<CashflowPlan>>,
    label: impl Fn(&str, &[CashflowPlan]) -> String,
) -> Vec<PlanGroup> {
    map.into_iter()
        .map(|(key, mut plans)| {
            sort_by_date(&mut plans);
            PlanGroup {
                label: label(&key, &plans),
                total: total_planned(&plans),
                key,
                plans,
            }
        })
        .collect()
}

/// One group per linked PO/WO, ordered by id. Plans without a link form a
/// trailing group with an empty key.
pub fn group_by_link(plans: &[CashflowPlan]) -> Vec<PlanGroup> {
    let mut linked: BTreeMap<String, Vec<CashflowPlan>> = BTreeMap::new();
    let mut unlinked = Vec::new();
    for plan in plans {
        match &plan.id_link {
            Some(link) => linked.entry(link.clone()).or_default().push(plan.clone()),
            None => unlinked.push(plan.clone()),
        }
    }

    let mut groups = build_groups(linked, |key, plans| {
        let vendor = plans.iter().map(|p| p.vendor_label()).find(|v| !v.is_empty());
        match vendor {
            Some(v) => format!("{} · {}", key, v),
            None => key.to_string(),
        }
    });
    if !unlinked.is_empty() {
        sort_by_date(&mut unlinked);
        groups.push(PlanGroup {
            key: String::new(),
            label: "Not linked".to_string(),
            total: total_planned(&unlinked),
            plans: unlinked,
        });
    }
    groups
}

/// One group per critical PO category, uncategorised last
pub fn group_by_category(plans: &[CashflowPlan]) -> Vec<PlanGroup> {
    let mut by_cat: BTreeMap<String, Vec<CashflowPlan>> = BTreeMap::new();
    let mut rest = Vec::new();
    for plan in plans {
        match &plan.critical_po_category {
            Some(cat) => by_cat.entry(cat.clone()).or_default().push(plan.clone()),
            None => rest.push(plan.clone()),
        }
    }

    let mut groups = build_groups(by_cat, |key, _| key.to_string());
    if !rest.is_empty() {
        sort_by_date(&mut rest);
        groups.push(PlanGroup {
            key: String::new(),
            label: "Uncategorised".to_string(),
            total: total_planned(&rest),
            plans: rest,
        });
    }
    groups
}

pub fn total_planned(plans: &[CashflowPlan]) -> f64 {
    plans.iter().map(|p| p.planned_amount).sum()
}

/// `(YYYY-MM, sum)` ascending; plans with an unreadable date are skipped
pub fn monthly_totals(plans: &[CashflowPlan]) -> Vec<(String, f64)> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for plan in plans {
        if let Some(d) = plan.date() {
            *months.entry(month_key(d)).or_insert(0.0) += plan.planned_amount;
        }
    }
    months.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plans() -> Vec<CashflowPlan> {
        serde_json::from_value(json!([
            {"name": "CFP-1", "type": "PO", "id_link": "PO/1/00002/25-26", "vendor_name": "Om Electricals",
             "planned_date": "2026-11-20", "planned_amount": 1000, "critical_po_category": "Electrical",
             "items": {"list": [{"name": "I-1", "item_name": "Copper wire 2.5mm"}]}},
            {"name": "CFP-2", "type": "PO", "id_link": "PO/1/00001/25-26", "vendor_name": "Shree Traders",
             "planned_date": "2026-12-02", "planned_amount": 2500, "critical_po_category": "Civil"},
            {"name": "CFP-3", "type": "PO", "id_link": "PO/1/00002/25-26",
             "planned_date": "2026-11-05", "planned_amount": 500, "critical_po_category": "Electrical"},
            {"name": "CFP-4", "type": "Misc", "planned_date": "2026-11-30", "planned_amount": 300,
             "remarks": "Scaffolding rent"}
        ]))
        .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_group_by_link_orders_groups_and_plans() {
        let groups = group_by_link(&plans());
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].key, "PO/1/00001/25-26");
        assert_eq!(groups[0].label, "PO/1/00001/25-26 · Shree Traders");

        let second = &groups[1];
        assert_eq!(second.plans.len(), 2);
        assert_eq!(second.plans[0].meta.name, "CFP-3");
        assert_eq!(second.total, 1500.0);
        assert_eq!(second.label, "PO/1/00002/25-26 · Om Electricals");

        assert_eq!(groups[2].key, "");
        assert_eq!(groups[2].label, "Not linked");
    }

    #[test]
    fn test_group_by_category_puts_uncategorised_last() {
        let groups = group_by_category(&plans());
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Civil", "Electrical", ""]);
        assert_eq!(groups[1].total, 1500.0);
    }

    #[test]
    fn test_filter_search_range_and_category() {
        let all = plans();

        let f = CashflowFilter {
            search: "copper".into(),
            ..CashflowFilter::default()
        };
        assert_eq!(f.apply(&all).len(), 1);

        let f = CashflowFilter {
            search: "scaffold".into(),
            ..CashflowFilter::default()
        };
        assert_eq!(f.apply(&all)[0].meta.name, "CFP-4");

        let f = CashflowFilter {
            from: Some(day(2026, 11, 6)),
            to: Some(day(2026, 11, 30)),
            ..CashflowFilter::default()
        };
        let names: Vec<String> = f.apply(&all).into_iter().map(|p| p.meta.name).collect();
        assert_eq!(names, vec!["CFP-1".to_string(), "CFP-4".to_string()]);

        let f = CashflowFilter {
            category: Some("Electrical".into()),
            ..CashflowFilter::default()
        };
        assert_eq!(f.apply(&all).len(), 2);
        assert!(CashflowFilter::default().is_empty());
        assert!(!f.is_empty());
    }

    #[test]
    fn test_totals() {
        let all = plans();
        assert_eq!(total_planned(&all), 4300.0);
        assert_eq!(
            monthly_totals(&all),
            vec![("2026-11".to_string(), 1800.0), ("2026-12".to_string(), 2500.0)]
        );
    }
}
