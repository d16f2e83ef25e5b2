use contracts::domain::a006_cashflow_plan::aggregate::CashflowPlan;
use contracts::domain::a006_cashflow_plan::grouping::CashflowFilter;
use contracts::shared::dates::parse_date;
use leptos::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Link,
    Category,
    /// Flat, by date
    None,
}

/// Raw filter inputs as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterInputs {
    pub search: String,
    pub from: String,
    pub to: String,
    pub category: String,
}

impl FilterInputs {
    pub fn to_filter(&self) -> CashflowFilter {
        CashflowFilter {
            search: self.search.clone(),
            from: parse_date(&self.from),
            to: parse_date(&self.to),
            category: (!self.category.is_empty()).then(|| self.category.clone()),
        }
    }

    pub fn active_count(&self) -> usize {
        [&self.search, &self.from, &self.to, &self.category]
            .iter()
            .filter(|v| !v.trim().is_empty())
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct CashflowListState {
    pub plans: Vec<CashflowPlan>,
    pub inputs: FilterInputs,
    pub grouping: Grouping,
    pub expanded: HashSet<String>,
    pub is_loaded: bool,
    generation: u64,
}

impl CashflowListState {
    fn new(grouping: Grouping) -> Self {
        Self {
            plans: Vec::new(),
            inputs: FilterInputs::default(),
            grouping,
            expanded: HashSet::new(),
            is_loaded: false,
            generation: 0,
        }
    }

    /// Starts a load and returns its generation. Results of older loads
    /// are dropped.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Applies a finished load unless a newer one was started since.
    /// `None` keeps the current plans.
    pub fn finish_load(&mut self, generation: u64, plans: Option<Vec<CashflowPlan>>) -> bool {
        if generation != self.generation {
            return false;
        }
        if let Some(plans) = plans {
            self.plans = plans;
        }
        self.is_loaded = true;
        true
    }

    pub fn toggle_expanded(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }

    /// Distinct critical PO categories of the loaded plans
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .plans
            .iter()
            .filter_map(|p| p.critical_po_category.clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

pub fn create_state(grouping: Grouping) -> RwSignal<CashflowListState> {
    RwSignal::new(CashflowListState::new(grouping))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_inputs_parse_to_filter() {
        let inputs = FilterInputs {
            search: "cement".into(),
            from: "2026-11-01".into(),
            to: "bad".into(),
            category: String::new(),
        };
        let filter = inputs.to_filter();
        assert_eq!(filter.from, parse_date("2026-11-01"));
        assert_eq!(filter.to, None);
        assert_eq!(filter.category, None);
        assert_eq!(inputs.active_count(), 3);
    }

    #[test]
    fn test_older_load_does_not_overwrite_newer() {
        let plan = |name: &str| -> CashflowPlan {
            serde_json::from_value(serde_json::json!({"name": name, "type": "PO"})).unwrap()
        };
        let mut state = CashflowListState::new(Grouping::Link);
        let first = state.begin_load();
        let second = state.begin_load();

        assert!(state.finish_load(second, Some(vec![plan("CFP-2")])));
        assert!(!state.finish_load(first, Some(vec![plan("CFP-1")])));
        assert_eq!(state.plans.len(), 1);
        assert_eq!(state.plans[0].meta.name, "CFP-2");

        // a failed stale load leaves things alone too
        let third = state.begin_load();
        assert!(!state.finish_load(second, None));
        assert!(state.finish_load(third, None));
        assert_eq!(state.plans[0].meta.name, "CFP-2");
    }
}
