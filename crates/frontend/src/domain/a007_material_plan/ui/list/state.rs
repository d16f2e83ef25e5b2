use contracts::domain::a007_material_plan::aggregate::MaterialDeliveryPlan;
use contracts::domain::a007_material_plan::grouping::MaterialPlanFilter;
use contracts::shared::dates::parse_date;
use leptos::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct MaterialListState {
    pub plans: Vec<MaterialDeliveryPlan>,
    pub search: String,
    pub category: String,
    pub from: String,
    pub to: String,
    /// Collapsed category keys; groups start expanded
    pub collapsed: HashSet<String>,
    pub is_loaded: bool,
    generation: u64,
}

impl MaterialListState {
    pub fn filter(&self) -> MaterialPlanFilter {
        MaterialPlanFilter {
            search: self.search.clone(),
            category: (!self.category.is_empty()).then(|| self.category.clone()),
            from: parse_date(&self.from),
            to: parse_date(&self.to),
        }
    }

    pub fn active_filters(&self) -> usize {
        [&self.search, &self.category, &self.from, &self.to]
            .iter()
            .filter(|v| !v.trim().is_empty())
            .count()
    }

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

    /// Starts a load and returns its generation. Results of older loads
    /// are dropped.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Applies a finished load unless a newer one was started since.
    /// `None` keeps the current plans.
    pub fn finish_load(&mut self, generation: u64, plans: Option<Vec<MaterialDeliveryPlan>>) -> bool {
        if generation != self.generation {
            return false;
        }
        if let Some(plans) = plans {
            self.plans = plans;
        }
        self.is_loaded = true;
        true
    }

    pub fn toggle_group(&mut self, key: &str) {
        if !self.collapsed.remove(key) {
            self.collapsed.insert(key.to_string());
        }
    }
}

pub fn create_state() -> RwSignal<MaterialListState> {
    RwSignal::new(MaterialListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        let state = MaterialListState {
            plans: serde_json::from_value(json!([
                {"name": "MDP-1", "critical_po_category": "MEP"},
                {"name": "MDP-2", "critical_po_category": "Civil"},
                {"name": "MDP-3", "critical_po_category": "MEP"},
                {"name": "MDP-4"}
            ]))
            .unwrap(),
            ..Default::default()
        };
        assert_eq!(state.categories(), vec!["Civil".to_string(), "MEP".to_string()]);
    }

    #[test]
    fn test_toggle_group() {
        let mut state = MaterialListState::default();
        state.toggle_group("Civil");
        assert!(state.collapsed.contains("Civil"));
        state.toggle_group("Civil");
        assert!(state.collapsed.is_empty());
    }

    #[test]
    fn test_switching_project_drops_pending_load() {
        let mut state = MaterialListState::default();
        let old_project = state.begin_load();
        // the new project has no id yet, so the list is cleared at once
        let cleared = state.begin_load();
        assert!(state.finish_load(cleared, Some(Vec::new())));

        let late: Vec<MaterialDeliveryPlan> =
            serde_json::from_value(json!([{"name": "MDP-9"}])).unwrap();
        assert!(!state.finish_load(old_project, Some(late)));
        assert!(state.plans.is_empty());
        assert!(state.is_loaded);
    }
}
