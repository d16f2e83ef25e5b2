//! Selection state of the add-plan dialogs: category and task first, then
//! POs and their items.

use crate::domain::a003_procurement_order::aggregate::ProcurementOrder;
use crate::domain::a005_critical_po_task::aggregate::CriticalPoTask;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanStage {
    #[default]
    SelectTask,
    SelectPos,
    Review,
}

impl PlanStage {
    pub fn next(self) -> Option<PlanStage> {
        match self {
            PlanStage::SelectTask => Some(PlanStage::SelectPos),
            PlanStage::SelectPos => Some(PlanStage::Review),
            PlanStage::Review => None,
        }
    }

    pub fn prev(self) -> Option<PlanStage> {
        match self {
            PlanStage::SelectTask => None,
            PlanStage::SelectPos => Some(PlanStage::SelectTask),
            PlanStage::Review => Some(PlanStage::SelectPos),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PlanStage::SelectTask => "Critical PO task",
            PlanStage::SelectPos => "Select POs and items",
            PlanStage::Review => "Review plans",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanSelection {
    pub stage: PlanStage,
    pub category: Option<String>,
    pub task: Option<String>,
    pub search: String,
    /// PO id -> selected `order_list` lines
    selected: BTreeMap<String, BTreeSet<usize>>,
}

impl PlanSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Changing the category drops the task and every selected PO
    pub fn select_category(&mut self, category: Option<String>) {
        if self.category != category {
            self.category = category;
            self.task = None;
            self.selected.clear();
        }
    }

    pub fn select_task(&mut self, task: Option<String>) {
        if self.task != task {
            self.task = task;
            self.selected.clear();
        }
    }

    /// Selecting a PO selects all of its items; a second call deselects it
    pub fn toggle_po(&mut self, po: &ProcurementOrder) {
        if self.selected.remove(&po.meta.name).is_none() {
            let items = po.items().into_iter().map(|i| i.line).collect();
            self.selected.insert(po.meta.name.clone(), items);
        }
    }

    /// Flips one item. An item of an unselected PO selects that PO with only
    /// this item. A PO whose last item is removed stays selected.
    pub fn toggle_item(&mut self, po_id: &str, line: usize) {
        let items = self.selected.entry(po_id.to_string()).or_default();
        if !items.remove(&line) {
            items.insert(line);
        }
    }

    pub fn is_po_selected(&self, po_id: &str) -> bool {
        self.selected.contains_key(po_id)
    }

    pub fn is_item_selected(&self, po_id: &str, line: usize) -> bool {
        self.selected
            .get(po_id)
            .map(|items| items.contains(&line))
            .unwrap_or(false)
    }

    pub fn selected_items(&self, po_id: &str) -> Option<&BTreeSet<usize>> {
        self.selected.get(po_id)
    }

    /// Drops POs whose plans were created, so going back and building the
    /// review again does not offer them a second time
    pub fn forget_pos<'a>(&mut self, po_ids: impl IntoIterator<Item = &'a str>) {
        for po_id in po_ids {
            self.selected.remove(po_id);
        }
    }

    pub fn selected_po_ids(&self) -> impl Iterator<Item = &str> {
        self.selected.keys().map(String::as_str)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected POs without any selected item
    pub fn incomplete_pos(&self) -> Vec<&str> {
        self.selected
            .iter()
            .filter(|(_, items)| items.is_empty())
            .map(|(po, _)| po.as_str())
            .collect()
    }

    /// Whether the current stage is complete enough to move on
    pub fn can_advance(&self) -> bool {
        match self.stage {
            // A category without a task is half a choice
            PlanStage::SelectTask => self.category.is_none() || self.task.is_some(),
            PlanStage::SelectPos => {
                !self.selected.is_empty() && self.incomplete_pos().is_empty()
            }
            PlanStage::Review => false,
        }
    }

    pub fn advance(&mut self) -> bool {
        match self.stage.next() {
            Some(next) if self.can_advance() => {
                self.stage = next;
                true
            }
            _ => false,
        }
    }

    pub fn back(&mut self) {
        if let Some(prev) = self.stage.prev() {
            self.stage = prev;
        }
    }
}

/// POs offered for selection: the ones linked to `task` when it has any,
/// every plannable PO otherwise, narrowed by `search`.
pub fn candidate_pos<'a>(
    task: Option<&CriticalPoTask>,
    pos: &'a [ProcurementOrder],
    search: &str,
) -> Vec<&'a ProcurementOrder> {
    let linked = task.map(|t| t.associated_po_ids()).unwrap_or_default();
    pos.iter()
        .filter(|po| {
            if linked.is_empty() {
                po.is_plannable()
            } else {
                linked.contains(&po.meta.name)
            }
        })
        .filter(|po| po.matches_search(search))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pos() -> Vec<ProcurementOrder> {
        serde_json::from_value(json!([
            {"name": "PO/1/00001/25-26", "vendor_name": "Shree Traders", "status": "PO Approved",
             "order_list": {"list": [
                 {"name": "I-1", "item": "Cement", "quantity": 100, "quote": 400, "tax": 18},
                 {"name": "I-2", "item": "Sand", "quantity": 4, "quote": 3000, "tax": 5}
             ]}},
            {"name": "PO/1/00002/25-26", "vendor_name": "Om Electricals", "status": "Dispatched",
             "order_list": {"list": [{"name": "I-7", "item": "MCB 32A", "quantity": 12, "quote": 350, "tax": 18}]}},
            {"name": "PO/1/00003/25-26", "vendor_name": "Old Vendor", "status": "Cancelled",
             "order_list": {"list": []}}
        ]))
        .unwrap()
    }

    #[test]
    fn test_toggle_po_preselects_every_item() {
        let pos = pos();
        let mut sel = PlanSelection::new();
        sel.toggle_po(&pos[0]);
        assert!(sel.is_po_selected("PO/1/00001/25-26"));
        assert!(sel.is_item_selected("PO/1/00001/25-26", 0));
        assert!(sel.is_item_selected("PO/1/00001/25-26", 1));

        sel.toggle_po(&pos[0]);
        assert!(!sel.is_po_selected("PO/1/00001/25-26"));
        assert_eq!(sel.selected_count(), 0);
    }

    #[test]
    fn test_toggle_item_keeps_empty_po_selected() {
        let pos = pos();
        let mut sel = PlanSelection::new();
        sel.toggle_po(&pos[1]);
        sel.toggle_item("PO/1/00002/25-26", 0);
        assert!(!sel.is_item_selected("PO/1/00002/25-26", 0));
        assert!(sel.is_po_selected("PO/1/00002/25-26"));
        assert_eq!(sel.incomplete_pos(), vec!["PO/1/00002/25-26"]);

        sel.stage = PlanStage::SelectPos;
        assert!(!sel.can_advance());
        sel.toggle_item("PO/1/00002/25-26", 0);
        assert!(sel.advance());
        assert_eq!(sel.stage, PlanStage::Review);
    }

    #[test]
    fn test_item_of_unselected_po_selects_it() {
        let mut sel = PlanSelection::new();
        sel.toggle_item("PO/1/00001/25-26", 1);
        assert!(sel.is_po_selected("PO/1/00001/25-26"));
        assert!(!sel.is_item_selected("PO/1/00001/25-26", 0));
        assert_eq!(sel.selected_items("PO/1/00001/25-26").map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_forget_pos_keeps_the_rest() {
        let pos = pos();
        let mut sel = PlanSelection::new();
        sel.toggle_po(&pos[0]);
        sel.toggle_po(&pos[1]);

        sel.forget_pos(["PO/1/00001/25-26", "PO/1/00099/25-26"]);
        assert_eq!(sel.selected_po_ids().collect::<Vec<_>>(), vec!["PO/1/00002/25-26"]);
        assert!(sel.is_item_selected("PO/1/00002/25-26", 0));
    }

    #[test]
    fn test_category_and_task_changes_clear_downstream() {
        let pos = pos();
        let mut sel = PlanSelection::new();
        sel.select_category(Some("Civil".into()));
        sel.select_task(Some("CPT-0001".into()));
        sel.toggle_po(&pos[0]);

        sel.select_task(Some("CPT-0001".into()));
        assert_eq!(sel.selected_count(), 1);

        sel.select_task(Some("CPT-0002".into()));
        assert_eq!(sel.selected_count(), 0);

        sel.toggle_po(&pos[0]);
        sel.select_category(Some("Electrical".into()));
        assert_eq!(sel.task, None);
        assert_eq!(sel.selected_count(), 0);
        assert!(!sel.can_advance());
    }

    #[test]
    fn test_candidate_pos() {
        let pos = pos();
        let open: Vec<&str> = candidate_pos(None, &pos, "")
            .iter()
            .map(|p| p.meta.name.as_str())
            .collect();
        assert_eq!(open, vec!["PO/1/00001/25-26", "PO/1/00002/25-26"]);

        let task: CriticalPoTask = serde_json::from_value(json!({
            "name": "CPT-0002", "critical_po_category": "Electrical", "item_name": "Switchgear",
            "associated_pos": "{\"pos\": [\"PO/1/00002/25-26\"]}"
        }))
        .unwrap();
        let linked = candidate_pos(Some(&task), &pos, "");
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].vendor_name, "Om Electricals");

        assert_eq!(candidate_pos(None, &pos, "sand").len(), 1);
        assert!(candidate_pos(Some(&task), &pos, "cement").is_empty());
    }
}
