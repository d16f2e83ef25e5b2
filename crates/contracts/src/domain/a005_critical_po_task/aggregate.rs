use crate::domain::common::lenient::de_opt_string;
use crate::domain::common::{decode_items_lenient, DocMeta, DocType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ASSOCIATED_POS_KEY: &str = "pos";

/// Procurement priority item of a project (doctype "Critical PO Tasks")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriticalPoTask {
    #[serde(flatten)]
    pub meta: DocMeta,

    #[serde(default)]
    pub project: String,

    #[serde(default)]
    pub critical_po_category: String,

    #[serde(default)]
    pub item_name: String,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub sub_category: Option<String>,

    /// Target PO release date, YYYY-MM-DD
    #[serde(default, deserialize_with = "de_opt_string")]
    pub po_release_date: Option<String>,

    /// "Not Released", "Partially Released", "Released", "Not Applicable"
    #[serde(default)]
    pub status: String,

    /// JSON blob `{"pos": ["PO/...", ...]}`
    #[serde(default)]
    pub associated_pos: Option<Value>,
}

impl CriticalPoTask {
    pub fn associated_po_ids(&self) -> Vec<String> {
        decode_items_lenient(self.associated_pos.as_ref(), ASSOCIATED_POS_KEY)
    }

    /// "Item (Sub category)" for pickers
    pub fn display_label(&self) -> String {
        match &self.sub_category {
            Some(sub) => format!("{} ({})", self.item_name, sub),
            None => self.item_name.clone(),
        }
    }
}

impl DocType for CriticalPoTask {
    fn doctype() -> &'static str {
        "Critical PO Tasks"
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn element_name() -> &'static str {
        "Critical PO Task"
    }

    fn list_name() -> &'static str {
        "Critical PO Tasks"
    }

    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

/// Distinct categories, sorted
pub fn categories(tasks: &[CriticalPoTask]) -> Vec<String> {
    let mut out: Vec<String> = tasks
        .iter()
        .map(|t| t.critical_po_category.clone())
        .filter(|c| !c.trim().is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

pub fn tasks_in_category<'a>(
    tasks: &'a [CriticalPoTask],
    category: &str,
) -> Vec<&'a CriticalPoTask> {
    tasks
        .iter()
        .filter(|t| t.critical_po_category == category)
        .collect()
}

pub fn find_task<'a>(tasks: &'a [CriticalPoTask], name: &str) -> Option<&'a CriticalPoTask> {
    tasks.iter().find(|t| t.meta.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tasks() -> Vec<CriticalPoTask> {
        serde_json::from_value(json!([
            {"name": "CPT-1", "critical_po_category": "Electrical", "item_name": "Main panel",
             "associated_pos": "{\"pos\": [\"PO/001/00001/25-26\", \"PO/001/00004/25-26\"]}"},
            {"name": "CPT-2", "critical_po_category": "Civil", "item_name": "Cement", "sub_category": "OPC"},
            {"name": "CPT-3", "critical_po_category": "Electrical", "item_name": "Cables", "associated_pos": null},
            {"name": "CPT-4", "critical_po_category": "", "item_name": "Misc"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        assert_eq!(categories(&tasks()), vec!["Civil".to_string(), "Electrical".to_string()]);
    }

    #[test]
    fn test_tasks_and_associated_pos() {
        let all = tasks();
        let electrical = tasks_in_category(&all, "Electrical");
        assert_eq!(electrical.len(), 2);
        assert_eq!(electrical[0].associated_po_ids().len(), 2);
        assert!(electrical[1].associated_po_ids().is_empty());

        let cement = find_task(&all, "CPT-2").unwrap();
        assert_eq!(cement.display_label(), "Cement (OPC)");
        assert!(find_task(&all, "CPT-9").is_none());
    }
}
