use crate::domain::common::lenient::{de_f64, de_opt_string};
use crate::domain::common::{decode_items_lenient, DocMeta, DocType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const WORK_PACKAGES_KEY: &str = "work_packages";

/// Work package chosen for a project together with its categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPackageSelection {
    pub work_package_name: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Project record (doctype "Projects")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(flatten)]
    pub meta: DocMeta,

    #[serde(default)]
    pub project_name: String,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub customer: Option<String>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub project_type: Option<String>,

    /// Contract value of the project
    #[serde(default, deserialize_with = "de_f64")]
    pub project_value: f64,

    #[serde(default)]
    pub address_line_1: String,
    #[serde(default)]
    pub address_line_2: String,
    #[serde(default)]
    pub project_city: String,
    #[serde(default)]
    pub project_state: String,
    #[serde(default)]
    pub pin: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,

    /// YYYY-MM-DD
    #[serde(default)]
    pub project_start_date: String,
    /// YYYY-MM-DD
    #[serde(default)]
    pub project_end_date: String,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub project_lead: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub project_manager: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub procurement_lead: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub accountant: Option<String>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub status: Option<String>,

    /// JSON blob `{"work_packages": [...]}`
    #[serde(default)]
    pub project_work_packages: Option<Value>,
}

impl Project {
    pub fn work_packages(&self) -> Vec<WorkPackageSelection> {
        decode_items_lenient(self.project_work_packages.as_ref(), WORK_PACKAGES_KEY)
    }

    /// "Name (City)" for pickers
    pub fn display_label(&self) -> String {
        if self.project_city.trim().is_empty() {
            self.project_name.clone()
        } else {
            format!("{} ({})", self.project_name, self.project_city)
        }
    }
}

impl DocType for Project {
    fn doctype() -> &'static str {
        "Projects"
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn element_name() -> &'static str {
        "Project"
    }

    fn list_name() -> &'static str {
        "Projects"
    }

    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

/// Body sent to create a project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCreate {
    pub project_name: String,
    pub customer: String,
    pub project_type: String,
    pub project_value: f64,
    pub address_line_1: String,
    pub address_line_2: String,
    pub project_city: String,
    pub project_state: String,
    pub pin: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    pub project_start_date: String,
    pub project_end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_lead: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procurement_lead: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accountant: Option<String>,
    /// String form of `{"work_packages": [...]}`
    pub project_work_packages: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    #[serde(flatten)]
    pub meta: DocMeta,
    #[serde(default)]
    pub company_name: String,
}

impl DocType for Customer {
    fn doctype() -> &'static str {
        "Customers"
    }
    fn aggregate_index() -> &'static str {
        "a001"
    }
    fn element_name() -> &'static str {
        "Customer"
    }
    fn list_name() -> &'static str {
        "Customers"
    }
    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectType {
    #[serde(flatten)]
    pub meta: DocMeta,
    #[serde(default)]
    pub project_type_name: String,
}

impl DocType for ProjectType {
    fn doctype() -> &'static str {
        "Project Types"
    }
    fn aggregate_index() -> &'static str {
        "a001"
    }
    fn element_name() -> &'static str {
        "Project Type"
    }
    fn list_name() -> &'static str {
        "Project Types"
    }
    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

/// Work package with the categories it offers (doctype "Procurement Packages")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkPackage {
    #[serde(flatten)]
    pub meta: DocMeta,
    #[serde(default)]
    pub work_package_name: String,
}

impl DocType for WorkPackage {
    fn doctype() -> &'static str {
        "Procurement Packages"
    }
    fn aggregate_index() -> &'static str {
        "a001"
    }
    fn element_name() -> &'static str {
        "Work Package"
    }
    fn list_name() -> &'static str {
        "Work Packages"
    }
    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

/// Category inside a work package (doctype "Category")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub meta: DocMeta,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub work_package: String,
}

impl DocType for Category {
    fn doctype() -> &'static str {
        "Category"
    }
    fn aggregate_index() -> &'static str {
        "a001"
    }
    fn element_name() -> &'static str {
        "Category"
    }
    fn list_name() -> &'static str {
        "Categories"
    }
    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_from_document() {
        let p: Project = serde_json::from_value(json!({
            "name": "PROJ-0003",
            "creation": "2026-01-05 10:00:00.000000",
            "project_name": "Tower B Interiors",
            "customer": "",
            "project_value": "2500000",
            "project_city": "Pune",
            "project_work_packages": "{\"work_packages\": [{\"work_package_name\": \"Electrical\", \"categories\": [\"Wires\"]}]}"
        }))
        .unwrap();

        assert_eq!(p.name(), "PROJ-0003");
        assert_eq!(p.customer, None);
        assert_eq!(p.project_value, 2_500_000.0);
        assert_eq!(p.display_label(), "Tower B Interiors (Pune)");
        let wp = p.work_packages();
        assert_eq!(wp.len(), 1);
        assert_eq!(wp[0].categories, vec!["Wires".to_string()]);
    }
}
