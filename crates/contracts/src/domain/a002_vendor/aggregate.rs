use crate::domain::common::lenient::de_opt_string;
use crate::domain::common::{DocMeta, DocType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vendor record (doctype "Vendors")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(flatten)]
    pub meta: DocMeta,

    #[serde(default)]
    pub vendor_name: String,

    /// "Material", "Service" or "Material & Service"
    #[serde(default, deserialize_with = "de_opt_string")]
    pub vendor_type: Option<String>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub vendor_city: Option<String>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub vendor_state: Option<String>,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub vendor_gst: Option<String>,
}

impl Vendor {
    /// "Name (City)" when the city is known
    pub fn display_label(&self) -> String {
        match &self.vendor_city {
            Some(city) => format!("{} ({})", self.vendor_name, city),
            None => self.vendor_name.clone(),
        }
    }
}

impl DocType for Vendor {
    fn doctype() -> &'static str {
        "Vendors"
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn element_name() -> &'static str {
        "Vendor"
    }

    fn list_name() -> &'static str {
        "Vendors"
    }

    fn meta(&self) -> &DocMeta {
        &self.meta
    }
}

/// Vendor id -> display name, used to label plans that only store the id
pub fn vendor_lookup(vendors: &[Vendor]) -> HashMap<String, String> {
    vendors
        .iter()
        .map(|v| (v.meta.name.clone(), v.vendor_name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_and_label() {
        let vendors: Vec<Vendor> = serde_json::from_value(json!([
            {"name": "VEN-0001", "vendor_name": "Shree Traders", "vendor_city": "Nashik"},
            {"name": "VEN-0002", "vendor_name": "Om Electricals", "vendor_city": ""}
        ]))
        .unwrap();

        let lookup = vendor_lookup(&vendors);
        assert_eq!(lookup.get("VEN-0002").map(String::as_str), Some("Om Electricals"));
        assert_eq!(vendors[0].display_label(), "Shree Traders (Nashik)");
        assert_eq!(vendors[1].display_label(), "Om Electricals");
    }
}
