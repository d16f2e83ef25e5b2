//! Contract of the remote document API: resource paths, list queries,
//! response envelopes and error-body decoding.
//!
//! Every record lives under `/api/resource/<Doctype>`; lists accept JSON
//! encoded `fields` / `filters` query parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RESOURCE_PREFIX: &str = "/api/resource";

/// One list filter, serialised as the triple `["field", "op", value]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocFilter(pub String, pub String, pub Value);

impl DocFilter {
    pub fn new(field: &str, op: &str, value: impl Into<Value>) -> Self {
        Self(field.to_string(), op.to_string(), value.into())
    }

    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, "=", value)
    }

    pub fn ne(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, "!=", value)
    }

    pub fn like(field: &str, pattern: &str) -> Self {
        Self::new(field, "like", format!("%{}%", pattern))
    }

    pub fn in_list<S: AsRef<str>>(field: &str, values: &[S]) -> Self {
        let list: Vec<Value> = values
            .iter()
            .map(|v| Value::String(v.as_ref().to_string()))
            .collect();
        Self::new(field, "in", Value::Array(list))
    }

    pub fn not_in_list<S: AsRef<str>>(field: &str, values: &[S]) -> Self {
        let list: Vec<Value> = values
            .iter()
            .map(|v| Value::String(v.as_ref().to_string()))
            .collect();
        Self::new(field, "not in", Value::Array(list))
    }

    pub fn between(field: &str, from: &str, to: &str) -> Self {
        Self::new(
            field,
            "between",
            Value::Array(vec![Value::from(from), Value::from(to)]),
        )
    }

    pub fn gte(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, ">=", value)
    }

    pub fn lte(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, "<=", value)
    }

    pub fn field(&self) -> &str {
        &self.0
    }
}

/// Parameters of a list request
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub fields: Vec<String>,
    pub filters: Vec<DocFilter>,
    pub order_by: Option<String>,
    /// `0` asks for every row
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            fields: vec!["*".to_string()],
            filters: Vec::new(),
            order_by: None,
            limit: 0,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn filter(mut self, filter: DocFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, order: &str) -> Self {
        self.order_by = Some(order.to_string());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn to_query_string(&self) -> String {
        let fields = serde_json::to_string(&self.fields).unwrap_or_else(|_| "[\"*\"]".into());
        let mut parts = vec![format!("fields={}", urlencoding::encode(&fields))];
        if !self.filters.is_empty() {
            let filters = serde_json::to_string(&self.filters).unwrap_or_else(|_| "[]".into());
            parts.push(format!("filters={}", urlencoding::encode(&filters)));
        }
        if let Some(order) = &self.order_by {
            parts.push(format!("order_by={}", urlencoding::encode(order)));
        }
        parts.push(format!("limit_page_length={}", self.limit));
        parts.join("&")
    }
}

pub fn resource_path(doctype: &str) -> String {
    format!("{}/{}", RESOURCE_PREFIX, urlencoding::encode(doctype))
}

/// Path of a single record; names such as `PO/024/00012/25-26` contain `/`
pub fn doc_path(doctype: &str, name: &str) -> String {
    format!("{}/{}", resource_path(doctype), urlencoding::encode(name))
}

pub fn list_path(doctype: &str, query: &ListQuery) -> String {
    format!("{}?{}", resource_path(doctype), query.to_query_string())
}

/// `{"data": ...}` wrapper used by every resource response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Pull the first human-readable message out of an error response body
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(raw) = value.get("_server_messages").and_then(Value::as_str) {
        if let Some(msg) = first_server_message(raw) {
            return Some(msg);
        }
    }

    if let Some(exc) = value.get("exception").and_then(Value::as_str) {
        let text = exc.split_once(": ").map(|(_, rest)| rest).unwrap_or(exc);
        if !text.trim().is_empty() {
            return Some(strip_tags(text));
        }
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(strip_tags)
}

fn first_server_message(raw: &str) -> Option<String> {
    let messages: Vec<String> = serde_json::from_str(raw).ok()?;
    messages.iter().find_map(|m| {
        let inner: Value = serde_json::from_str(m).ok()?;
        inner
            .get("message")
            .and_then(Value::as_str)
            .map(strip_tags)
    })
}

/// Server messages may carry inline markup (`<b>`, `<br>`)
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_serialises_as_triple() {
        let f = DocFilter::eq("project", "PROJ-0001");
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            json!(["project", "=", "PROJ-0001"])
        );

        let f = DocFilter::in_list("status", &["PO Approved", "Dispatched"]);
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            json!(["status", "in", ["PO Approved", "Dispatched"]])
        );
    }

    #[test]
    fn test_comparison_filters() {
        let cases = [
            (DocFilter::ne("status", "Cancelled"), json!(["status", "!=", "Cancelled"])),
            (
                DocFilter::like("vendor_name", "traders"),
                json!(["vendor_name", "like", "%traders%"]),
            ),
            (
                DocFilter::between("creation", "2026-10-01", "2026-10-31"),
                json!(["creation", "between", ["2026-10-01", "2026-10-31"]]),
            ),
            (DocFilter::gte("planned_amount", 5000), json!(["planned_amount", ">=", 5000])),
            (
                DocFilter::lte("planned_date", "2026-12-31"),
                json!(["planned_date", "<=", "2026-12-31"]),
            ),
        ];
        for (filter, expected) in cases {
            assert_eq!(serde_json::to_value(&filter).unwrap(), expected);
        }
    }

    #[test]
    fn test_between_in_query_string() {
        let q =
            ListQuery::new().filter(DocFilter::between("creation", "2026-10-01", "2026-10-31"));
        let decoded = urlencoding::decode(&q.to_query_string()).unwrap().into_owned();
        assert!(decoded.contains(r#"[["creation","between",["2026-10-01","2026-10-31"]]]"#));
    }

    #[test]
    fn test_list_query_string() {
        let q = ListQuery::new()
            .filter(DocFilter::eq("project", "P 1"))
            .order_by("creation desc");
        let s = q.to_query_string();
        assert!(s.starts_with("fields=%5B%22%2A%22%5D"));
        assert!(s.contains("filters=%5B%5B%22project%22%2C%22%3D%22%2C%22P%201%22%5D%5D"));
        assert!(s.contains("order_by=creation%20desc"));
        assert!(s.ends_with("limit_page_length=0"));
    }

    #[test]
    fn test_list_query_without_filters_omits_param() {
        let s = ListQuery::new().fields(&["name"]).limit(20).to_query_string();
        assert!(!s.contains("filters="));
        assert!(s.ends_with("limit_page_length=20"));
    }

    #[test]
    fn test_doc_path_encodes_slashes() {
        assert_eq!(
            doc_path("Procurement Orders", "PO/024/00012/25-26"),
            "/api/resource/Procurement%20Orders/PO%2F024%2F00012%2F25-26"
        );
    }

    #[test]
    fn test_extract_server_messages() {
        let inner = json!({"message": "Planned Amount <b>must</b> be set"}).to_string();
        let outer = serde_json::to_string(&vec![inner]).unwrap();
        let body = json!({ "exc_type": "ValidationError", "_server_messages": outer }).to_string();
        assert_eq!(
            extract_error_message(&body).as_deref(),
            Some("Planned Amount must be set")
        );
    }

    #[test]
    fn test_extract_exception_and_message() {
        let body = json!({
            "exception": "frappe.exceptions.LinkValidationError: Could not find Vendor: V-9"
        })
        .to_string();
        assert_eq!(
            extract_error_message(&body).as_deref(),
            Some("Could not find Vendor: V-9")
        );

        let body = json!({ "message": "Not permitted" }).to_string();
        assert_eq!(extract_error_message(&body).as_deref(), Some("Not permitted"));

        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message("{}"), None);
    }
}
