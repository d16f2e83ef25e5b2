//! PDF download links. Rendering happens on the backend; the client only
//! builds the URL and lets the browser fetch it.

use super::dates::parse_date;
use super::validation::{FieldErrors, ValidationError};

pub const DOWNLOAD_PDF_METHOD: &str = "/api/method/frappe.utils.print_format.download_pdf";

#[derive(Debug, Clone, PartialEq)]
pub struct PrintRequest {
    pub doctype: String,
    pub name: String,
    pub format: String,
    pub letterhead: bool,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl PrintRequest {
    pub fn new(doctype: &str, name: &str, format: &str) -> Self {
        Self {
            doctype: doctype.to_string(),
            name: name.to_string(),
            format: format.to_string(),
            letterhead: true,
            from_date: None,
            to_date: None,
        }
    }

    pub fn with_range(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.from_date = from.filter(|s| !s.trim().is_empty());
        self.to_date = to.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn without_letterhead(mut self) -> Self {
        self.letterhead = false;
        self
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", ValidationError::Required("name"));
        }
        if self.format.trim().is_empty() {
            errors.push("format", ValidationError::Required("format"));
        }

        let from = self.from_date.as_deref().map(|s| (s, parse_date(s)));
        let to = self.to_date.as_deref().map(|s| (s, parse_date(s)));
        if let Some((_, None)) = from {
            errors.push(
                "from_date",
                ValidationError::InvalidFormat {
                    field: "from_date",
                    expected: "YYYY-MM-DD",
                },
            );
        }
        if let Some((_, None)) = to {
            errors.push(
                "to_date",
                ValidationError::InvalidFormat {
                    field: "to_date",
                    expected: "YYYY-MM-DD",
                },
            );
        }
        if let (Some((f_raw, Some(f))), Some((t_raw, Some(t)))) = (from, to) {
            if f > t {
                errors.push(
                    "to_date",
                    ValidationError::OutOfRange {
                        field: "to_date",
                        detail: format!("{} is before {}", t_raw, f_raw),
                    },
                );
            }
        }
        errors.into_result()
    }

    /// Relative URL; prefix with the API base before opening
    pub fn download_url(&self) -> String {
        let mut url = format!(
            "{}?doctype={}&name={}&format={}&no_letterhead={}",
            DOWNLOAD_PDF_METHOD,
            urlencoding::encode(&self.doctype),
            urlencoding::encode(&self.name),
            urlencoding::encode(&self.format),
            if self.letterhead { 0 } else { 1 },
        );
        if let Some(from) = &self.from_date {
            url.push_str(&format!("&from_date={}", urlencoding::encode(from)));
        }
        if let Some(to) = &self.to_date {
            url.push_str(&format!("&to_date={}", urlencoding::encode(to)));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url() {
        let req = PrintRequest::new("Projects", "PROJ-0007", "Project Cashflow Report");
        assert_eq!(
            req.download_url(),
            "/api/method/frappe.utils.print_format.download_pdf?doctype=Projects&name=PROJ-0007&format=Project%20Cashflow%20Report&no_letterhead=0"
        );

        let req = req
            .without_letterhead()
            .with_range(Some("2026-01-01".into()), Some("2026-03-31".into()));
        let url = req.download_url();
        assert!(url.contains("no_letterhead=1"));
        assert!(url.ends_with("&from_date=2026-01-01&to_date=2026-03-31"));
    }

    #[test]
    fn test_blank_range_is_dropped() {
        let req = PrintRequest::new("Projects", "P", "F").with_range(Some("  ".into()), None);
        assert_eq!(req.from_date, None);
        assert!(!req.download_url().contains("from_date"));
    }

    #[test]
    fn test_validate_range() {
        let ok = PrintRequest::new("Projects", "P", "F")
            .with_range(Some("2026-01-01".into()), Some("2026-01-01".into()));
        assert!(ok.validate().is_ok());

        let reversed = PrintRequest::new("Projects", "P", "F")
            .with_range(Some("2026-02-01".into()), Some("2026-01-01".into()));
        let errors = reversed.validate().unwrap_err();
        assert!(errors.has("to_date"));

        let garbage = PrintRequest::new("Projects", "", "F").with_range(Some("soon".into()), None);
        let errors = garbage.validate().unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("from_date"));
    }
}
