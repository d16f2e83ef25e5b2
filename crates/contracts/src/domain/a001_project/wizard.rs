//! Multi-step project creation wizard.
//!
//! The draft is held entirely in memory; nothing is sent until the review
//! step submits the whole project in one create call.

use super::aggregate::{ProjectCreate, WorkPackageSelection, WORK_PACKAGES_KEY};
use crate::domain::common::encode_items;
use crate::shared::dates::{days_between, parse_date};
use crate::shared::validation::{
    parse_amount, require_date, require_date_not_past, require_text, FieldErrors,
    ValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    Details,
    Address,
    Timeline,
    Assignees,
    Packages,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Details,
        WizardStep::Address,
        WizardStep::Timeline,
        WizardStep::Assignees,
        WizardStep::Packages,
        WizardStep::Review,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Details => "Project Details",
            WizardStep::Address => "Project Address",
            WizardStep::Timeline => "Project Timeline",
            WizardStep::Assignees => "Project Assignees",
            WizardStep::Packages => "Package Selection",
            WizardStep::Review => "Review & Create",
        }
    }
}

/// Form state of the wizard. Numeric and date inputs stay as typed strings
/// until validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub project_name: String,
    pub customer: String,
    pub project_type: String,
    pub project_value: String,

    pub address_line_1: String,
    pub address_line_2: String,
    pub project_city: String,
    pub project_state: String,
    pub pin: String,
    pub email: String,
    pub phone: String,

    pub project_start_date: String,
    pub project_end_date: String,

    pub project_lead: String,
    pub project_manager: String,
    pub procurement_lead: String,
    pub accountant: String,

    pub work_packages: Vec<WorkPackageSelection>,
}

impl ProjectDraft {
    pub fn validate_step(&self, step: WizardStep, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match step {
            WizardStep::Details => self.validate_details(&mut errors),
            WizardStep::Address => self.validate_address(&mut errors),
            WizardStep::Timeline => self.validate_timeline(&mut errors, today),
            WizardStep::Assignees => {}
            WizardStep::Packages => self.validate_packages(&mut errors),
            WizardStep::Review => {
                self.validate_details(&mut errors);
                self.validate_address(&mut errors);
                self.validate_timeline(&mut errors, today);
                self.validate_packages(&mut errors);
            }
        }
        errors
    }

    fn validate_details(&self, errors: &mut FieldErrors) {
        if require_text(errors, "project_name", &self.project_name)
            && self.project_name.trim().chars().count() < 3
        {
            errors.push(
                "project_name",
                ValidationError::OutOfRange {
                    field: "project_name",
                    detail: "at least 3 characters".into(),
                },
            );
        }
        require_text(errors, "customer", &self.customer);
        require_text(errors, "project_type", &self.project_type);
        if !self.project_value.trim().is_empty() {
            match parse_amount(&self.project_value) {
                Some(v) if v >= 0.0 => {}
                Some(_) => errors.push(
                    "project_value",
                    ValidationError::OutOfRange {
                        field: "project_value",
                        detail: "cannot be negative".into(),
                    },
                ),
                None => errors.push(
                    "project_value",
                    ValidationError::InvalidFormat {
                        field: "project_value",
                        expected: "a number",
                    },
                ),
            }
        }
    }

    fn validate_address(&self, errors: &mut FieldErrors) {
        require_text(errors, "address_line_1", &self.address_line_1);
        require_text(errors, "project_city", &self.project_city);
        require_text(errors, "project_state", &self.project_state);

        let pin = self.pin.trim();
        if pin.is_empty() {
            errors.push("pin", ValidationError::Required("pin"));
        } else if pin.len() != 6 || !pin.chars().all(|c| c.is_ascii_digit()) {
            errors.push(
                "pin",
                ValidationError::InvalidFormat {
                    field: "pin",
                    expected: "6 digits",
                },
            );
        }

        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            errors.push(
                "email",
                ValidationError::InvalidFormat {
                    field: "email",
                    expected: "name@domain",
                },
            );
        }

        let phone = self.phone.trim();
        if !phone.is_empty() && (phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit())) {
            errors.push(
                "phone",
                ValidationError::InvalidFormat {
                    field: "phone",
                    expected: "10 digits",
                },
            );
        }
    }

    fn validate_timeline(&self, errors: &mut FieldErrors, today: NaiveDate) {
        let start = require_date_not_past(
            errors,
            "project_start_date",
            &self.project_start_date,
            today,
            None,
        );
        let end = require_date(errors, "project_end_date", &self.project_end_date);
        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                errors.push(
                    "project_end_date",
                    ValidationError::OutOfRange {
                        field: "project_end_date",
                        detail: "must not be before the start date".into(),
                    },
                );
            }
        }
    }

    fn validate_packages(&self, errors: &mut FieldErrors) {
        if self.work_packages.is_empty() {
            errors.push("work_packages", ValidationError::Empty("work_packages"));
        }
    }

    /// Days between start and end, when both dates parse and are ordered
    pub fn duration_days(&self) -> Option<i64> {
        let start = parse_date(&self.project_start_date)?;
        let end = parse_date(&self.project_end_date)?;
        let days = days_between(start, end);
        (days >= 0).then_some(days)
    }

    pub fn is_package_selected(&self, package: &str) -> bool {
        self.work_packages
            .iter()
            .any(|p| p.work_package_name == package)
    }

    pub fn toggle_package(&mut self, package: &str) {
        if self.is_package_selected(package) {
            self.work_packages.retain(|p| p.work_package_name != package);
        } else {
            self.work_packages.push(WorkPackageSelection {
                work_package_name: package.to_string(),
                categories: Vec::new(),
            });
        }
    }

    /// Toggling a category of an unselected package selects the package too
    pub fn toggle_category(&mut self, package: &str, category: &str) {
        if !self.is_package_selected(package) {
            self.toggle_package(package);
        }
        if let Some(p) = self
            .work_packages
            .iter_mut()
            .find(|p| p.work_package_name == package)
        {
            if let Some(pos) = p.categories.iter().position(|c| c == category) {
                p.categories.remove(pos);
            } else {
                p.categories.push(category.to_string());
            }
        }
    }

    fn to_create(&self) -> ProjectCreate {
        fn opt(s: &str) -> Option<String> {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }

        ProjectCreate {
            project_name: self.project_name.trim().to_string(),
            customer: self.customer.trim().to_string(),
            project_type: self.project_type.trim().to_string(),
            project_value: parse_amount(&self.project_value).unwrap_or(0.0),
            address_line_1: self.address_line_1.trim().to_string(),
            address_line_2: self.address_line_2.trim().to_string(),
            project_city: self.project_city.trim().to_string(),
            project_state: self.project_state.trim().to_string(),
            pin: self.pin.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            project_start_date: self.project_start_date.trim().to_string(),
            project_end_date: self.project_end_date.trim().to_string(),
            project_lead: opt(&self.project_lead),
            project_manager: opt(&self.project_manager),
            procurement_lead: opt(&self.procurement_lead),
            accountant: opt(&self.accountant),
            project_work_packages: encode_items(&self.work_packages, WORK_PACKAGES_KEY),
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Navigation state of the wizard
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWizard {
    pub draft: ProjectDraft,
    pub step: WizardStep,
    /// Furthest step reached so far; the stepper allows jumping back to it
    pub furthest: WizardStep,
}

impl Default for ProjectWizard {
    fn default() -> Self {
        Self {
            draft: ProjectDraft::default(),
            step: WizardStep::Details,
            furthest: WizardStep::Details,
        }
    }
}

impl ProjectWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move forward when the current step is valid, else return its errors
    pub fn advance(&mut self, today: NaiveDate) -> Result<WizardStep, FieldErrors> {
        self.draft.validate_step(self.step, today).into_result()?;
        if let Some(next) = self.step.next() {
            self.step = next;
            if next > self.furthest {
                self.furthest = next;
            }
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Returns false when the target was not reached yet
    pub fn jump_to(&mut self, step: WizardStep) -> bool {
        if step <= self.furthest {
            self.step = step;
            true
        } else {
            false
        }
    }

    pub fn is_last(&self) -> bool {
        self.step == WizardStep::Review
    }

    pub fn submit_payload(&self, today: NaiveDate) -> Result<ProjectCreate, FieldErrors> {
        self.draft
            .validate_step(WizardStep::Review, today)
            .into_result()?;
        Ok(self.draft.to_create())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn complete_draft() -> ProjectDraft {
        let mut d = ProjectDraft {
            project_name: "Tower B Interiors".into(),
            customer: "CUS-0004".into(),
            project_type: "Commercial".into(),
            project_value: "25,00,000".into(),
            address_line_1: "Plot 12, MIDC".into(),
            project_city: "Pune".into(),
            project_state: "Maharashtra".into(),
            pin: "411019".into(),
            email: "site@example.com".into(),
            project_start_date: "2026-11-01".into(),
            project_end_date: "2027-03-31".into(),
            ..ProjectDraft::default()
        };
        d.toggle_category("Electrical Work", "Wires & Cables");
        d
    }

    #[test]
    fn test_step_navigation_order() {
        assert_eq!(WizardStep::Details.next(), Some(WizardStep::Address));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Details.prev(), None);
        assert_eq!(WizardStep::Packages.prev(), Some(WizardStep::Assignees));
        assert_eq!(WizardStep::Review.index(), 5);
    }

    #[test]
    fn test_details_step_rejects_empty_form() {
        let draft = ProjectDraft::default();
        let errors = draft.validate_step(WizardStep::Details, today());
        assert!(errors.has("project_name"));
        assert!(errors.has("customer"));
        assert!(errors.has("project_type"));
        assert!(!errors.has("project_value"));
    }

    #[test]
    fn test_address_formats() {
        let mut draft = complete_draft();
        draft.pin = "41101".into();
        draft.email = "not-an-email".into();
        draft.phone = "98765".into();
        let errors = draft.validate_step(WizardStep::Address, today());
        assert!(errors.has("pin"));
        assert!(errors.has("email"));
        assert!(errors.has("phone"));

        draft.pin = "411019".into();
        draft.email = String::new();
        draft.phone = "9876543210".into();
        assert!(draft.validate_step(WizardStep::Address, today()).is_empty());
    }

    #[test]
    fn test_timeline_rules() {
        let mut draft = complete_draft();
        draft.project_start_date = "2026-10-01".into();
        let errors = draft.validate_step(WizardStep::Timeline, today());
        assert_eq!(
            errors.get("project_start_date"),
            Some(&ValidationError::InPast("project_start_date"))
        );

        draft.project_start_date = "2026-12-01".into();
        draft.project_end_date = "2026-11-30".into();
        let errors = draft.validate_step(WizardStep::Timeline, today());
        assert!(errors.has("project_end_date"));
        assert_eq!(draft.duration_days(), None);

        draft.project_end_date = "2026-12-31".into();
        assert!(draft.validate_step(WizardStep::Timeline, today()).is_empty());
        assert_eq!(draft.duration_days(), Some(30));
    }

    #[test]
    fn test_advance_blocks_on_invalid_step() {
        let mut wizard = ProjectWizard::new();
        assert!(wizard.advance(today()).is_err());
        assert_eq!(wizard.step, WizardStep::Details);

        wizard.draft = complete_draft();
        assert_eq!(wizard.advance(today()), Ok(WizardStep::Address));
        assert_eq!(wizard.advance(today()), Ok(WizardStep::Timeline));
        assert_eq!(wizard.furthest, WizardStep::Timeline);

        assert!(!wizard.jump_to(WizardStep::Packages));
        assert!(wizard.jump_to(WizardStep::Details));
        assert_eq!(wizard.back(), WizardStep::Details);
        assert_eq!(wizard.furthest, WizardStep::Timeline);
    }

    #[test]
    fn test_toggle_package_and_category() {
        let mut draft = ProjectDraft::default();
        draft.toggle_category("Plumbing", "Pipes");
        assert!(draft.is_package_selected("Plumbing"));
        assert_eq!(draft.work_packages[0].categories, vec!["Pipes".to_string()]);

        draft.toggle_category("Plumbing", "Pipes");
        assert!(draft.work_packages[0].categories.is_empty());

        draft.toggle_package("Plumbing");
        assert!(draft.work_packages.is_empty());
        assert!(draft.validate_step(WizardStep::Packages, today()).has("work_packages"));
    }

    #[test]
    fn test_submit_payload() {
        let mut wizard = ProjectWizard::new();
        wizard.draft = complete_draft();
        wizard.draft.project_lead = "  ".into();
        let payload = wizard.submit_payload(today()).unwrap();
        assert_eq!(payload.project_value, 2_500_000.0);
        assert_eq!(payload.project_lead, None);
        assert!(payload.project_work_packages.contains("\"work_packages\""));
        assert!(payload.project_work_packages.contains("Wires & Cables"));

        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("phone").is_none());
        assert_eq!(body["email"], "site@example.com");
    }
}
