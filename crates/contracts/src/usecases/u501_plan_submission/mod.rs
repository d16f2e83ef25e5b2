pub mod drafts;
pub mod report;
pub mod review;
pub mod selection;

pub use drafts::{
    build_cashflow_drafts, build_material_drafts, CashflowDraft, MaterialDraft, ReviewRow,
};
pub use report::BulkSubmitReport;
pub use review::PlanReview;
pub use selection::{candidate_pos, PlanSelection, PlanStage};

use crate::usecases::common::UseCaseMetadata;

pub struct PlanSubmission;

impl UseCaseMetadata for PlanSubmission {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "plan_submission"
    }

    fn display_name() -> &'static str {
        "Add plans"
    }

    fn description() -> &'static str {
        "Pick a critical PO task, POs and items, review one plan per PO and create them together"
    }
}
