/// Identification of a client-side workflow
pub trait UseCaseMetadata {
    /// Index (e.g. "u501")
    fn usecase_index() -> &'static str;

    /// Technical name (e.g. "plan_submission")
    fn usecase_name() -> &'static str;

    /// Title shown on dialogs
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// "u501_plan_submission"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
