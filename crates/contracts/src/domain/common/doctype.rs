use super::DocMeta;

/// Trait for records stored in the remote document database
///
/// Static part describes the doctype, instance part exposes the record name.
pub trait DocType {
    // ============================================================================
    // Doctype metadata (static)
    // ============================================================================

    /// Doctype name on the remote side (e.g. "Cashflow Plan")
    fn doctype() -> &'static str;

    /// Index of the entity inside this application (e.g. "a006")
    fn aggregate_index() -> &'static str;

    /// UI name of a single record
    fn element_name() -> &'static str;

    /// UI name of the list
    fn list_name() -> &'static str;

    // ============================================================================
    // Instance data
    // ============================================================================

    fn meta(&self) -> &DocMeta;

    fn name(&self) -> &str {
        &self.meta().name
    }
}
