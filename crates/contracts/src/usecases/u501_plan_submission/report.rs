/// Outcome of a sequential bulk create. Rows are sent one by one and a
/// failed row does not stop the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkSubmitReport {
    succeeded: Vec<String>,
    failed: Vec<(String, String)>,
}

impl BulkSubmitReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, label: impl Into<String>) {
        self.succeeded.push(label.into());
    }

    pub fn record_failure(&mut self, label: impl Into<String>, error: impl Into<String>) {
        self.failed.push((label.into(), error.into()));
    }

    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failed(&self) -> usize {
        self.failed.len()
    }

    /// Labels of the created rows, in submit order
    pub fn created(&self) -> &[String] {
        &self.succeeded
    }

    pub fn failures(&self) -> &[(String, String)] {
        &self.failed
    }

    pub fn all_ok(&self) -> bool {
        self.failed.is_empty() && !self.succeeded.is_empty()
    }

    /// One line for the notification
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("Created {} plan(s)", self.succeeded.len())
        } else {
            let names: Vec<&str> = self.failed.iter().map(|(l, _)| l.as_str()).collect();
            format!(
                "Created {} of {} plan(s). Failed: {}",
                self.succeeded.len(),
                self.attempted(),
                names.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_partial_failure() {
        let mut report = BulkSubmitReport::new();
        report.record_success("PO/1/00001/25-26");
        report.record_failure("PO/1/00002/25-26", "Insufficient Permission");
        report.record_success("PO/1/00003/25-26");

        assert_eq!(report.attempted(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_ok());
        assert_eq!(
            report.summary(),
            "Created 2 of 3 plan(s). Failed: PO/1/00002/25-26"
        );
        assert_eq!(report.failures()[0].1, "Insufficient Permission");
        assert_eq!(report.created(), ["PO/1/00001/25-26", "PO/1/00003/25-26"]);
    }

    #[test]
    fn test_all_ok() {
        let mut report = BulkSubmitReport::new();
        assert!(!report.all_ok());
        report.record_success("a");
        assert!(report.all_ok());
        assert_eq!(report.summary(), "Created 1 plan(s)");
    }
}
