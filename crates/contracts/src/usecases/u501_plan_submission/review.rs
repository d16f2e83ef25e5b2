use super::drafts::ReviewRow;
use crate::shared::validation::FieldErrors;
use chrono::NaiveDate;

/// Review stage: rows are edited in place and submitted together
#[derive(Debug, Clone, PartialEq)]
pub struct PlanReview<D> {
    rows: Vec<D>,
}

impl<D> Default for PlanReview<D> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<D: ReviewRow> PlanReview<D> {
    pub fn new(rows: Vec<D>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[D] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Applies `f` to row `index`; false when there is no such row
    pub fn update(&mut self, index: usize, f: impl FnOnce(&mut D)) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                f(row);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<D> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Removes the rows whose label is in `labels` and returns them. Rows are
    /// matched by label, so edits made while a submit was running do not
    /// shift which rows leave.
    pub fn take_created(&mut self, labels: &[String]) -> Vec<D> {
        let (created, kept): (Vec<D>, Vec<D>) = std::mem::take(&mut self.rows)
            .into_iter()
            .partition(|row| labels.contains(&row.label()));
        self.rows = kept;
        created
    }

    /// `(row index, errors)` for every incomplete row
    pub fn row_errors(&self, today: NaiveDate) -> Vec<(usize, FieldErrors)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.validate(today).err().map(|e| (i, e)))
            .collect()
    }

    pub fn is_submittable(&self, today: NaiveDate) -> bool {
        !self.rows.is_empty() && self.row_errors(today).is_empty()
    }

    /// Create bodies in row order, or the errors of every incomplete row.
    /// Nothing is produced while any row is incomplete.
    pub fn payloads(
        &self,
        project: &str,
        today: NaiveDate,
    ) -> Result<Vec<(String, D::Body)>, Vec<(usize, FieldErrors)>> {
        let mut bodies = Vec::with_capacity(self.rows.len());
        let mut failed = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            match row.to_body(project, today) {
                Ok(body) => bodies.push((row.label(), body)),
                Err(e) => failed.push((i, e)),
            }
        }
        if failed.is_empty() {
            Ok(bodies)
        } else {
            Err(failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::{require_positive, FieldErrors};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        label: &'static str,
        amount: String,
    }

    impl ReviewRow for Row {
        type Body = f64;

        fn label(&self) -> String {
            self.label.to_string()
        }

        fn validate(&self, _today: NaiveDate) -> Result<(), FieldErrors> {
            let mut errors = FieldErrors::new();
            require_positive(&mut errors, "amount", &self.amount);
            errors.into_result()
        }

        fn to_body(&self, _project: &str, today: NaiveDate) -> Result<f64, FieldErrors> {
            self.validate(today)?;
            Ok(self.amount.parse().unwrap_or(0.0))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn review() -> PlanReview<Row> {
        PlanReview::new(vec![
            Row { label: "a", amount: "10".into() },
            Row { label: "b", amount: "".into() },
            Row { label: "c", amount: "5".into() },
        ])
    }

    #[test]
    fn test_incomplete_rows_block_submission() {
        let r = review();
        assert!(!r.is_submittable(today()));
        let errors = r.row_errors(today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, 1);

        let failed = r.payloads("PROJ-0001", today()).unwrap_err();
        assert_eq!(failed[0].0, 1);
    }

    #[test]
    fn test_edit_then_submit() {
        let mut r = review();
        assert!(r.update(1, |row| row.amount = "7".into()));
        assert!(!r.update(9, |row| row.amount = "1".into()));
        assert!(r.is_submittable(today()));

        let bodies = r.payloads("PROJ-0001", today()).unwrap();
        assert_eq!(
            bodies,
            vec![("a".to_string(), 10.0), ("b".to_string(), 7.0), ("c".to_string(), 5.0)]
        );
    }

    #[test]
    fn test_remove_and_empty_review() {
        let mut r = review();
        assert_eq!(r.remove(1).map(|row| row.label), Some("b"));
        assert!(r.remove(5).is_none());
        assert_eq!(r.len(), 2);
        assert!(r.is_submittable(today()));

        r.remove(0);
        r.remove(0);
        assert!(r.is_empty());
        assert!(!r.is_submittable(today()));
    }

    #[test]
    fn test_created_rows_leave_by_label() {
        let mut r = review();
        // a row removed while the submit was running
        r.remove(0);

        let created = r.take_created(&["a".to_string(), "c".to_string()]);
        assert_eq!(created.iter().map(|row| row.label).collect::<Vec<_>>(), vec!["c"]);
        assert_eq!(r.rows().iter().map(|row| row.label).collect::<Vec<_>>(), vec!["b"]);

        assert!(r.take_created(&[]).is_empty());
        assert_eq!(r.len(), 1);
    }
}
