use crate::shared::date_utils::today;
use crate::shared::frappe_client::create_doc;
use crate::shared::notify::NotifyService;
use contracts::domain::common::DocType;
use contracts::usecases::u501_plan_submission::{BulkSubmitReport, PlanReview, ReviewRow};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Creates one `T` per body, strictly in order. A failed row is logged and
/// the loop goes on.
pub async fn submit_all<T, B>(bodies: Vec<(String, B)>) -> BulkSubmitReport
where
    T: DocType + DeserializeOwned,
    B: Serialize,
{
    let mut report = BulkSubmitReport::new();
    for (label, body) in bodies {
        match create_doc::<T, B>(&body).await {
            Ok(doc) => {
                log::debug!("created {} {} for {}", T::element_name(), doc.name(), label);
                report.record_success(label);
            }
            Err(e) => {
                log::warn!("failed to create {} for {}: {}", T::element_name(), label, e);
                report.record_failure(label, e);
            }
        }
    }
    log::info!("{}: {}", T::list_name(), report.summary());
    report
}

/// Handles needed to run a review submission from a dialog
#[derive(Clone, Copy)]
pub struct SubmitContext {
    pub notify: NotifyService,
    pub is_submitting: RwSignal<bool>,
    /// Row errors are shown once a submit was attempted
    pub show_errors: RwSignal<bool>,
    pub on_created: Callback<()>,
    pub on_close: Callback<()>,
}

/// Validates every row, then creates them one by one. Created rows leave
/// the review by label and are handed to `forget`, so a retry or a rebuilt
/// review only sends what failed. The dialog closes when everything went
/// through.
pub fn submit_review<T, D>(
    review: RwSignal<PlanReview<D>>,
    project: String,
    cx: SubmitContext,
    forget: impl Fn(&[D]) + 'static,
) where
    T: DocType + DeserializeOwned + 'static,
    D: ReviewRow + Send + Sync + 'static,
    D::Body: Serialize + 'static,
{
    if cx.is_submitting.get_untracked() {
        return;
    }
    let bodies = match review.with_untracked(|r| r.payloads(&project, today())) {
        Ok(bodies) => bodies,
        Err(rows) => {
            cx.show_errors.set(true);
            let rows: Vec<String> = rows.iter().map(|(i, _)| (i + 1).to_string()).collect();
            cx.notify
                .error("Some plans are incomplete", format!("Check row(s) {}", rows.join(", ")));
            return;
        }
    };

    cx.is_submitting.set(true);
    spawn_local(async move {
        let report = submit_all::<T, D::Body>(bodies).await;
        // the dialog may be gone by now
        let created = review
            .try_update(|r| r.take_created(report.created()))
            .unwrap_or_default();
        forget(&created);
        cx.is_submitting.set(false);

        if report.all_ok() {
            cx.notify.success(&report.summary());
        } else {
            let detail = report
                .failures()
                .iter()
                .map(|(label, err)| format!("{}: {}", label, err))
                .collect::<Vec<_>>()
                .join("; ");
            cx.notify.error(&report.summary(), detail);
        }
        if report.succeeded() > 0 {
            cx.on_created.run(());
        }
        if report.all_ok() {
            cx.on_close.run(());
        }
    });
}
