use crate::shared::api_utils::api_url;
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use contracts::shared::print::PrintRequest;
use leptos::prelude::*;
use thaw::*;

/// Opens the backend-rendered PDF of one record in a new browser tab.
/// The date range is passed through to the print format.
#[component]
pub fn PrintButton(
    doctype: &'static str,
    format: &'static str,
    #[prop(into)]
    name: Signal<String>,
    #[prop(optional, into)]
    from_date: Option<Signal<String>>,
    #[prop(optional, into)]
    to_date: Option<Signal<String>>,
    #[prop(optional)]
    label: Option<&'static str>,
) -> impl IntoView {
    let notify = use_notify();

    let open_pdf = move |_| {
        let request = PrintRequest::new(doctype, &name.get_untracked(), format).with_range(
            from_date.map(|s| s.get_untracked()),
            to_date.map(|s| s.get_untracked()),
        );
        if let Err(errors) = request.validate() {
            notify.error(
                "Cannot build the report",
                errors.first_message().unwrap_or_default(),
            );
            return;
        }

        let url = api_url(&request.download_url());
        log::debug!("open pdf {}", url);
        let opened = web_sys::window()
            .and_then(|w| w.open_with_url_and_target(&url, "_blank").ok().flatten());
        if opened.is_none() {
            notify.error("Cannot open the report", "the browser blocked the new window");
        }
    };

    view! {
        <Button
            appearance=ButtonAppearance::Secondary
            on_click=open_pdf
            disabled=Signal::derive(move || name.get().trim().is_empty())
        >
            {icon("download")}
            {label.unwrap_or(" PDF")}
        </Button>
    }
}
