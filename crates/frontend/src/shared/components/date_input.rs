use leptos::prelude::*;

/// Native date picker bound to a `YYYY-MM-DD` string
#[component]
pub fn DateInput(
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    /// Earliest selectable day, `YYYY-MM-DD`
    #[prop(optional, into)]
    min: Option<String>,
    #[prop(optional)]
    invalid: Option<Signal<bool>>,
    #[prop(optional)]
    disabled: Option<Signal<bool>>,
) -> impl IntoView {
    let invalid = invalid.unwrap_or_else(|| Signal::derive(|| false));
    let disabled = disabled.unwrap_or_else(|| Signal::derive(|| false));
    view! {
        <input
            type="date"
            class="date-input"
            class:date-input--invalid=move || invalid.get()
            min=min
            disabled=move || disabled.get()
            prop:value=move || value.get()
            on:input=move |ev| on_change.run(event_target_value(&ev))
        />
    }
}
