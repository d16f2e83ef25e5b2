use super::view_model::ProjectWizardViewModel;
use crate::layout::global_context::use_app_context;
use crate::shared::components::table::number_format::format_inr;
use crate::shared::date_utils::{format_date, today};
use crate::shared::icons::icon;
use crate::shared::notify::use_notify;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use contracts::domain::a001_project::wizard::{ProjectDraft, WizardStep};
use contracts::shared::dates::format_date as iso_date;
use contracts::shared::validation::parse_amount;
use leptos::prelude::*;
use thaw::*;

type Read = fn(&ProjectDraft) -> &String;
type Write = fn(&mut ProjectDraft, String);

#[component]
pub fn ProjectWizardPage(on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let notify = use_notify();
    let vm = ProjectWizardViewModel::new();
    vm.load_lookups(notify);

    // memos so that typing into the draft does not rebuild the step form
    let step = Memo::new(move |_| vm.step());
    let is_last = Memo::new(move |_| vm.wizard.with(|w| w.is_last()));

    view! {
        <PageFrame page_id="a001_project--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <h1 class="page__title">"New project"</h1>
                <div class="header__actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Cancel"
                    </Button>
                </div>
            </div>

            <Stepper vm=vm />

            <div class="page__content wizard">
                <h2 class="wizard__title">{move || step.get().title()}</h2>
                {move || match step.get() {
                    WizardStep::Details => view! { <DetailsStep vm=vm /> }.into_any(),
                    WizardStep::Address => view! { <AddressStep vm=vm /> }.into_any(),
                    WizardStep::Timeline => view! { <TimelineStep vm=vm /> }.into_any(),
                    WizardStep::Assignees => view! { <AssigneesStep vm=vm /> }.into_any(),
                    WizardStep::Packages => view! { <PackagesStep vm=vm /> }.into_any(),
                    WizardStep::Review => view! { <ReviewStep vm=vm /> }.into_any(),
                }}
            </div>

            <div class="wizard__footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || step.get().prev().is_none())
                    on_click=move |_| vm.back()
                >
                    {icon("arrow-left")}
                    " Back"
                </Button>
                <Show
                    when=move || is_last.get()
                    fallback=move || view! {
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.next()>
                            "Next "
                            {icon("arrow-right")}
                        </Button>
                    }
                >
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || vm.is_submitting.get())
                        on_click=move |_| vm.submit(ctx, notify, on_close)
                    >
                        {move || if vm.is_submitting.get() { "Creating..." } else { "Create project" }}
                    </Button>
                </Show>
            </div>
        </PageFrame>
    }
}

#[component]
fn Stepper(vm: ProjectWizardViewModel) -> impl IntoView {
    view! {
        <ol class="stepper">
            {WizardStep::ALL.into_iter().map(|s| {
                let reachable = move || vm.wizard.with(|w| s <= w.furthest);
                view! {
                    <li
                        class="stepper__step"
                        class:stepper__step--active=move || vm.step() == s
                        class:stepper__step--done=move || vm.wizard.with(|w| s < w.furthest && s != w.step)
                        class:stepper__step--locked=move || !reachable()
                        on:click=move |_| vm.jump_to(s)
                    >
                        <span class="stepper__index">{s.index() + 1}</span>
                        <span class="stepper__label">{s.title()}</span>
                    </li>
                }
            }).collect_view()}
        </ol>
    }
}

#[component]
fn TextField(
    vm: ProjectWizardViewModel,
    label: &'static str,
    field: &'static str,
    read: Read,
    write: Write,
    #[prop(optional)]
    input_type: Option<&'static str>,
    #[prop(optional)]
    placeholder: &'static str,
    #[prop(optional)]
    required: bool,
) -> impl IntoView {
    let value = vm.draft_field(read);
    let error = vm.error_for(field);

    view! {
        <div class="form-group" class:form-group--invalid=move || error.get().is_some()>
            <label>
                {label}
                {required.then_some(view! { <span class="form-group__required">" *"</span> })}
            </label>
            <input
                type=input_type.unwrap_or("text")
                class="form-input"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    vm.edit(field, |d| write(d, v));
                }
            />
            {move || error.get().map(|e| view! { <div class="field-error">{e}</div> })}
        </div>
    }
}

#[component]
fn DetailsStep(vm: ProjectWizardViewModel) -> impl IntoView {
    let customer = vm.draft_field(|d| &d.customer);
    let project_type = vm.draft_field(|d| &d.project_type);
    let customer_error = vm.error_for("customer");
    let type_error = vm.error_for("project_type");

    view! {
        <div class="form-grid">
            <TextField vm=vm label="Project name" field="project_name" required=true
                read=|d| &d.project_name write=|d, v| d.project_name = v />

            <div class="form-group" class:form-group--invalid=move || customer_error.get().is_some()>
                <label>"Customer"<span class="form-group__required">" *"</span></label>
                <select
                    class="form-input"
                    prop:value=move || customer.get()
                    on:change=move |ev| {
                        let v = event_target_value(&ev);
                        vm.edit("customer", |d| d.customer = v);
                    }
                >
                    <option value="">"Select customer"</option>
                    {move || vm.lookups.with(|l| l.customers.iter().map(|c| {
                        view! { <option value=c.meta.name.clone()>{c.company_name.clone()}</option> }
                    }).collect_view())}
                </select>
                {move || customer_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
            </div>

            <div class="form-group" class:form-group--invalid=move || type_error.get().is_some()>
                <label>"Project type"<span class="form-group__required">" *"</span></label>
                <select
                    class="form-input"
                    prop:value=move || project_type.get()
                    on:change=move |ev| {
                        let v = event_target_value(&ev);
                        vm.edit("project_type", |d| d.project_type = v);
                    }
                >
                    <option value="">"Select type"</option>
                    {move || vm.lookups.with(|l| l.project_types.iter().map(|t| {
                        view! { <option value=t.meta.name.clone()>{t.project_type_name.clone()}</option> }
                    }).collect_view())}
                </select>
                {move || type_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
            </div>

            <TextField vm=vm label="Project value (₹)" field="project_value" placeholder="e.g. 25,00,000"
                read=|d| &d.project_value write=|d, v| d.project_value = v />
        </div>
    }
}

#[component]
fn AddressStep(vm: ProjectWizardViewModel) -> impl IntoView {
    view! {
        <div class="form-grid">
            <TextField vm=vm label="Address line 1" field="address_line_1" required=true
                read=|d| &d.address_line_1 write=|d, v| d.address_line_1 = v />
            <TextField vm=vm label="Address line 2" field="address_line_2"
                read=|d| &d.address_line_2 write=|d, v| d.address_line_2 = v />
            <TextField vm=vm label="City" field="project_city" required=true
                read=|d| &d.project_city write=|d, v| d.project_city = v />
            <TextField vm=vm label="State" field="project_state" required=true
                read=|d| &d.project_state write=|d, v| d.project_state = v />
            <TextField vm=vm label="PIN code" field="pin" required=true placeholder="6 digits"
                read=|d| &d.pin write=|d, v| d.pin = v />
            <TextField vm=vm label="Email" field="email" input_type="email"
                read=|d| &d.email write=|d, v| d.email = v />
            <TextField vm=vm label="Phone" field="phone" input_type="tel" placeholder="10 digits"
                read=|d| &d.phone write=|d, v| d.phone = v />
        </div>
    }
}

#[component]
fn TimelineStep(vm: ProjectWizardViewModel) -> impl IntoView {
    let min = iso_date(today());
    let duration = Signal::derive(move || vm.wizard.with(|w| w.draft.duration_days()));

    view! {
        <div class="form-grid">
            <TextField vm=vm label="Start date" field="project_start_date" input_type="date" required=true
                read=|d| &d.project_start_date write=|d, v| d.project_start_date = v />
            <TextField vm=vm label="End date" field="project_end_date" input_type="date" required=true
                read=|d| &d.project_end_date write=|d, v| d.project_end_date = v />
        </div>
        <p class="form-hint">
            {format!("Start date cannot be before {}.", format_date(&min))}
            " "
            {move || duration.get().map(|days| format!("Duration: {} days.", days))}
        </p>
    }
}

#[component]
fn AssigneesStep(vm: ProjectWizardViewModel) -> impl IntoView {
    view! {
        <p class="form-hint">"Assignees are optional and can be changed later."</p>
        <div class="form-grid">
            <TextField vm=vm label="Project lead" field="project_lead" placeholder="user id or email"
                read=|d| &d.project_lead write=|d, v| d.project_lead = v />
            <TextField vm=vm label="Project manager" field="project_manager"
                read=|d| &d.project_manager write=|d, v| d.project_manager = v />
            <TextField vm=vm label="Procurement lead" field="procurement_lead"
                read=|d| &d.procurement_lead write=|d, v| d.procurement_lead = v />
            <TextField vm=vm label="Accountant" field="accountant"
                read=|d| &d.accountant write=|d, v| d.accountant = v />
        </div>
    }
}

#[component]
fn PackagesStep(vm: ProjectWizardViewModel) -> impl IntoView {
    let error = vm.error_for("work_packages");

    view! {
        {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}
        <div class="package-list">
            {move || {
                let packages = vm.lookups.with(|l| l.work_packages.clone());
                if packages.is_empty() {
                    return view! { <Spinner label="Loading work packages..." /> }.into_any();
                }
                packages.into_iter().map(|wp| {
                    let package = StoredValue::new(wp.work_package_name.clone());
                    let categories = vm.lookups.with_untracked(|l| l.categories_of(&wp.work_package_name));
                    let selected = move || vm.wizard.with(|w| w.draft.is_package_selected(&package.get_value()));

                    view! {
                        <div class="package-card" class:package-card--selected=selected>
                            <label class="package-card__header">
                                <input
                                    type="checkbox"
                                    prop:checked=selected
                                    on:change=move |_| vm.edit("work_packages", |d| d.toggle_package(&package.get_value()))
                                />
                                <span>{wp.work_package_name.clone()}</span>
                            </label>
                            <div class="package-card__categories">
                                {categories.into_iter().map(|cat| {
                                    let cat = StoredValue::new(cat);
                                    let checked = move || vm.wizard.with(|w| {
                                        w.draft.work_packages.iter().any(|p| {
                                            p.work_package_name == package.get_value()
                                                && p.categories.contains(&cat.get_value())
                                        })
                                    });
                                    view! {
                                        <label class="package-card__category">
                                            <input
                                                type="checkbox"
                                                prop:checked=checked
                                                on:change=move |_| vm.edit("work_packages", |d| {
                                                    d.toggle_category(&package.get_value(), &cat.get_value())
                                                })
                                            />
                                            <span>{cat.get_value()}</span>
                                        </label>
                                    }
                                }).collect_view()}
                            </div>
                        </div>
                    }
                }).collect_view().into_any()
            }}
        </div>
    }
}

#[component]
fn ReviewSection(
    vm: ProjectWizardViewModel,
    step: WizardStep,
    rows: Vec<(&'static str, String)>,
) -> impl IntoView {
    view! {
        <section class="review-section">
            <div class="review-section__header">
                <h3>{step.title()}</h3>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.jump_to(step)>
                    {icon("edit")}
                    " Edit"
                </Button>
            </div>
            <dl class="review-section__rows">
                {rows.into_iter().map(|(label, value)| {
                    let value = if value.trim().is_empty() { "-".to_string() } else { value };
                    view! {
                        <dt>{label}</dt>
                        <dd>{value}</dd>
                    }
                }).collect_view()}
            </dl>
        </section>
    }
}

#[component]
fn ReviewStep(vm: ProjectWizardViewModel) -> impl IntoView {
    let draft = vm.wizard.with_untracked(|w| w.draft.clone());
    let customer = vm.lookups.with_untracked(|l| l.customer_label(&draft.customer));
    let value = parse_amount(&draft.project_value).map(format_inr).unwrap_or_default();
    let duration = draft
        .duration_days()
        .map(|d| format!("{} days", d))
        .unwrap_or_default();
    let packages = draft
        .work_packages
        .iter()
        .map(|p| {
            if p.categories.is_empty() {
                p.work_package_name.clone()
            } else {
                format!("{} ({})", p.work_package_name, p.categories.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("; ");
    let errors = vm.errors;

    let details = vec![
        ("Name", draft.project_name.clone()),
        ("Customer", customer),
        ("Type", draft.project_type.clone()),
        ("Value", value),
    ];
    let address = vec![
        ("Address", format!("{} {}", draft.address_line_1, draft.address_line_2)),
        ("City", format!("{}, {} {}", draft.project_city, draft.project_state, draft.pin)),
        ("Email", draft.email.clone()),
        ("Phone", draft.phone.clone()),
    ];
    let timeline = vec![
        ("Start", format_date(&draft.project_start_date)),
        ("End", format_date(&draft.project_end_date)),
        ("Duration", duration),
    ];
    let assignees = vec![
        ("Project lead", draft.project_lead.clone()),
        ("Project manager", draft.project_manager.clone()),
        ("Procurement lead", draft.procurement_lead.clone()),
        ("Accountant", draft.accountant.clone()),
    ];
    let packages = vec![("Work packages", packages)];

    view! {
        {move || errors.with(|e| e.first_message()).map(|m| view! { <div class="warning-box">{m}</div> })}
        <ReviewSection vm=vm step=WizardStep::Details rows=details />
        <ReviewSection vm=vm step=WizardStep::Address rows=address />
        <ReviewSection vm=vm step=WizardStep::Timeline rows=timeline />
        <ReviewSection vm=vm step=WizardStep::Assignees rows=assignees />
        <ReviewSection vm=vm step=WizardStep::Packages rows=packages />
    }
}
