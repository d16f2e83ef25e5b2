use super::super::model;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::date_utils::today;
use crate::shared::notify::NotifyService;
use contracts::domain::a001_project::aggregate::{
    Category, Customer, Project, ProjectType, WorkPackage,
};
use contracts::domain::a001_project::wizard::{ProjectDraft, ProjectWizard, WizardStep};
use contracts::domain::common::DocType;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Lookup lists the wizard's selects are filled from
#[derive(Debug, Clone, Default)]
pub struct WizardLookups {
    pub customers: Vec<Customer>,
    pub project_types: Vec<ProjectType>,
    pub work_packages: Vec<WorkPackage>,
    pub categories: Vec<Category>,
}

impl WizardLookups {
    pub fn customer_label(&self, name: &str) -> String {
        self.customers
            .iter()
            .find(|c| c.meta.name == name)
            .map(|c| c.company_name.clone())
            .unwrap_or_else(|| name.to_string())
    }

    pub fn categories_of(&self, package: &str) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| c.work_package == package)
            .map(|c| c.category_name.clone())
            .collect()
    }
}

#[derive(Clone, Copy)]
pub struct ProjectWizardViewModel {
    pub wizard: RwSignal<ProjectWizard>,
    pub errors: RwSignal<FieldErrors>,
    pub lookups: RwSignal<WizardLookups>,
    pub is_submitting: RwSignal<bool>,
}

impl ProjectWizardViewModel {
    pub fn new() -> Self {
        Self {
            wizard: RwSignal::new(ProjectWizard::new()),
            errors: RwSignal::new(FieldErrors::new()),
            lookups: RwSignal::new(WizardLookups::default()),
            is_submitting: RwSignal::new(false),
        }
    }

    pub fn load_lookups(&self, notify: NotifyService) {
        let lookups = self.lookups;
        spawn_local(async move {
            let customers = model::fetch_customers().await;
            let types = model::fetch_project_types().await;
            let packages = model::fetch_work_packages().await;
            let categories = model::fetch_categories().await;

            let mut loaded = WizardLookups::default();
            match customers {
                Ok(v) => loaded.customers = v,
                Err(e) => notify.error("Failed to load customers", e),
            }
            match types {
                Ok(v) => loaded.project_types = v,
                Err(e) => notify.error("Failed to load project types", e),
            }
            match packages {
                Ok(v) => loaded.work_packages = v,
                Err(e) => notify.error("Failed to load work packages", e),
            }
            match categories {
                Ok(v) => loaded.categories = v,
                Err(e) => notify.error("Failed to load categories", e),
            }
            lookups.set(loaded);
        });
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.with(|w| w.step)
    }

    pub fn draft_field(&self, read: fn(&ProjectDraft) -> &String) -> Signal<String> {
        let wizard = self.wizard;
        Signal::derive(move || wizard.with(|w| read(&w.draft).clone()))
    }

    /// Applies an edit to the draft and drops the errors of the edited field
    pub fn edit(&self, field: &'static str, f: impl FnOnce(&mut ProjectDraft)) {
        self.wizard.update(|w| f(&mut w.draft));
        if self.errors.with_untracked(|e| e.has(field)) {
            self.errors.update(|e| e.clear_field(field));
        }
    }

    pub fn error_for(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.get(field).map(|err| err.to_string())))
    }

    pub fn next(&self) {
        let mut result = Ok(WizardStep::Details);
        self.wizard.update(|w| result = w.advance(today()));
        match result {
            Ok(step) => {
                log::debug!("wizard step: {:?}", step);
                self.errors.set(FieldErrors::new());
            }
            Err(errors) => self.errors.set(errors),
        }
    }

    pub fn back(&self) {
        self.wizard.update(|w| {
            w.back();
        });
        self.errors.set(FieldErrors::new());
    }

    pub fn jump_to(&self, step: WizardStep) {
        let mut moved = false;
        self.wizard.update(|w| moved = w.jump_to(step));
        if moved {
            self.errors.set(FieldErrors::new());
        }
    }

    /// Creates the project, makes it the active one and closes the wizard
    pub fn submit(&self, ctx: AppGlobalContext, notify: NotifyService, on_done: Callback<()>) {
        if self.is_submitting.get_untracked() {
            return;
        }
        let body = match self.wizard.with_untracked(|w| w.submit_payload(today())) {
            Ok(body) => body,
            Err(errors) => {
                notify.error(
                    "Project is incomplete",
                    errors.first_message().unwrap_or_default(),
                );
                self.errors.set(errors);
                return;
            }
        };

        let this = *self;
        this.is_submitting.set(true);
        spawn_local(async move {
            match model::create_project(&body).await {
                Ok(project) => {
                    log::info!("created {} {}", Project::element_name(), project.name());
                    notify.success(&format!("Project {} created", project.project_name));
                    ctx.projects_changed();
                    ctx.set_active_project(Some(project.meta.name.clone()));
                    this.wizard.set(ProjectWizard::new());
                    on_done.run(());
                }
                Err(e) => notify.error("Failed to create project", e),
            }
            this.is_submitting.set(false);
        });
    }
}
