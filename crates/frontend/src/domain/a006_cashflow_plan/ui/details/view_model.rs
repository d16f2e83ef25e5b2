use super::super::model;
use crate::domain::a002_vendor::ui::model::fetch_vendors;
use crate::domain::a003_procurement_order::ui::model::fetch_project_pos;
use crate::domain::a004_service_request::ui::model::fetch_approved_work_orders;
use crate::shared::date_utils::today;
use crate::shared::notify::NotifyService;
use contracts::domain::a002_vendor::aggregate::vendor_lookup;
use contracts::domain::a003_procurement_order::aggregate::ProcurementOrder;
use contracts::domain::a004_service_request::aggregate::ServiceRequest;
use contracts::domain::a006_cashflow_plan::aggregate::{CashflowPlan, CashflowType};
use contracts::domain::a006_cashflow_plan::form::CashflowPlanForm;
use contracts::domain::common::DocType;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;

/// PO or WO a new plan can link to
#[derive(Debug, Clone, PartialEq)]
pub struct LinkOption {
    pub id: String,
    pub label: String,
}

/// State of the Add/Edit cashflow dialog
#[derive(Clone, Copy)]
pub struct CashflowDetailsViewModel {
    pub form: RwSignal<CashflowPlanForm>,
    /// Plan being edited; `None` while adding
    pub original: RwSignal<Option<CashflowPlan>>,
    pub errors: RwSignal<FieldErrors>,
    pub pos: RwSignal<Vec<ProcurementOrder>>,
    pub work_orders: RwSignal<Vec<ServiceRequest>>,
    pub vendors: RwSignal<HashMap<String, String>>,
    pub is_saving: RwSignal<bool>,
}

impl CashflowDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(CashflowPlanForm::new(CashflowType::Po)),
            original: RwSignal::new(None),
            errors: RwSignal::new(FieldErrors::new()),
            pos: RwSignal::new(Vec::new()),
            work_orders: RwSignal::new(Vec::new()),
            vendors: RwSignal::new(HashMap::new()),
            is_saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.original.with(|o| o.is_some())
    }

    pub fn open_new(&self, plan_type: CashflowType, project: String, notify: NotifyService) {
        self.form.set(CashflowPlanForm::new(plan_type));
        self.original.set(None);
        self.errors.set(FieldErrors::new());
        if plan_type.requires_link() {
            self.load_links(plan_type, project, notify);
        }
    }

    pub fn open_edit(&self, plan: CashflowPlan, notify: NotifyService) {
        self.form.set(CashflowPlanForm::from_plan(&plan));
        self.original.set(Some(plan));
        self.errors.set(FieldErrors::new());
        self.load_vendors(notify);
    }

    fn load_links(&self, plan_type: CashflowType, project: String, notify: NotifyService) {
        let pos = self.pos;
        let work_orders = self.work_orders;
        spawn_local(async move {
            match plan_type {
                CashflowType::Po => match fetch_project_pos(&project).await {
                    Ok(list) => pos.set(list.into_iter().filter(|p| p.is_plannable()).collect()),
                    Err(e) => notify.error("Failed to load purchase orders", e),
                },
                CashflowType::Wo => match fetch_approved_work_orders(&project).await {
                    Ok(list) => work_orders.set(list),
                    Err(e) => notify.error("Failed to load work orders", e),
                },
                _ => {}
            }
        });
        self.load_vendors(notify);
    }

    fn load_vendors(&self, notify: NotifyService) {
        if !self.vendors.with_untracked(|v| v.is_empty()) {
            return;
        }
        let vendors = self.vendors;
        spawn_local(async move {
            match fetch_vendors().await {
                Ok(list) => vendors.set(vendor_lookup(&list)),
                Err(e) => notify.error("Failed to load vendors", e),
            }
        });
    }

    /// Options for the link select of the current plan type
    pub fn link_options(&self) -> Vec<LinkOption> {
        match self.form.with(|f| f.plan_type) {
            CashflowType::Po => self.pos.with(|list| {
                list.iter()
                    .map(|po| LinkOption {
                        id: po.meta.name.clone(),
                        label: format!("{} · {}", po.meta.name, po.vendor_name),
                    })
                    .collect()
            }),
            CashflowType::Wo => {
                let vendors = self.vendors.get();
                self.work_orders.with(|list| {
                    list.iter()
                        .map(|wo| LinkOption {
                            id: wo.meta.name.clone(),
                            label: format!(
                                "{} · {}",
                                wo.meta.name,
                                vendors
                                    .get(&wo.vendor)
                                    .cloned()
                                    .unwrap_or_else(|| wo.vendor.clone())
                            ),
                        })
                        .collect()
                })
            }
            _ => Vec::new(),
        }
    }

    pub fn select_link(&self, id: String) {
        let plan_type = self.form.with_untracked(|f| f.plan_type);
        if id.is_empty() {
            self.form.update(|f| f.clear_link());
            return;
        }
        match plan_type {
            CashflowType::Po => {
                let po = self.pos.with_untracked(|l| l.iter().find(|p| p.meta.name == id).cloned());
                if let Some(po) = po {
                    self.form.update(|f| f.link_po(&po));
                }
            }
            CashflowType::Wo => {
                let wo = self
                    .work_orders
                    .with_untracked(|l| l.iter().find(|w| w.meta.name == id).cloned());
                if let Some(wo) = wo {
                    self.form.update(|f| f.link_wo(&wo));
                }
            }
            _ => {}
        }
        self.clear_error("id_link");
    }

    pub fn vendor_label(&self) -> String {
        let vendor = self.form.with(|f| f.vendor.clone());
        if vendor.is_empty() {
            return String::new();
        }
        let po_vendor = self.pos.with(|l| {
            l.iter()
                .find(|p| p.vendor == vendor && !p.vendor_name.is_empty())
                .map(|p| p.vendor_name.clone())
        });
        po_vendor
            .or_else(|| self.vendors.with(|v| v.get(&vendor).cloned()))
            .or_else(|| self.original.with(|o| o.as_ref().and_then(|p| p.vendor_name.clone())))
            .unwrap_or(vendor)
    }

    pub fn edit(&self, field: &'static str, f: impl FnOnce(&mut CashflowPlanForm)) {
        self.form.update(f);
        self.clear_error(field);
    }

    fn clear_error(&self, field: &str) {
        if self.errors.with_untracked(|e| e.has(field)) {
            self.errors.update(|e| e.clear_field(field));
        }
    }

    pub fn error_for(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.get(field).map(|err| err.to_string())))
    }

    /// Creates or updates the plan. `on_saved` runs only on success.
    pub fn save(&self, project: String, notify: NotifyService, on_saved: Callback<()>) {
        if self.is_saving.get_untracked() {
            return;
        }
        let form = self.form.get_untracked();
        let original = self.original.get_untracked();
        let today = today();

        let this = *self;
        match original {
            Some(plan) => {
                let body = match form.to_update(today, &plan.planned_date) {
                    Ok(body) => body,
                    Err(errors) => return self.errors.set(errors),
                };
                this.is_saving.set(true);
                spawn_local(async move {
                    match model::update_plan(&plan.meta.name, &body).await {
                        Ok(saved) => {
                            log::info!("updated {} {}", CashflowPlan::element_name(), saved.name());
                            notify.success("Cashflow plan updated");
                            on_saved.run(());
                        }
                        Err(e) => notify.error("Failed to update cashflow plan", e),
                    }
                    this.is_saving.set(false);
                });
            }
            None => {
                let body = match form.to_create(&project, today) {
                    Ok(body) => body,
                    Err(errors) => return self.errors.set(errors),
                };
                this.is_saving.set(true);
                spawn_local(async move {
                    match model::create_plan(&body).await {
                        Ok(saved) => {
                            log::info!("created {} {}", CashflowPlan::element_name(), saved.name());
                            notify.success("Cashflow plan added");
                            on_saved.run(());
                        }
                        Err(e) => notify.error("Failed to add cashflow plan", e),
                    }
                    this.is_saving.set(false);
                });
            }
        }
    }
}
