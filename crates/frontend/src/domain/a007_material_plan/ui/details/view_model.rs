use super::super::model;
use crate::shared::date_utils::today;
use crate::shared::notify::NotifyService;
use contracts::domain::a007_material_plan::aggregate::MaterialDeliveryPlan;
use contracts::domain::a007_material_plan::form::{MaterialPlanEdit, QuantityCaps};
use contracts::domain::common::DocType;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// State of the material plan Edit dialog
#[derive(Clone, Copy)]
pub struct MaterialDetailsViewModel {
    pub edit: RwSignal<Option<MaterialPlanEdit>>,
    /// Ordered quantity per item id of the linked PO
    pub ordered: RwSignal<QuantityCaps>,
    pub errors: RwSignal<FieldErrors>,
    pub is_saving: RwSignal<bool>,
}

impl MaterialDetailsViewModel {
    pub fn new() -> Self {
        Self {
            edit: RwSignal::new(None),
            ordered: RwSignal::new(QuantityCaps::Unlinked),
            errors: RwSignal::new(FieldErrors::new()),
            is_saving: RwSignal::new(false),
        }
    }

    pub fn open(&self, plan: &MaterialDeliveryPlan, notify: NotifyService) {
        self.edit.set(Some(MaterialPlanEdit::from_plan(plan)));
        self.errors.set(FieldErrors::new());
        let Some(po_link) = plan.po_link.clone() else {
            self.ordered.set(QuantityCaps::Unlinked);
            return;
        };
        self.ordered.set(QuantityCaps::Loading);
        let this = *self;
        let plan_name = plan.meta.name.clone();
        spawn_local(async move {
            let result = model::fetch_po(&po_link).await;
            // another plan was opened meanwhile
            let current = this.edit.with_untracked(|e| e.as_ref().map(|e| e.name == plan_name));
            if current != Some(true) {
                return;
            }
            let ordered = this.ordered;
            match result {
                Ok(po) => {
                    ordered.set(QuantityCaps::Loaded(po.ordered_quantities()));
                }
                Err(e) => {
                    ordered.set(QuantityCaps::Failed);
                    notify.error("Failed to load the purchase order", e);
                }
            }
        });
    }

    /// Save waits for the ordered quantities of a PO-linked plan
    pub fn can_save(&self) -> bool {
        !self.is_saving.get() && self.ordered.with(|c| c.is_ready())
    }

    pub fn update(&self, f: impl FnOnce(&mut MaterialPlanEdit)) {
        self.edit.update(|e| {
            if let Some(edit) = e.as_mut() {
                f(edit);
            }
        });
        if !self.errors.with_untracked(|e| e.is_empty()) {
            self.errors.set(FieldErrors::new());
        }
    }

    /// `index` is the position in the plan's item list
    pub fn set_quantity(&self, index: usize, raw: &str) {
        let quantity = raw.trim().parse::<f64>().unwrap_or(0.0);
        self.update(|e| {
            e.set_quantity(index, quantity);
        });
    }

    pub fn save(&self, notify: NotifyService, on_saved: Callback<()>) {
        if self.is_saving.get_untracked() {
            return;
        }
        let Some(edit) = self.edit.get_untracked() else {
            return;
        };
        let body = match self.ordered.with_untracked(|caps| edit.to_update(today(), caps)) {
            Ok(body) => body,
            Err(errors) => return self.errors.set(errors),
        };

        let this = *self;
        this.is_saving.set(true);
        spawn_local(async move {
            match model::update_plan(&edit.name, &body).await {
                Ok(saved) => {
                    log::info!("updated {} {}", MaterialDeliveryPlan::element_name(), saved.name());
                    notify.success("Material plan updated");
                    on_saved.run(());
                }
                Err(e) => notify.error("Failed to update material plan", e),
            }
            this.is_saving.set(false);
        });
    }
}
