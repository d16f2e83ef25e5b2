use crate::domain::a003_procurement_order::ui::model::fetch_project_pos;
use crate::domain::a005_critical_po_task::ui::model::fetch_project_tasks;
use crate::shared::notify::NotifyService;
use contracts::domain::a003_procurement_order::aggregate::ProcurementOrder;
use contracts::domain::a005_critical_po_task::aggregate::{
    categories, find_task, tasks_in_category, CriticalPoTask,
};
use contracts::usecases::u501_plan_submission::{candidate_pos, PlanSelection};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Lookups and selection shared by the add-plan dialogs
#[derive(Clone, Copy)]
pub struct PlanFlowViewModel {
    pub selection: RwSignal<PlanSelection>,
    pub tasks: RwSignal<Vec<CriticalPoTask>>,
    pub pos: RwSignal<Vec<ProcurementOrder>>,
    pub is_loading: RwSignal<bool>,
}

impl PlanFlowViewModel {
    pub fn new() -> Self {
        Self {
            selection: RwSignal::new(PlanSelection::new()),
            tasks: RwSignal::new(Vec::new()),
            pos: RwSignal::new(Vec::new()),
            is_loading: RwSignal::new(false),
        }
    }

    pub fn load(&self, project: String, notify: NotifyService) {
        let this = *self;
        this.is_loading.set(true);
        spawn_local(async move {
            match fetch_project_tasks(&project).await {
                Ok(tasks) => this.tasks.set(tasks),
                Err(e) => notify.error("Failed to load critical PO tasks", e),
            }
            match fetch_project_pos(&project).await {
                Ok(pos) => {
                    log::debug!("{} open POs for {}", pos.len(), project);
                    this.pos.set(pos);
                }
                Err(e) => notify.error("Failed to load purchase orders", e),
            }
            this.is_loading.set(false);
        });
    }

    pub fn categories(&self) -> Vec<String> {
        self.tasks.with(|t| categories(t))
    }

    /// `(task id, label)` within the selected category
    pub fn task_options(&self) -> Vec<(String, String)> {
        let category = self.selection.with(|s| s.category.clone());
        let Some(category) = category else {
            return Vec::new();
        };
        self.tasks.with(|t| {
            tasks_in_category(t, &category)
                .into_iter()
                .map(|task| (task.meta.name.clone(), task.display_label()))
                .collect()
        })
    }

    pub fn candidates(&self) -> Vec<ProcurementOrder> {
        let (task, search) = self.selection.with(|s| (s.task.clone(), s.search.clone()));
        self.tasks.with(|tasks| {
            let task = task.as_deref().and_then(|name| find_task(tasks, name));
            self.pos.with(|pos| {
                candidate_pos(task, pos, &search)
                    .into_iter()
                    .cloned()
                    .collect()
            })
        })
    }

    pub fn find_po(&self, po_id: &str) -> Option<ProcurementOrder> {
        self.pos
            .with_untracked(|pos| pos.iter().find(|p| p.meta.name == po_id).cloned())
    }
}
