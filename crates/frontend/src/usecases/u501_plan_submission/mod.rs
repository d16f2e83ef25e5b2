pub mod api;
mod cashflow_form;
pub mod frame;
mod material_form;
pub mod review;
mod selection;
mod view_model;

pub use cashflow_form::AddPoCashflowForm;
pub use material_form::AddMaterialPlanForm;
