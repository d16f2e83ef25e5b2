mod view;
mod view_model;

pub use view::MaterialPlanDialog;
pub use view_model::MaterialDetailsViewModel;
