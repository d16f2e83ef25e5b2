mod view;
mod view_model;

pub use view::CashflowPlanDialog;
pub use view_model::CashflowDetailsViewModel;
