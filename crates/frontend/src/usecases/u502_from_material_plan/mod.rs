mod view;

pub use view::FromMaterialPlanDialog;
