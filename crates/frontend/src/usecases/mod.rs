pub mod u501_plan_submission;
pub mod u502_from_material_plan;
