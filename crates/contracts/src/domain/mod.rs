pub mod a001_project;
pub mod a002_vendor;
pub mod a003_procurement_order;
pub mod a004_service_request;
pub mod a005_critical_po_task;
pub mod a006_cashflow_plan;
pub mod a007_material_plan;
pub mod common;
