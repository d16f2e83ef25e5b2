pub mod details;
pub mod list;
pub mod model;
mod page;

pub use page::CashflowPage;
