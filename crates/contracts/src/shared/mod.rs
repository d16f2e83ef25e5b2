pub mod dates;
pub mod frappe;
pub mod print;
pub mod validation;
