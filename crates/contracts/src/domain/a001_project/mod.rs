pub mod aggregate;
pub mod wizard;
