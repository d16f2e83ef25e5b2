pub mod model;
pub mod wizard;
