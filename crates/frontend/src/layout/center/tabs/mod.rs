pub mod tab;
pub mod tabs;

pub use tabs::TabStrip;
