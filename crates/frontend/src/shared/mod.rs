pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod frappe_client;
pub mod icons;
pub mod modal_frame;
pub mod modal_stack;
pub mod notify;
pub mod page_frame;
pub mod page_standard;
pub mod print_button;
