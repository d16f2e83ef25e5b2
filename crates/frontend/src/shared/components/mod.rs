pub mod date_input;
pub mod filter_panel;
pub mod table;
pub mod table_checkbox;
pub mod table_totals_row;
