pub mod filter_bar;
pub mod header;
pub mod install_modal;
pub mod preset_table;
