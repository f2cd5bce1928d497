pub mod export_xlsx;
pub mod import_xlsx;
