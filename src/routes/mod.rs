// routes/mod.rs
// Public re-exports of all route handlers.

pub mod clients;
pub mod reports;
pub mod statements;

pub use clients::{clients_create, clients_delete, clients_index, clients_show, clients_update, reset};
pub use reports::{excel_export, pdf_export};
pub use statements::{
    balance_sheet_save, balance_sheet_show, client_years, client_years_check,
    client_years_history, previous_balance_sheet, previous_trading_pl, profit_loss_save,
    profit_loss_show,
};
