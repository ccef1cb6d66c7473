// finance module: the pure computation core. No storage, no I/O; the state
// layer feeds these functions and persists what they return.

pub mod balance_sheet;
pub mod currency;
pub mod depreciation;
pub mod profit_loss;

pub use balance_sheet::BalanceSheetTotals;
pub use profit_loss::ProfitLossTotals;
