// models.rs
// Domain models: client registry, balance sheet, profit & loss, and the
// fiscal-year token shared by every statement key.

use serde::{Deserialize, Serialize};

/// Client document stored in MongoDB. The `_id` is a slug derived from the
/// name at creation time and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub pan: String,
    #[serde(default)]
    pub gst: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
}

/// Generic description + amount row. Insertion order is display order and
/// descriptions are not unique. The entry forms keep a blank placeholder row
/// (`{description: "", amount: 0}`) around; those rows are stored as-is and
/// filtered out at aggregation time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, amount: f64) -> Self {
        LineItem {
            description: description.into(),
            amount,
        }
    }

    /// A row counts toward totals unless it is the blank placeholder.
    pub fn is_countable(&self) -> bool {
        !(self.description.trim().is_empty() && self.amount == 0.0)
    }
}

/// Fixed asset under depreciation (Schedule A row). `total`,
/// `depreciation_amount` and `closing_balance` are derived from the first
/// three fields and recomputed whenever any of them changes; they are never
/// independently settable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciatingAsset {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub opening_balance: f64,
    #[serde(default)]
    pub added_during_year: f64,
    #[serde(default)]
    pub depreciation_rate: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub depreciation_amount: f64,
    #[serde(default)]
    pub closing_balance: f64,
}

/// Equity roll-forward. `net_profit` is sourced from the paired P&L and is
/// read-only as far as this entity is concerned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalAccount {
    #[serde(default)]
    pub opening_capital: f64,
    #[serde(default)]
    pub net_profit: f64,
    #[serde(default)]
    pub other_incomes: Vec<LineItem>,
    #[serde(default)]
    pub household_expenses: f64,
    #[serde(default)]
    pub other_expenses: Vec<LineItem>,
}

/// Balance sheet for one `(client, fiscal year)` pair. The closing stock
/// shown under current assets belongs to the paired P&L's trading account
/// and is fetched fresh at aggregation/render time, never stored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    #[serde(default)]
    pub capital_account: CapitalAccount,
    #[serde(default)]
    pub fixed_assets: Vec<LineItem>,
    #[serde(default)]
    pub depreciating_assets: Vec<DepreciatingAsset>,
    #[serde(default)]
    pub sundry_debtors: Vec<LineItem>,
    #[serde(default)]
    pub cash_in_bank: Vec<LineItem>,
    #[serde(default)]
    pub cash_in_hand: Vec<LineItem>,
    #[serde(default)]
    pub loan_advances: Vec<LineItem>,
    #[serde(default)]
    pub sundry_creditors: Vec<LineItem>,
    #[serde(default)]
    pub loans: Vec<LineItem>,
    #[serde(default)]
    pub provisions: Vec<LineItem>,
}

/// Sales/stock/purchases sub-ledger producing the gross profit figure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingAccount {
    #[serde(default)]
    pub opening_stock: f64,
    #[serde(default)]
    pub purchases: f64,
    #[serde(default)]
    pub direct_expenses: f64,
    #[serde(default)]
    pub sales: f64,
    #[serde(default)]
    pub closing_stock: f64,
}

/// Named expense categories of the P&L. `depreciation` mirrors the sum of
/// the paired balance sheet's depreciation schedule and is corrected from it
/// on every save rather than entered independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLedger {
    #[serde(default)]
    pub wages: f64,
    #[serde(default)]
    pub rent: f64,
    #[serde(default)]
    pub utilities: f64,
    #[serde(default)]
    pub insurance: f64,
    #[serde(default)]
    pub office_expenses: f64,
    #[serde(default)]
    pub travel_expenses: f64,
    #[serde(default)]
    pub repair_maintenance: f64,
    #[serde(default)]
    pub legal_professional: f64,
    #[serde(default)]
    pub bank_charges: f64,
    #[serde(default)]
    pub misc_expenses: f64,
    #[serde(default)]
    pub depreciation: f64,
}

impl ExpenseLedger {
    /// Named categories with their display labels, in ledger order.
    /// Depreciation is excluded; it is injected separately so the P&L never
    /// computes it on its own.
    pub fn named(&self) -> [(&'static str, f64); 10] {
        [
            ("WAGES", self.wages),
            ("RENT", self.rent),
            ("UTILITIES", self.utilities),
            ("INSURANCE", self.insurance),
            ("OFFICE EXPENSES", self.office_expenses),
            ("TRAVEL EXPENSES", self.travel_expenses),
            ("REPAIR & MAINTENANCE", self.repair_maintenance),
            ("LEGAL & PROFESSIONAL", self.legal_professional),
            ("BANK CHARGES", self.bank_charges),
            ("MISCELLANEOUS EXPENSES", self.misc_expenses),
        ]
    }
}

/// Profit & loss statement for one `(client, fiscal year)` pair.
///
/// `net_profit` keeps its sign when stored: a true loss is distinguishable
/// from break-even. Clamping to zero happens only in the rendered documents,
/// where the shortfall is printed as a NET LOSS line on the income side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLoss {
    #[serde(default)]
    pub trading_account: TradingAccount,
    #[serde(default)]
    pub expenses: ExpenseLedger,
    #[serde(default)]
    pub custom_expenses: Vec<LineItem>,
    #[serde(default)]
    pub other_income: f64,
    #[serde(default)]
    pub gross_profit: f64,
    #[serde(default)]
    pub net_profit: f64,
}

/// Accounting year token of the form `"2023-2024"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalYear {
    start: i32,
}

impl FiscalYear {
    /// Parses and validates a `"YYYY-YYYY+1"` token.
    pub fn parse(token: &str) -> Option<FiscalYear> {
        let (start, end) = token.split_once('-')?;
        if start.len() != 4 || end.len() != 4 {
            return None;
        }
        let start: i32 = start.parse().ok()?;
        let end: i32 = end.parse().ok()?;
        if end != start + 1 {
            return None;
        }
        Some(FiscalYear { start })
    }

    pub fn previous(&self) -> FiscalYear {
        FiscalYear {
            start: self.start - 1,
        }
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.start + 1)
    }
}
