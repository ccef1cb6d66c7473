// Statement store: balance sheets and P&L records keyed by the composite
// `(clientId, fiscalYear)` pair, plus the write-triggers-propagation rule
// that keeps the two statement types of a pair consistent.
//
// Array fields cross the storage boundary as JSON-encoded text (the legacy
// wire shape); reads tolerate both encoded text and already-structured
// arrays, and the rest of the crate only ever sees the structured models.

use anyhow::Result;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, DateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::SystemTime;

use crate::finance::{depreciation, profit_loss};
use crate::models::{
    BalanceSheet, CapitalAccount, DepreciatingAsset, ExpenseLedger, LineItem, ProfitAndLoss,
    TradingAccount,
};

use super::AppState;

/// A list field that may arrive either as a JSON-encoded string or as a
/// structured array. Writes always produce the encoded form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncodedItems<T> {
    Structured(Vec<T>),
    Encoded(String),
}

impl<T> Default for EncodedItems<T> {
    fn default() -> Self {
        EncodedItems::Encoded("[]".to_string())
    }
}

impl<T: Serialize> EncodedItems<T> {
    pub fn encode(items: &[T]) -> Self {
        EncodedItems::Encoded(serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string()))
    }
}

impl<T: DeserializeOwned + Clone> EncodedItems<T> {
    pub fn decode(&self) -> Vec<T> {
        match self {
            EncodedItems::Structured(items) => items.clone(),
            EncodedItems::Encoded(text) => serde_json::from_str(text).unwrap_or_else(|err| {
                log::warn!("dropping undecodable line-item field: {err}");
                Vec::new()
            }),
        }
    }
}

/// Balance sheet document as stored: flat numeric fields, encoded arrays,
/// and cached section totals for quick access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub client_id: String,
    pub year: String,
    #[serde(default)]
    pub last_updated: Option<DateTime>,
    #[serde(default)]
    pub opening_capital: f64,
    #[serde(default)]
    pub household_expenses: f64,
    #[serde(default)]
    pub other_incomes: EncodedItems<LineItem>,
    #[serde(default)]
    pub other_expenses: EncodedItems<LineItem>,
    #[serde(default)]
    pub fixed_assets: EncodedItems<LineItem>,
    #[serde(default)]
    pub depreciating_assets: EncodedItems<DepreciatingAsset>,
    #[serde(default)]
    pub sundry_debtors: EncodedItems<LineItem>,
    #[serde(default)]
    pub cash_in_bank: EncodedItems<LineItem>,
    #[serde(default)]
    pub cash_in_hand: EncodedItems<LineItem>,
    #[serde(default)]
    pub loan_advances: EncodedItems<LineItem>,
    #[serde(default)]
    pub sundry_creditors: EncodedItems<LineItem>,
    #[serde(default)]
    pub loans: EncodedItems<LineItem>,
    #[serde(default)]
    pub provisions: EncodedItems<LineItem>,
    #[serde(default)]
    pub total_fixed_assets: f64,
    #[serde(default)]
    pub total_depreciating_assets: f64,
    #[serde(default)]
    pub total_depreciation: f64,
}

/// P&L document as stored: the trading account and expense ledger flattened
/// into scalar fields, custom expenses encoded. `netProfit` is stored
/// signed; display-side clamping happens at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub client_id: String,
    pub year: String,
    #[serde(default)]
    pub last_updated: Option<DateTime>,
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
    #[serde(default)]
    pub custom_expenses: EncodedItems<LineItem>,
    #[serde(default)]
    pub other_income: f64,
    #[serde(default)]
    pub gross_profit: f64,
    #[serde(default)]
    pub net_profit: f64,
    #[serde(default)]
    pub total_expenses: f64,
}

pub fn balance_sheet_doc_id(client_id: &str, year: &str) -> String {
    format!("{client_id}_{year}_balance_sheet")
}

pub fn profit_loss_doc_id(client_id: &str, year: &str) -> String {
    format!("{client_id}_{year}_profit_loss")
}

fn now() -> DateTime {
    DateTime::from_system_time(SystemTime::now())
}

impl BalanceSheetDoc {
    fn from_model(client_id: &str, year: &str, sheet: &BalanceSheet) -> Self {
        BalanceSheetDoc {
            id: balance_sheet_doc_id(client_id, year),
            client_id: client_id.to_string(),
            year: year.to_string(),
            last_updated: Some(now()),
            opening_capital: sheet.capital_account.opening_capital,
            household_expenses: sheet.capital_account.household_expenses,
            other_incomes: EncodedItems::encode(&sheet.capital_account.other_incomes),
            other_expenses: EncodedItems::encode(&sheet.capital_account.other_expenses),
            fixed_assets: EncodedItems::encode(&sheet.fixed_assets),
            depreciating_assets: EncodedItems::encode(&sheet.depreciating_assets),
            sundry_debtors: EncodedItems::encode(&sheet.sundry_debtors),
            cash_in_bank: EncodedItems::encode(&sheet.cash_in_bank),
            cash_in_hand: EncodedItems::encode(&sheet.cash_in_hand),
            loan_advances: EncodedItems::encode(&sheet.loan_advances),
            sundry_creditors: EncodedItems::encode(&sheet.sundry_creditors),
            loans: EncodedItems::encode(&sheet.loans),
            provisions: EncodedItems::encode(&sheet.provisions),
            total_fixed_assets: sheet
                .fixed_assets
                .iter()
                .filter(|i| i.is_countable())
                .map(|i| i.amount)
                .sum(),
            total_depreciating_assets: depreciation::total_closing_balance(
                &sheet.depreciating_assets,
            ),
            total_depreciation: depreciation::total_depreciation(&sheet.depreciating_assets),
        }
    }

    pub fn to_model(&self) -> BalanceSheet {
        let mut depreciating_assets: Vec<DepreciatingAsset> = self.depreciating_assets.decode();
        // derived fields are recomputed on read; stored copies may be stale
        depreciation::recompute_all(&mut depreciating_assets);
        BalanceSheet {
            capital_account: CapitalAccount {
                opening_capital: self.opening_capital,
                net_profit: 0.0, // always sourced fresh from the paired P&L
                other_incomes: self.other_incomes.decode(),
                household_expenses: self.household_expenses,
                other_expenses: self.other_expenses.decode(),
            },
            fixed_assets: self.fixed_assets.decode(),
            depreciating_assets,
            sundry_debtors: self.sundry_debtors.decode(),
            cash_in_bank: self.cash_in_bank.decode(),
            cash_in_hand: self.cash_in_hand.decode(),
            loan_advances: self.loan_advances.decode(),
            sundry_creditors: self.sundry_creditors.decode(),
            loans: self.loans.decode(),
            provisions: self.provisions.decode(),
        }
    }
}

impl ProfitLossDoc {
    fn from_model(client_id: &str, year: &str, statement: &ProfitAndLoss) -> Self {
        ProfitLossDoc {
            id: profit_loss_doc_id(client_id, year),
            client_id: client_id.to_string(),
            year: year.to_string(),
            last_updated: Some(now()),
            opening_stock: statement.trading_account.opening_stock,
            purchases: statement.trading_account.purchases,
            direct_expenses: statement.trading_account.direct_expenses,
            sales: statement.trading_account.sales,
            closing_stock: statement.trading_account.closing_stock,
            wages: statement.expenses.wages,
            rent: statement.expenses.rent,
            utilities: statement.expenses.utilities,
            insurance: statement.expenses.insurance,
            office_expenses: statement.expenses.office_expenses,
            travel_expenses: statement.expenses.travel_expenses,
            repair_maintenance: statement.expenses.repair_maintenance,
            legal_professional: statement.expenses.legal_professional,
            bank_charges: statement.expenses.bank_charges,
            misc_expenses: statement.expenses.misc_expenses,
            depreciation: statement.expenses.depreciation,
            custom_expenses: EncodedItems::encode(&statement.custom_expenses),
            other_income: statement.other_income,
            gross_profit: statement.gross_profit,
            net_profit: statement.net_profit,
            total_expenses: 0.0, // filled in by the save path from the aggregator
        }
    }

    pub fn to_model(&self) -> ProfitAndLoss {
        ProfitAndLoss {
            trading_account: TradingAccount {
                opening_stock: self.opening_stock,
                purchases: self.purchases,
                direct_expenses: self.direct_expenses,
                sales: self.sales,
                closing_stock: self.closing_stock,
            },
            expenses: ExpenseLedger {
                wages: self.wages,
                rent: self.rent,
                utilities: self.utilities,
                insurance: self.insurance,
                office_expenses: self.office_expenses,
                travel_expenses: self.travel_expenses,
                repair_maintenance: self.repair_maintenance,
                legal_professional: self.legal_professional,
                bank_charges: self.bank_charges,
                misc_expenses: self.misc_expenses,
                depreciation: self.depreciation,
            },
            custom_expenses: self.custom_expenses.decode(),
            other_income: self.other_income,
            gross_profit: self.gross_profit,
            net_profit: self.net_profit,
        }
    }
}

pub async fn get_balance_sheet(
    state: &AppState,
    client_id: &str,
    year: &str,
) -> Result<Option<BalanceSheet>> {
    let doc = state
        .balance_sheets
        .find_one(doc! { "_id": balance_sheet_doc_id(client_id, year) })
        .await?;
    Ok(doc.map(|d| d.to_model()))
}

pub async fn get_profit_loss(
    state: &AppState,
    client_id: &str,
    year: &str,
) -> Result<Option<ProfitAndLoss>> {
    let doc = state
        .profit_loss
        .find_one(doc! { "_id": profit_loss_doc_id(client_id, year) })
        .await?;
    Ok(doc.map(|d| d.to_model()))
}

/// Saves a balance sheet, recomputing the depreciation schedule first, then
/// propagates the schedule total into the paired P&L if one exists. A
/// missing pair is skipped silently; the pair will pull the authoritative
/// figure when it is first saved.
pub async fn save_balance_sheet(
    state: &AppState,
    client_id: &str,
    year: &str,
    sheet: &BalanceSheet,
) -> Result<BalanceSheet> {
    let mut sheet = sheet.clone();
    depreciation::recompute_all(&mut sheet.depreciating_assets);

    let doc = BalanceSheetDoc::from_model(client_id, year, &sheet);
    let depreciation_total = doc.total_depreciation;
    state
        .balance_sheets
        .replace_one(doc! { "_id": &doc.id }, doc)
        .upsert(true)
        .await?;

    propagate_depreciation_to_pl(state, client_id, year, depreciation_total).await?;
    Ok(sheet)
}

/// Saves a P&L. The depreciation figure is corrected from the paired
/// balance sheet's schedule when one exists (logged, non-fatal), and the
/// derived gross/net figures are recomputed before persisting.
pub async fn save_profit_loss(
    state: &AppState,
    client_id: &str,
    year: &str,
    statement: &ProfitAndLoss,
) -> Result<ProfitAndLoss> {
    let mut statement = statement.clone();

    match get_balance_sheet(state, client_id, year).await? {
        Some(sheet) => {
            let schedule_total = depreciation::total_depreciation(&sheet.depreciating_assets);
            if (schedule_total - statement.expenses.depreciation).abs() > f64::EPSILON {
                log::warn!(
                    "consistency: depreciation for {client_id}/{year} corrected from {} to {}",
                    statement.expenses.depreciation,
                    schedule_total
                );
                statement.expenses.depreciation = schedule_total;
            }
        }
        None => {
            log::debug!("no balance sheet for {client_id}/{year}; keeping submitted depreciation");
        }
    }

    let totals = profit_loss::aggregate(&statement, statement.expenses.depreciation);
    statement.gross_profit = totals.gross_result;
    statement.net_profit = totals.net_result;

    let mut doc = ProfitLossDoc::from_model(client_id, year, &statement);
    doc.total_expenses = totals.total_expenses;
    state
        .profit_loss
        .replace_one(doc! { "_id": &doc.id }, doc)
        .upsert(true)
        .await?;

    Ok(statement)
}

/// The balance-sheet half of the propagation rule: after a schedule
/// change, rewrite the paired P&L's depreciation expense and its dependent
/// derived figures.
async fn propagate_depreciation_to_pl(
    state: &AppState,
    client_id: &str,
    year: &str,
    depreciation_total: f64,
) -> Result<()> {
    let Some(existing) = state
        .profit_loss
        .find_one(doc! { "_id": profit_loss_doc_id(client_id, year) })
        .await?
    else {
        log::debug!("no profit & loss for {client_id}/{year}; skipping depreciation propagation");
        return Ok(());
    };

    if (existing.depreciation - depreciation_total).abs() <= f64::EPSILON {
        return Ok(());
    }

    log::warn!(
        "consistency: propagating depreciation {} -> {} into P&L {client_id}/{year}",
        existing.depreciation,
        depreciation_total
    );

    let mut statement = existing.to_model();
    statement.expenses.depreciation = depreciation_total;
    let totals = profit_loss::aggregate(&statement, depreciation_total);
    statement.gross_profit = totals.gross_result;
    statement.net_profit = totals.net_result;

    let mut doc = ProfitLossDoc::from_model(client_id, year, &statement);
    doc.total_expenses = totals.total_expenses;
    state
        .profit_loss
        .replace_one(doc! { "_id": &doc.id }, doc)
        .await?;
    Ok(())
}

/// Fiscal years for which the client has any statement, newest first.
pub async fn list_statement_years(state: &AppState, client_id: &str) -> Result<Vec<String>> {
    let mut years = BTreeSet::new();

    let mut cursor = state
        .balance_sheets
        .find(doc! { "clientId": client_id })
        .await?;
    while let Some(doc) = cursor.try_next().await? {
        years.insert(doc.year);
    }

    let mut cursor = state
        .profit_loss
        .find(doc! { "clientId": client_id })
        .await?;
    while let Some(doc) = cursor.try_next().await? {
        years.insert(doc.year);
    }

    Ok(years.into_iter().rev().collect())
}

/// One year of statement activity for the history pane: which statements
/// exist and when each was last saved (RFC 3339).
#[derive(Debug, Clone, Serialize)]
pub struct YearActivity {
    pub year: String,
    pub balance_sheet: bool,
    pub profit_loss: bool,
    pub balance_sheet_updated: Option<String>,
    pub profit_loss_updated: Option<String>,
}

impl YearActivity {
    fn empty(year: &str) -> Self {
        YearActivity {
            year: year.to_string(),
            balance_sheet: false,
            profit_loss: false,
            balance_sheet_updated: None,
            profit_loss_updated: None,
        }
    }
}

fn rfc3339(stamp: Option<DateTime>) -> Option<String> {
    stamp.and_then(|s| s.try_to_rfc3339_string().ok())
}

/// The most recent `limit` years with any statement for the client, newest
/// first, with per-statement existence flags and last-updated stamps.
pub async fn statement_history(
    state: &AppState,
    client_id: &str,
    limit: usize,
) -> Result<Vec<YearActivity>> {
    let mut by_year: BTreeMap<String, YearActivity> = BTreeMap::new();

    let mut cursor = state
        .balance_sheets
        .find(doc! { "clientId": client_id })
        .await?;
    while let Some(doc) = cursor.try_next().await? {
        let entry = by_year
            .entry(doc.year.clone())
            .or_insert_with(|| YearActivity::empty(&doc.year));
        entry.balance_sheet = true;
        entry.balance_sheet_updated = rfc3339(doc.last_updated);
    }

    let mut cursor = state
        .profit_loss
        .find(doc! { "clientId": client_id })
        .await?;
    while let Some(doc) = cursor.try_next().await? {
        let entry = by_year
            .entry(doc.year.clone())
            .or_insert_with(|| YearActivity::empty(&doc.year));
        entry.profit_loss = true;
        entry.profit_loss_updated = rfc3339(doc.last_updated);
    }

    Ok(by_year.into_values().rev().take(limit).collect())
}

/// Existence flags for the `(client, year)` pair: `(balance_sheet, profit_loss)`.
pub async fn statements_exist(
    state: &AppState,
    client_id: &str,
    year: &str,
) -> Result<(bool, bool)> {
    let balance_sheet = state
        .balance_sheets
        .find_one(doc! { "_id": balance_sheet_doc_id(client_id, year) })
        .await?
        .is_some();
    let profit_loss = state
        .profit_loss
        .find_one(doc! { "_id": profit_loss_doc_id(client_id, year) })
        .await?
        .is_some();
    Ok((balance_sheet, profit_loss))
}
