// Balance sheet aggregation: capital roll-forward, liability and asset
// totals, and the signed difference between the two sides.
//
// Pure: persistence of the result is the caller's concern. The net profit
// and closing stock figures belong to the paired P&L and must be fetched
// fresh by the caller (0 when the pairing is still pending).

use crate::models::{BalanceSheet, LineItem};

use super::depreciation;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BalanceSheetTotals {
    /// Opening capital + net profit + other incomes, before deductions.
    pub capital_first_total: f64,
    /// Household + other expense deductions from capital.
    pub capital_deductions: f64,
    pub closing_capital: f64,
    pub total_liabilities: f64,
    pub total_fixed_assets: f64,
    /// Sum of depreciating-asset closing balances.
    pub total_depreciating_assets: f64,
    pub current_assets: f64,
    pub total_assets: f64,
    /// `total_assets - total_liabilities`, reported signed. Zero only under
    /// consistent data entry; never silently reconciled.
    pub difference: f64,
    /// True when no paired P&L exists yet; net profit and closing stock
    /// were treated as 0 and renders should note the pending entry.
    pub pending_profit_loss: bool,
}

fn sum_items(items: &[LineItem]) -> f64 {
    items
        .iter()
        .filter(|i| i.is_countable())
        .map(|i| i.amount)
        .sum()
}

/// Aggregates one balance sheet against the paired P&L's `(net profit,
/// closing stock)`, or `None` while that entry is still pending. Empty
/// placeholder rows contribute nothing.
pub fn aggregate(sheet: &BalanceSheet, paired: Option<(f64, f64)>) -> BalanceSheetTotals {
    let (external_net_profit, external_closing_stock) = paired.unwrap_or((0.0, 0.0));
    let capital = &sheet.capital_account;
    let capital_first_total =
        capital.opening_capital + external_net_profit + sum_items(&capital.other_incomes);
    let capital_deductions = capital.household_expenses + sum_items(&capital.other_expenses);
    let closing_capital = capital_first_total - capital_deductions;

    let total_liabilities = closing_capital
        + sum_items(&sheet.sundry_creditors)
        + sum_items(&sheet.loans)
        + sum_items(&sheet.provisions);

    let total_fixed_assets = sum_items(&sheet.fixed_assets);
    let total_depreciating_assets = depreciation::total_closing_balance(&sheet.depreciating_assets);
    let current_assets = sum_items(&sheet.sundry_debtors)
        + sum_items(&sheet.cash_in_bank)
        + sum_items(&sheet.cash_in_hand)
        + sum_items(&sheet.loan_advances)
        + external_closing_stock;
    let total_assets = total_fixed_assets + total_depreciating_assets + current_assets;

    BalanceSheetTotals {
        capital_first_total,
        capital_deductions,
        closing_capital,
        total_liabilities,
        total_fixed_assets,
        total_depreciating_assets,
        current_assets,
        total_assets,
        difference: total_assets - total_liabilities,
        pending_profit_loss: paired.is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::depreciation::compute_asset;
    use crate::models::CapitalAccount;

    #[test]
    fn capital_rolls_forward_without_pl() {
        // opening 1,000,000, household 50,000, pending P&L treated as 0
        let sheet = BalanceSheet {
            capital_account: CapitalAccount {
                opening_capital: 1_000_000.0,
                household_expenses: 50_000.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let totals = aggregate(&sheet, None);
        assert_eq!(totals.capital_first_total, 1_000_000.0);
        assert_eq!(totals.closing_capital, 950_000.0);
        assert_eq!(totals.total_liabilities, 950_000.0);
    }

    #[test]
    fn placeholder_rows_do_not_leak_into_totals() {
        let sheet = BalanceSheet {
            sundry_creditors: vec![
                LineItem::new("", 0.0),
                LineItem::new("ACME SUPPLIES", 10_000.0),
            ],
            sundry_debtors: vec![LineItem::new("", 0.0)],
            ..Default::default()
        };
        let totals = aggregate(&sheet, None);
        assert_eq!(totals.total_liabilities, 10_000.0);
        assert_eq!(totals.current_assets, 0.0);
    }

    #[test]
    fn zero_amount_named_rows_still_count() {
        // a described row with amount 0 is real data, not a placeholder
        let sheet = BalanceSheet {
            loans: vec![LineItem::new("CAR LOAN", 0.0)],
            ..Default::default()
        };
        let totals = aggregate(&sheet, None);
        assert_eq!(totals.total_liabilities, 0.0);
    }

    #[test]
    fn missing_pair_is_flagged_pending() {
        let sheet = BalanceSheet::default();
        assert!(aggregate(&sheet, None).pending_profit_loss);
        assert!(!aggregate(&sheet, Some((0.0, 0.0))).pending_profit_loss);
    }

    #[test]
    fn difference_is_reported_signed() {
        let sheet = BalanceSheet {
            capital_account: CapitalAccount {
                opening_capital: 100.0,
                ..Default::default()
            },
            cash_in_hand: vec![LineItem::new("CASH", 70.0)],
            ..Default::default()
        };
        let totals = aggregate(&sheet, None);
        assert_eq!(totals.difference, -30.0);
    }

    #[test]
    fn assets_combine_all_sections() {
        let sheet = BalanceSheet {
            fixed_assets: vec![LineItem::new("LAND", 200_000.0)],
            depreciating_assets: vec![compute_asset("MACHINERY", 100_000.0, 0.0, 10.0)],
            sundry_debtors: vec![LineItem::new("DEBTOR A", 5_000.0)],
            cash_in_bank: vec![LineItem::new("SBI", 20_000.0)],
            cash_in_hand: vec![LineItem::new("CASH", 1_000.0)],
            loan_advances: vec![LineItem::new("STAFF ADVANCE", 4_000.0)],
            ..Default::default()
        };
        let totals = aggregate(&sheet, Some((0.0, 30_000.0)));
        assert_eq!(totals.total_fixed_assets, 200_000.0);
        assert_eq!(totals.total_depreciating_assets, 90_000.0);
        assert_eq!(totals.current_assets, 60_000.0);
        assert_eq!(totals.total_assets, 350_000.0);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let sheet = BalanceSheet {
            capital_account: CapitalAccount {
                opening_capital: 77_000.0,
                other_incomes: vec![LineItem::new("INTEREST", 3_000.0)],
                household_expenses: 12_000.0,
                ..Default::default()
            },
            loans: vec![LineItem::new("BANK LOAN", 40_000.0)],
            ..Default::default()
        };
        let first = aggregate(&sheet, Some((25_000.0, 9_000.0)));
        let second = aggregate(&sheet, Some((25_000.0, 9_000.0)));
        assert_eq!(first, second);
    }
}
