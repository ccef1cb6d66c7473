// Trading and P&L aggregation.
//
// Gross and net results are kept signed; the clamped display figures and the
// loss lines injected on the opposite side of the ledger are derived here so
// that both rendered sides always balance. The depreciation figure is
// injected by the caller from the depreciation schedule; this aggregator
// never computes it.

use crate::models::ProfitAndLoss;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfitLossTotals {
    /// (sales + closing stock) - (opening stock + purchases + direct
    /// expenses), signed.
    pub gross_result: f64,
    /// Gross profit carried down, floored at zero for display.
    pub gross_profit: f64,
    /// Debit side of the trading account after carrying down the profit.
    pub trading_debit_total: f64,
    /// Credit side of the trading account after injecting any gross loss.
    pub trading_credit_total: f64,
    /// Named categories + countable custom expenses + injected depreciation.
    pub total_expenses: f64,
    /// (gross profit + other income) - total expenses, signed.
    pub net_result: f64,
    /// Net profit floored at zero for display.
    pub net_profit: f64,
    /// Expense side of the P&L after the net-profit line.
    pub expense_side_total: f64,
    /// Income side of the P&L after any net-loss line.
    pub income_side_total: f64,
}

/// Aggregates one P&L statement with the depreciation total computed from
/// the paired balance sheet's schedule for the same fiscal year.
pub fn aggregate(statement: &ProfitAndLoss, depreciation_total: f64) -> ProfitLossTotals {
    let trading = &statement.trading_account;
    let trading_debit_subtotal = trading.opening_stock + trading.purchases + trading.direct_expenses;
    let trading_credit_subtotal = trading.sales + trading.closing_stock;
    let gross_result = trading_credit_subtotal - trading_debit_subtotal;
    let gross_profit = gross_result.max(0.0);
    let gross_loss = (-gross_result).max(0.0);

    let named_expenses: f64 = statement.expenses.named().iter().map(|(_, v)| v).sum();
    let custom_expenses: f64 = statement
        .custom_expenses
        .iter()
        .filter(|e| !e.description.trim().is_empty())
        .map(|e| e.amount)
        .sum();
    let total_expenses = named_expenses + custom_expenses + depreciation_total;

    let net_result = (gross_profit + statement.other_income) - total_expenses;
    let net_profit = net_result.max(0.0);
    let net_loss = (-net_result).max(0.0);

    ProfitLossTotals {
        gross_result,
        gross_profit,
        trading_debit_total: trading_debit_subtotal + gross_profit,
        trading_credit_total: trading_credit_subtotal + gross_loss,
        total_expenses,
        net_result,
        net_profit,
        expense_side_total: total_expenses + net_profit,
        income_side_total: gross_profit + statement.other_income + net_loss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, TradingAccount};

    fn trading(sales: f64, closing: f64, opening: f64, purchases: f64, direct: f64) -> ProfitAndLoss {
        ProfitAndLoss {
            trading_account: TradingAccount {
                sales,
                closing_stock: closing,
                opening_stock: opening,
                purchases,
                direct_expenses: direct,
            },
            ..Default::default()
        }
    }

    #[test]
    fn gross_profit_scenario() {
        let pl = trading(2_500_000.0, 300_000.0, 200_000.0, 1_500_000.0, 100_000.0);
        let totals = aggregate(&pl, 0.0);
        assert_eq!(totals.gross_profit, 1_000_000.0);
        assert_eq!(totals.trading_debit_total, totals.trading_credit_total);
    }

    #[test]
    fn gross_loss_balances_trading_sides() {
        let pl = trading(100.0, 0.0, 50.0, 200.0, 0.0);
        let totals = aggregate(&pl, 0.0);
        assert_eq!(totals.gross_result, -150.0);
        assert_eq!(totals.gross_profit, 0.0);
        assert_eq!(totals.trading_debit_total, 250.0);
        assert_eq!(totals.trading_credit_total, 250.0);
    }

    #[test]
    fn net_result_keeps_its_sign_and_ledger_balances() {
        let mut pl = trading(1_000.0, 0.0, 0.0, 0.0, 0.0);
        pl.expenses.rent = 1_500.0;
        let totals = aggregate(&pl, 0.0);
        assert_eq!(totals.net_result, -500.0);
        assert_eq!(totals.net_profit, 0.0);
        // the NET LOSS line lands on the income side and both sides balance
        assert_eq!(totals.expense_side_total, totals.income_side_total);
        assert_eq!(totals.income_side_total, 1_500.0);
    }

    #[test]
    fn depreciation_is_injected_not_computed() {
        let mut pl = trading(10_000.0, 0.0, 0.0, 0.0, 0.0);
        pl.expenses.depreciation = 999.0; // stale entry field must be ignored
        let totals = aggregate(&pl, 2_500.0);
        assert_eq!(totals.total_expenses, 2_500.0);
        assert_eq!(totals.net_result, 7_500.0);
    }

    #[test]
    fn custom_expenses_need_a_description() {
        let mut pl = trading(5_000.0, 0.0, 0.0, 0.0, 0.0);
        pl.custom_expenses = vec![
            LineItem::new("GENERATOR FUEL", 700.0),
            LineItem::new("", 300.0), // no description: not countable
            LineItem::new("PRINTING", 0.0),
        ];
        let totals = aggregate(&pl, 0.0);
        assert_eq!(totals.total_expenses, 700.0);
    }

    #[test]
    fn other_income_feeds_the_credit_side() {
        let mut pl = trading(1_000.0, 0.0, 0.0, 400.0, 0.0);
        pl.other_income = 250.0;
        pl.expenses.wages = 100.0;
        let totals = aggregate(&pl, 0.0);
        assert_eq!(totals.gross_profit, 600.0);
        assert_eq!(totals.net_result, 750.0);
        assert_eq!(totals.expense_side_total, totals.income_side_total);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let mut pl = trading(9_999.0, 1.0, 2.0, 3.0, 4.0);
        pl.expenses.bank_charges = 55.0;
        let first = aggregate(&pl, 123.0);
        let second = aggregate(&pl, 123.0);
        assert_eq!(first, second);
    }
}
