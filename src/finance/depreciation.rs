// Depreciation schedule engine (Schedule A).
//
// Per-asset derivation:
//   total               = opening_balance + added_during_year
//   depreciation_amount = round(total * rate / 100)   (half rounds up)
//   closing_balance     = total - depreciation_amount
//
// Depreciation rounds to the whole currency unit; f64::round matches the
// half-up behaviour of the entry forms for the non-negative inputs they
// produce. Negative inputs are passed through unvalidated.

use crate::models::DepreciatingAsset;

/// Builds a fully derived asset row from the three input fields.
pub fn compute_asset(
    description: &str,
    opening_balance: f64,
    added_during_year: f64,
    depreciation_rate: f64,
) -> DepreciatingAsset {
    let mut asset = DepreciatingAsset {
        description: description.to_string(),
        opening_balance,
        added_during_year,
        depreciation_rate,
        ..Default::default()
    };
    recompute(&mut asset);
    asset
}

/// Recomputes the derived fields in place. Called on every save and on every
/// read so stale derived values can never leak into totals.
pub fn recompute(asset: &mut DepreciatingAsset) {
    let total = asset.opening_balance + asset.added_during_year;
    let depreciation_amount = (total * asset.depreciation_rate / 100.0).round();
    asset.total = total;
    asset.depreciation_amount = depreciation_amount;
    asset.closing_balance = total - depreciation_amount;
}

pub fn recompute_all(assets: &mut [DepreciatingAsset]) {
    for asset in assets {
        recompute(asset);
    }
}

/// Total depreciation of a schedule; this is the figure the paired P&L must
/// carry as its depreciation expense.
pub fn total_depreciation(assets: &[DepreciatingAsset]) -> f64 {
    assets.iter().map(|a| a.depreciation_amount).sum()
}

/// Sum of closing balances, the balance-sheet side of the schedule.
pub fn total_closing_balance(assets: &[DepreciatingAsset]) -> f64 {
    assets.iter().map(|a| a.closing_balance).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_schedule_b_scenario() {
        // opening 500,000 + addition 100,000 at 10%
        let asset = compute_asset("PLANT & MACHINERY", 500_000.0, 100_000.0, 10.0);
        assert_eq!(asset.total, 600_000.0);
        assert_eq!(asset.depreciation_amount, 60_000.0);
        assert_eq!(asset.closing_balance, 540_000.0);
    }

    #[test]
    fn closing_plus_depreciation_equals_total() {
        for (opening, added, rate) in [
            (123_456.0, 7_890.0, 15.0),
            (1.0, 0.0, 33.33),
            (999_999.0, 1.0, 7.5),
            (0.0, 0.0, 10.0),
        ] {
            let asset = compute_asset("X", opening, added, rate);
            assert_eq!(
                asset.closing_balance + asset.depreciation_amount,
                asset.total
            );
            assert_eq!(asset.total, opening + added);
        }
    }

    #[test]
    fn depreciation_rounds_half_up() {
        // 1001 * 5% = 50.05 -> 50; 1010 * 5% = 50.5 -> 51
        let a = compute_asset("A", 1_001.0, 0.0, 5.0);
        assert_eq!(a.depreciation_amount, 50.0);
        let b = compute_asset("B", 1_010.0, 0.0, 5.0);
        assert_eq!(b.depreciation_amount, 51.0);
    }

    #[test]
    fn recompute_overwrites_stale_derived_fields() {
        let mut asset = compute_asset("FURNITURE", 10_000.0, 0.0, 10.0);
        asset.depreciation_amount = 9_999.0;
        asset.closing_balance = 1.0;
        recompute(&mut asset);
        assert_eq!(asset.depreciation_amount, 1_000.0);
        assert_eq!(asset.closing_balance, 9_000.0);
    }

    #[test]
    fn schedule_totals_sum_each_asset() {
        let assets = vec![
            compute_asset("A", 1_000.0, 0.0, 10.0),
            compute_asset("B", 2_000.0, 500.0, 20.0),
        ];
        assert_eq!(total_depreciation(&assets), 100.0 + 500.0);
        assert_eq!(total_closing_balance(&assets), 900.0 + 2_000.0);
    }
}
