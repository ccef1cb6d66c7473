// Composes the three-page financial statement (balance sheet, trading and
// P&L account, depreciation schedule) into the layout model. All totals are
// taken from the aggregators so the rendered figures can never diverge from
// the stored ones.

use crate::config::ReportSettings;
use crate::finance::currency::format_amount;
use crate::finance::{balance_sheet, depreciation, profit_loss};
use crate::models::{BalanceSheet, Client, LineItem, ProfitAndLoss};

use super::layout::{
    self, Align, Cursor, Page, BODY_SIZE, HEADING_SIZE, LINE_HEIGHT, MARGIN, PAGE_HEIGHT,
    PAGE_WIDTH, TITLE_SIZE,
};

const NO_DATA: &str = "NO DATA AVAILABLE FOR THIS PERIOD";
const SECTION_GAP: f64 = 6.0;

const COLUMN_MID: f64 = PAGE_WIDTH / 2.0;
const LEFT_X: f64 = MARGIN;
const LEFT_AMOUNT_X: f64 = COLUMN_MID - 12.0;
const RIGHT_X: f64 = COLUMN_MID + 12.0;
const RIGHT_AMOUNT_X: f64 = PAGE_WIDTH - MARGIN;

/// Composes the full statement. Either statement may be absent; its page
/// then carries the no-data placeholder instead of being skipped, so the
/// document always has the same shape.
pub fn compose(
    client: &Client,
    year: &str,
    sheet: Option<&BalanceSheet>,
    statement: Option<&ProfitAndLoss>,
    settings: &ReportSettings,
) -> Vec<Page> {
    let mut pages = vec![
        balance_sheet_page(client, year, sheet, statement, settings),
        profit_loss_page(client, year, statement, settings),
        schedule_page(client, year, sheet, settings),
    ];
    layout::stamp_page_numbers(&mut pages);
    pages
}

fn balance_sheet_page(
    client: &Client,
    year: &str,
    sheet: Option<&BalanceSheet>,
    statement: Option<&ProfitAndLoss>,
    settings: &ReportSettings,
) -> Page {
    let mut page = Page::default();
    let top = page_header(&mut page, client, year, "BALANCE SHEET", settings);

    let Some(sheet) = sheet else {
        placeholder(&mut page, top);
        return page;
    };

    let paired = statement.map(|pl| (pl.net_profit, pl.trading_account.closing_stock));
    let (net_profit, closing_stock) = paired.unwrap_or((0.0, 0.0));
    let totals = balance_sheet::aggregate(sheet, paired);

    let mut left = Cursor::at(top);
    let mut right = Cursor::at(top);

    page.bold("LIABILITIES", LEFT_X, left.advance(LINE_HEIGHT), BODY_SIZE, Align::Left);
    page.bold("ASSETS", RIGHT_X, right.advance(LINE_HEIGHT), BODY_SIZE, Align::Left);
    left.skip(2.0);
    right.skip(2.0);

    // liabilities side: capital account roll-forward, then creditor sections
    let capital = &sheet.capital_account;
    page.bold("CAPITAL ACCOUNT", LEFT_X, left.advance(LINE_HEIGHT), BODY_SIZE, Align::Left);
    left_row(&mut page, &mut left, "OPENING CAPITAL", capital.opening_capital);
    if totals.pending_profit_loss {
        page.text(
            "ADD: NET PROFIT (PENDING P&L ENTRY)",
            LEFT_X,
            left.advance(LINE_HEIGHT),
            BODY_SIZE,
            Align::Left,
        );
    } else if net_profit >= 0.0 {
        left_row(&mut page, &mut left, "ADD: NET PROFIT", net_profit);
    } else {
        left_row(&mut page, &mut left, "LESS: NET LOSS", net_profit.abs());
    }
    nonzero_rows(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, &capital.other_incomes);
    total_row(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, "TOTAL", totals.capital_first_total);
    if capital.household_expenses != 0.0 {
        left_row(&mut page, &mut left, "LESS: HOUSEHOLD EXPENSES", capital.household_expenses);
    }
    nonzero_rows(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, &capital.other_expenses);
    total_row(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, "CLOSING CAPITAL", totals.closing_capital);
    left.skip(SECTION_GAP);

    section(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, "SUNDRY CREDITORS", &sheet.sundry_creditors);
    section(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, "LOANS", &sheet.loans);
    section(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, "PROVISIONS", &sheet.provisions);

    // assets side
    section(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, "FIXED ASSETS", &sheet.fixed_assets);

    let schedule_rows: Vec<LineItem> = sheet
        .depreciating_assets
        .iter()
        .filter(|a| a.closing_balance != 0.0)
        .map(|a| LineItem::new(format!("{} (AS PER SCHEDULE A)", a.description), a.closing_balance))
        .collect();
    section(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, "DEPRECIATING ASSETS", &schedule_rows);

    if !sheet_current_assets_empty(sheet, closing_stock) {
        page.bold("CURRENT ASSETS", RIGHT_X, right.advance(LINE_HEIGHT), BODY_SIZE, Align::Left);
        if closing_stock != 0.0 {
            row(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, "CLOSING STOCK", closing_stock);
        }
        nonzero_rows(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, &sheet.sundry_debtors);
        nonzero_rows(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, &sheet.cash_in_bank);
        nonzero_rows(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, &sheet.cash_in_hand);
        nonzero_rows(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, &sheet.loan_advances);
        right.skip(SECTION_GAP);
    }

    // both grand totals share one baseline below the longer column
    let mut base = left.max(&right);
    base.skip(SECTION_GAP);
    let y = base.advance(LINE_HEIGHT);
    page.hline(LEFT_X, LEFT_AMOUNT_X, y - LINE_HEIGHT + 3.0);
    page.hline(RIGHT_X, RIGHT_AMOUNT_X, y - LINE_HEIGHT + 3.0);
    page.bold("TOTAL", LEFT_X, y, BODY_SIZE, Align::Left);
    page.bold(format_amount(totals.total_liabilities), LEFT_AMOUNT_X, y, BODY_SIZE, Align::Right);
    page.bold("TOTAL", RIGHT_X, y, BODY_SIZE, Align::Left);
    page.bold(format_amount(totals.total_assets), RIGHT_AMOUNT_X, y, BODY_SIZE, Align::Right);
    page.hline(LEFT_X, LEFT_AMOUNT_X, y + 3.0);
    page.hline(RIGHT_X, RIGHT_AMOUNT_X, y + 3.0);

    if totals.difference != 0.0 {
        base.skip(SECTION_GAP);
        page.text(
            format!("DIFFERENCE: {}", format_amount(totals.difference)),
            LEFT_X,
            base.advance(LINE_HEIGHT),
            BODY_SIZE,
            Align::Left,
        );
    }

    footer(&mut page, settings);
    page
}

fn profit_loss_page(
    client: &Client,
    year: &str,
    statement: Option<&ProfitAndLoss>,
    settings: &ReportSettings,
) -> Page {
    let mut page = Page::default();
    let top = page_header(
        &mut page,
        client,
        year,
        "TRADING AND PROFIT & LOSS ACCOUNT",
        settings,
    );

    let Some(statement) = statement else {
        placeholder(&mut page, top);
        return page;
    };

    let totals = profit_loss::aggregate(statement, statement.expenses.depreciation);
    let trading = &statement.trading_account;

    let mut left = Cursor::at(top);
    let mut right = Cursor::at(top);

    page.bold("TRADING ACCOUNT", COLUMN_MID, left.advance(LINE_HEIGHT), HEADING_SIZE, Align::Center);
    right.skip(LINE_HEIGHT);
    left.skip(2.0);
    right.skip(2.0);

    row(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, "OPENING STOCK", trading.opening_stock);
    row(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, "PURCHASES", trading.purchases);
    row(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, "DIRECT EXPENSES", trading.direct_expenses);
    if totals.gross_profit > 0.0 {
        row(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, "GROSS PROFIT C/D", totals.gross_profit);
    }

    row(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, "SALES", trading.sales);
    row(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, "CLOSING STOCK", trading.closing_stock);
    if totals.gross_result < 0.0 {
        row(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, "GROSS LOSS C/D", -totals.gross_result);
    }

    let mut base = left.max(&right);
    base.skip(SECTION_GAP);
    dual_total(&mut page, &mut base, totals.trading_debit_total, totals.trading_credit_total);

    base.skip(SECTION_GAP * 2.0);
    page.bold(
        "PROFIT & LOSS ACCOUNT",
        COLUMN_MID,
        base.advance(LINE_HEIGHT),
        HEADING_SIZE,
        Align::Center,
    );
    base.skip(2.0);
    let mut left = base;
    let mut right = base;

    for (label, amount) in statement.expenses.named() {
        if amount != 0.0 {
            row(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, label, amount);
        }
    }
    for item in &statement.custom_expenses {
        // zero-amount custom expenses stay stored but are never rendered
        if !item.description.trim().is_empty() && item.amount != 0.0 {
            row(
                &mut page,
                &mut left,
                LEFT_X,
                LEFT_AMOUNT_X,
                &item.description.to_uppercase(),
                item.amount,
            );
        }
    }
    if statement.expenses.depreciation != 0.0 {
        row(
            &mut page,
            &mut left,
            LEFT_X,
            LEFT_AMOUNT_X,
            "DEPRECIATION (AS PER SCHEDULE A)",
            statement.expenses.depreciation,
        );
    }
    if totals.net_profit > 0.0 {
        row(&mut page, &mut left, LEFT_X, LEFT_AMOUNT_X, "NET PROFIT", totals.net_profit);
    }

    if totals.gross_profit > 0.0 {
        row(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, "GROSS PROFIT B/D", totals.gross_profit);
    }
    if statement.other_income != 0.0 {
        row(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, "OTHER INCOME", statement.other_income);
    }
    if totals.net_result < 0.0 {
        row(&mut page, &mut right, RIGHT_X, RIGHT_AMOUNT_X, "NET LOSS", -totals.net_result);
    }

    let mut base = left.max(&right);
    base.skip(SECTION_GAP);
    dual_total(&mut page, &mut base, totals.expense_side_total, totals.income_side_total);

    footer(&mut page, settings);
    page
}

// Schedule A column weights, description through closing balance, in units
// of one plain column.
const SCHEDULE_WEIGHTS: [f64; 7] = [2.2, 0.8, 0.8, 0.8, 0.6, 0.9, 0.9];
const SCHEDULE_HEADERS: [&str; 7] = [
    "PARTICULARS",
    "OPENING BALANCE",
    "ADDITIONS",
    "TOTAL",
    "RATE %",
    "DEPRECIATION",
    "CLOSING BALANCE",
];

fn schedule_page(
    client: &Client,
    year: &str,
    sheet: Option<&BalanceSheet>,
    settings: &ReportSettings,
) -> Page {
    let mut page = Page::default();
    let top = page_header(&mut page, client, year, "SCHEDULE A : DEPRECIATION", settings);

    let assets: Vec<_> = sheet
        .map(|s| {
            s.depreciating_assets
                .iter()
                .filter(|a| !a.description.trim().is_empty() || a.total != 0.0)
                .collect()
        })
        .unwrap_or_default();
    if assets.is_empty() {
        placeholder(&mut page, top);
        return page;
    }

    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    let unit = usable / SCHEDULE_WEIGHTS.iter().sum::<f64>();
    // right edge of each column; the description column is the only
    // left-aligned one
    let mut edges = [0.0f64; 7];
    let mut x = MARGIN;
    for (i, weight) in SCHEDULE_WEIGHTS.iter().enumerate() {
        x += weight * unit;
        edges[i] = x;
    }

    let mut cursor = Cursor::at(top);
    let y = cursor.advance(LINE_HEIGHT);
    for (i, header) in SCHEDULE_HEADERS.iter().enumerate() {
        if i == 0 {
            page.bold(*header, MARGIN, y, 8.0, Align::Left);
        } else {
            page.bold(*header, edges[i] - 2.0, y, 8.0, Align::Right);
        }
    }
    page.hline(MARGIN, PAGE_WIDTH - MARGIN, y + 3.0);
    cursor.skip(4.0);

    for asset in &assets {
        let y = cursor.advance(LINE_HEIGHT);
        page.text(asset.description.to_uppercase(), MARGIN, y, BODY_SIZE, Align::Left);
        let cells = [
            format_amount(asset.opening_balance),
            format_amount(asset.added_during_year),
            format_amount(asset.total),
            format!("{}%", asset.depreciation_rate),
            format_amount(asset.depreciation_amount),
            format_amount(asset.closing_balance),
        ];
        for (i, cell) in cells.iter().enumerate() {
            page.text(cell, edges[i + 1] - 2.0, y, BODY_SIZE, Align::Right);
        }
    }

    let opening: f64 = assets.iter().map(|a| a.opening_balance).sum();
    let added: f64 = assets.iter().map(|a| a.added_during_year).sum();
    let total: f64 = assets.iter().map(|a| a.total).sum();
    let dep: f64 = assets.iter().map(|a| a.depreciation_amount).sum();
    let closing: f64 = assets.iter().map(|a| a.closing_balance).sum();

    cursor.skip(4.0);
    let y = cursor.advance(LINE_HEIGHT);
    page.hline(MARGIN, PAGE_WIDTH - MARGIN, y - LINE_HEIGHT + 3.0);
    page.bold("TOTAL", MARGIN, y, BODY_SIZE, Align::Left);
    let totals_cells = [
        format_amount(opening),
        format_amount(added),
        format_amount(total),
        String::new(),
        format_amount(dep),
        format_amount(closing),
    ];
    for (i, cell) in totals_cells.iter().enumerate() {
        if !cell.is_empty() {
            page.bold(cell, edges[i + 1] - 2.0, y, BODY_SIZE, Align::Right);
        }
    }
    page.hline(MARGIN, PAGE_WIDTH - MARGIN, y + 3.0);

    footer(&mut page, settings);
    page
}

/// Draws the standard page header and returns the first free baseline.
fn page_header(
    page: &mut Page,
    client: &Client,
    year: &str,
    title: &str,
    settings: &ReportSettings,
) -> f64 {
    let mut cursor = Cursor::at(MARGIN + 10.0);
    let center = PAGE_WIDTH / 2.0;

    if !settings.business_name.is_empty() {
        page.bold(&settings.business_name, center, cursor.advance(18.0), TITLE_SIZE, Align::Center);
    }
    if !settings.business_tagline.is_empty() {
        page.text(&settings.business_tagline, center, cursor.advance(12.0), 8.0, Align::Center);
    }
    cursor.skip(6.0);

    let display_name = if client.business_name.trim().is_empty() {
        &client.name
    } else {
        &client.business_name
    };
    page.bold(display_name.to_uppercase(), center, cursor.advance(16.0), 12.0, Align::Center);
    if !client.address.trim().is_empty() {
        page.text(client.address.to_uppercase(), center, cursor.advance(12.0), 8.0, Align::Center);
    }
    page.bold(
        format!("{title} - FINANCIAL YEAR {year}"),
        center,
        cursor.advance(16.0),
        HEADING_SIZE,
        Align::Center,
    );
    page.hline(MARGIN, PAGE_WIDTH - MARGIN, cursor.y());
    cursor.skip(10.0);
    cursor.y()
}

fn footer(page: &mut Page, settings: &ReportSettings) {
    if !settings.footer_text.is_empty() {
        page.text(
            &settings.footer_text,
            PAGE_WIDTH / 2.0,
            PAGE_HEIGHT - MARGIN,
            7.0,
            Align::Center,
        );
    }
    page.text(
        format!("GENERATED ON {}", chrono::Local::now().format("%d-%m-%Y")),
        PAGE_WIDTH - MARGIN,
        PAGE_HEIGHT - MARGIN,
        7.0,
        Align::Right,
    );
}

fn placeholder(page: &mut Page, top: f64) {
    page.bold(NO_DATA, PAGE_WIDTH / 2.0, top + 120.0, 12.0, Align::Center);
}

fn row(page: &mut Page, cursor: &mut Cursor, x: f64, amount_x: f64, label: &str, amount: f64) {
    let y = cursor.advance(LINE_HEIGHT);
    page.text(label, x, y, BODY_SIZE, Align::Left);
    page.text(format_amount(amount), amount_x, y, BODY_SIZE, Align::Right);
}

fn left_row(page: &mut Page, cursor: &mut Cursor, label: &str, amount: f64) {
    row(page, cursor, LEFT_X, LEFT_AMOUNT_X, label, amount);
}

/// Rows with a non-zero amount. Zero-valued rows still count toward stored
/// totals, but a printed table never shows a 0.00 line.
fn nonzero_rows(page: &mut Page, cursor: &mut Cursor, x: f64, amount_x: f64, items: &[LineItem]) {
    for item in items.iter().filter(|i| i.amount != 0.0) {
        row(page, cursor, x, amount_x, &item.description.to_uppercase(), item.amount);
    }
}

/// Heading plus non-zero rows; skipped entirely when nothing would print.
fn section(
    page: &mut Page,
    cursor: &mut Cursor,
    x: f64,
    amount_x: f64,
    heading: &str,
    items: &[LineItem],
) {
    if !items.iter().any(|i| i.amount != 0.0) {
        return;
    }
    page.bold(heading, x, cursor.advance(LINE_HEIGHT), BODY_SIZE, Align::Left);
    nonzero_rows(page, cursor, x, amount_x, items);
    cursor.skip(SECTION_GAP);
}

fn total_row(page: &mut Page, cursor: &mut Cursor, x: f64, amount_x: f64, label: &str, amount: f64) {
    let y = cursor.advance(LINE_HEIGHT);
    page.hline(x, amount_x, y - LINE_HEIGHT + 3.0);
    page.bold(label, x, y, BODY_SIZE, Align::Left);
    page.bold(format_amount(amount), amount_x, y, BODY_SIZE, Align::Right);
}

fn dual_total(page: &mut Page, base: &mut Cursor, left_total: f64, right_total: f64) {
    let y = base.advance(LINE_HEIGHT);
    page.hline(LEFT_X, LEFT_AMOUNT_X, y - LINE_HEIGHT + 3.0);
    page.hline(RIGHT_X, RIGHT_AMOUNT_X, y - LINE_HEIGHT + 3.0);
    page.bold("TOTAL", LEFT_X, y, BODY_SIZE, Align::Left);
    page.bold(format_amount(left_total), LEFT_AMOUNT_X, y, BODY_SIZE, Align::Right);
    page.bold("TOTAL", RIGHT_X, y, BODY_SIZE, Align::Left);
    page.bold(format_amount(right_total), RIGHT_AMOUNT_X, y, BODY_SIZE, Align::Right);
    page.hline(LEFT_X, LEFT_AMOUNT_X, y + 3.0);
    page.hline(RIGHT_X, RIGHT_AMOUNT_X, y + 3.0);
}

fn sheet_current_assets_empty(sheet: &BalanceSheet, closing_stock: f64) -> bool {
    closing_stock == 0.0
        && !sheet.sundry_debtors.iter().any(|i| i.amount != 0.0)
        && !sheet.cash_in_bank.iter().any(|i| i.amount != 0.0)
        && !sheet.cash_in_hand.iter().any(|i| i.amount != 0.0)
        && !sheet.loan_advances.iter().any(|i| i.amount != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::depreciation::compute_asset;
    use crate::models::CapitalAccount;

    fn client() -> Client {
        Client {
            id: "ravi-traders".to_string(),
            name: "Ravi Traders".to_string(),
            business_name: String::new(),
            pan: String::new(),
            gst: String::new(),
            email: String::new(),
            phone: String::new(),
            whatsapp: String::new(),
            address: "12 Market Road".to_string(),
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
        }
    }

    fn contains(page: &Page, needle: &str) -> bool {
        page.texts.iter().any(|t| t.content.contains(needle))
    }

    #[test]
    fn always_three_pages_with_stamps() {
        let pages = compose(&client(), "2023-2024", None, None, &ReportSettings::default());
        assert_eq!(pages.len(), 3);
        assert!(contains(&pages[0], "Page 1 of 3"));
        assert!(contains(&pages[2], "Page 3 of 3"));
    }

    #[test]
    fn missing_statements_render_placeholders() {
        let pages = compose(&client(), "2023-2024", None, None, &ReportSettings::default());
        for page in &pages {
            assert!(contains(page, NO_DATA));
        }
    }

    #[test]
    fn balance_sheet_totals_share_a_baseline() {
        let sheet = BalanceSheet {
            capital_account: CapitalAccount {
                opening_capital: 1_000.0,
                ..Default::default()
            },
            cash_in_hand: vec![
                LineItem::new("CASH", 400.0),
                LineItem::new("A", 1.0),
                LineItem::new("B", 1.0),
            ],
            ..Default::default()
        };
        let pages = compose(&client(), "2023-2024", Some(&sheet), None, &ReportSettings::default());
        let totals: Vec<_> = pages[0]
            .texts
            .iter()
            .filter(|t| t.content == "TOTAL" && t.bold)
            .collect();
        // the last two are the grand totals; earlier ones belong to the
        // capital roll-forward
        assert!(totals.len() >= 2);
        let [left, right] = [&totals[totals.len() - 2], &totals[totals.len() - 1]];
        assert_eq!(left.y, right.y);
    }

    #[test]
    fn placeholder_rows_never_reach_the_page() {
        let sheet = BalanceSheet {
            sundry_creditors: vec![LineItem::new("", 0.0), LineItem::new("ACME", 9.0)],
            ..Default::default()
        };
        let pages = compose(&client(), "2023-2024", Some(&sheet), None, &ReportSettings::default());
        assert!(contains(&pages[0], "ACME"));
        let rows = pages[0]
            .texts
            .iter()
            .filter(|t| t.content.is_empty())
            .count();
        assert_eq!(rows, 0);
    }

    #[test]
    fn net_loss_lands_on_the_income_side() {
        let pl = ProfitAndLoss {
            trading_account: crate::models::TradingAccount {
                sales: 1_000.0,
                ..Default::default()
            },
            expenses: crate::models::ExpenseLedger {
                rent: 1_500.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let pages = compose(&client(), "2023-2024", None, Some(&pl), &ReportSettings::default());
        assert!(contains(&pages[1], "NET LOSS"));
        assert!(!contains(&pages[1], "NET PROFIT"));
    }

    #[test]
    fn schedule_lists_assets_and_totals() {
        let sheet = BalanceSheet {
            depreciating_assets: vec![
                compute_asset("Machinery", 500_000.0, 100_000.0, 10.0),
                compute_asset("Van", 200_000.0, 0.0, 15.0),
            ],
            ..Default::default()
        };
        let pages = compose(&client(), "2023-2024", Some(&sheet), None, &ReportSettings::default());
        let schedule = &pages[2];
        assert!(contains(schedule, "MACHINERY"));
        assert!(contains(schedule, "60,000.00"));
        assert!(contains(schedule, "10%"));
        // totals row: 60,000 + 30,000 depreciation
        assert!(contains(schedule, "90,000.00"));
    }

    #[test]
    fn zero_amount_rows_are_suppressed_in_rendering() {
        let sheet = BalanceSheet {
            loans: vec![
                LineItem::new("CAR LOAN", 0.0),
                LineItem::new("TERM LOAN", 40_000.0),
            ],
            ..Default::default()
        };
        let pl = ProfitAndLoss {
            trading_account: crate::models::TradingAccount {
                sales: 10_000.0,
                ..Default::default()
            },
            custom_expenses: vec![
                LineItem::new("PRINTING", 0.0),
                LineItem::new("GENERATOR FUEL", 700.0),
            ],
            ..Default::default()
        };
        let pages = compose(
            &client(),
            "2023-2024",
            Some(&sheet),
            Some(&pl),
            &ReportSettings::default(),
        );
        assert!(!contains(&pages[0], "CAR LOAN"));
        assert!(contains(&pages[0], "TERM LOAN"));
        assert!(!contains(&pages[1], "PRINTING"));
        assert!(contains(&pages[1], "GENERATOR FUEL"));
    }

    #[test]
    fn pending_pl_is_noted_on_the_capital_account() {
        let sheet = BalanceSheet {
            capital_account: CapitalAccount {
                opening_capital: 1_000.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let pages = compose(&client(), "2023-2024", Some(&sheet), None, &ReportSettings::default());
        assert!(contains(&pages[0], "ADD: NET PROFIT (PENDING P&L ENTRY)"));

        let pl = ProfitAndLoss::default();
        let pages = compose(
            &client(),
            "2023-2024",
            Some(&sheet),
            Some(&pl),
            &ReportSettings::default(),
        );
        assert!(!contains(&pages[0], "PENDING P&L ENTRY"));
    }

    #[test]
    fn header_carries_client_and_year() {
        let pages = compose(&client(), "2023-2024", None, None, &ReportSettings::default());
        assert!(contains(&pages[0], "RAVI TRADERS"));
        assert!(contains(&pages[0], "FINANCIAL YEAR 2023-2024"));
        assert!(contains(&pages[0], "12 MARKET ROAD"));
    }
}
