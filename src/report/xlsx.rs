// Spreadsheet backend: a minimal `.xlsx` workbook (two worksheets, inline
// strings, no shared-string table or styles) assembled part by part into a
// zip archive. Only the OOXML parts the export actually needs.

use anyhow::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::config::ReportSettings;
use crate::finance::{balance_sheet, profit_loss};
use crate::models::{BalanceSheet, Client, ProfitAndLoss};

/// One worksheet cell; numbers stay numeric so the workbook is usable for
/// further arithmetic, not just display.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

type Row = Vec<Cell>;

fn text(value: impl Into<String>) -> Cell {
    Cell::Text(value.into())
}

/// Builds the workbook for one `(client, year)` pair. Worksheet names match
/// the statement titles; absent statements get a single no-data row.
pub fn workbook(
    client: &Client,
    year: &str,
    sheet: Option<&BalanceSheet>,
    statement: Option<&ProfitAndLoss>,
    settings: &ReportSettings,
) -> Result<Vec<u8>> {
    let balance_rows = sheet
        .map(|s| balance_sheet_rows(client, year, s, statement, settings))
        .unwrap_or_else(|| no_data_rows(client, year, "BALANCE SHEET", settings));
    let pl_rows = statement
        .map(|s| profit_loss_rows(client, year, s, settings))
        .unwrap_or_else(|| no_data_rows(client, year, "TRADING AND PROFIT & LOSS ACCOUNT", settings));

    write_archive(&[("Balance Sheet", balance_rows), ("Profit & Loss", pl_rows)])
}

fn header_rows(client: &Client, year: &str, title: &str, settings: &ReportSettings) -> Vec<Row> {
    let mut rows = Vec::new();
    if !settings.business_name.is_empty() {
        rows.push(vec![text(&settings.business_name)]);
    }
    let display_name = if client.business_name.trim().is_empty() {
        &client.name
    } else {
        &client.business_name
    };
    rows.push(vec![text(display_name.to_uppercase())]);
    rows.push(vec![text(format!("{title} - FINANCIAL YEAR {year}"))]);
    rows.push(Vec::new());
    rows
}

fn no_data_rows(client: &Client, year: &str, title: &str, settings: &ReportSettings) -> Vec<Row> {
    let mut rows = header_rows(client, year, title, settings);
    rows.push(vec![text("NO DATA AVAILABLE FOR THIS PERIOD")]);
    rows
}

fn balance_sheet_rows(
    client: &Client,
    year: &str,
    sheet: &BalanceSheet,
    statement: Option<&ProfitAndLoss>,
    settings: &ReportSettings,
) -> Vec<Row> {
    let paired = statement.map(|pl| (pl.net_profit, pl.trading_account.closing_stock));
    let (net_profit, closing_stock) = paired.unwrap_or((0.0, 0.0));
    let totals = balance_sheet::aggregate(sheet, paired);
    let capital = &sheet.capital_account;

    let mut rows = header_rows(client, year, "BALANCE SHEET", settings);
    rows.push(vec![text("LIABILITIES"), Cell::Empty]);
    rows.push(vec![text("OPENING CAPITAL"), Cell::Number(capital.opening_capital)]);
    if totals.pending_profit_loss {
        rows.push(vec![text("ADD: NET PROFIT (PENDING P&L ENTRY)"), Cell::Empty]);
    } else if net_profit >= 0.0 {
        rows.push(vec![text("ADD: NET PROFIT"), Cell::Number(net_profit)]);
    } else {
        rows.push(vec![text("LESS: NET LOSS"), Cell::Number(net_profit.abs())]);
    }
    for item in capital.other_incomes.iter().filter(|i| i.amount != 0.0) {
        rows.push(vec![text(item.description.to_uppercase()), Cell::Number(item.amount)]);
    }
    if capital.household_expenses != 0.0 {
        rows.push(vec![text("LESS: HOUSEHOLD EXPENSES"), Cell::Number(capital.household_expenses)]);
    }
    for item in capital.other_expenses.iter().filter(|i| i.amount != 0.0) {
        rows.push(vec![text(item.description.to_uppercase()), Cell::Number(item.amount)]);
    }
    rows.push(vec![text("CLOSING CAPITAL"), Cell::Number(totals.closing_capital)]);

    for (heading, items) in [
        ("SUNDRY CREDITORS", &sheet.sundry_creditors),
        ("LOANS", &sheet.loans),
        ("PROVISIONS", &sheet.provisions),
    ] {
        push_section(&mut rows, heading, items);
    }
    rows.push(vec![text("TOTAL LIABILITIES"), Cell::Number(totals.total_liabilities)]);
    rows.push(Vec::new());

    rows.push(vec![text("ASSETS"), Cell::Empty]);
    push_section(&mut rows, "FIXED ASSETS", &sheet.fixed_assets);
    for asset in &sheet.depreciating_assets {
        if asset.closing_balance != 0.0 {
            rows.push(vec![
                text(format!("{} (AS PER SCHEDULE A)", asset.description.to_uppercase())),
                Cell::Number(asset.closing_balance),
            ]);
        }
    }
    if closing_stock != 0.0 {
        rows.push(vec![text("CLOSING STOCK"), Cell::Number(closing_stock)]);
    }
    for items in [
        &sheet.sundry_debtors,
        &sheet.cash_in_bank,
        &sheet.cash_in_hand,
        &sheet.loan_advances,
    ] {
        for item in items.iter().filter(|i| i.amount != 0.0) {
            rows.push(vec![text(item.description.to_uppercase()), Cell::Number(item.amount)]);
        }
    }
    rows.push(vec![text("TOTAL ASSETS"), Cell::Number(totals.total_assets)]);
    rows
}

fn profit_loss_rows(
    client: &Client,
    year: &str,
    statement: &ProfitAndLoss,
    settings: &ReportSettings,
) -> Vec<Row> {
    let totals = profit_loss::aggregate(statement, statement.expenses.depreciation);
    let trading = &statement.trading_account;

    let mut rows = header_rows(client, year, "TRADING AND PROFIT & LOSS ACCOUNT", settings);
    rows.push(vec![text("TRADING ACCOUNT"), Cell::Empty]);
    rows.push(vec![text("SALES"), Cell::Number(trading.sales)]);
    rows.push(vec![text("CLOSING STOCK"), Cell::Number(trading.closing_stock)]);
    rows.push(vec![text("OPENING STOCK"), Cell::Number(trading.opening_stock)]);
    rows.push(vec![text("PURCHASES"), Cell::Number(trading.purchases)]);
    rows.push(vec![text("DIRECT EXPENSES"), Cell::Number(trading.direct_expenses)]);
    rows.push(vec![text("GROSS PROFIT"), Cell::Number(totals.gross_profit)]);
    rows.push(Vec::new());

    rows.push(vec![text("EXPENSES"), Cell::Empty]);
    for (label, amount) in statement.expenses.named() {
        if amount != 0.0 {
            rows.push(vec![text(label), Cell::Number(amount)]);
        }
    }
    for item in &statement.custom_expenses {
        if !item.description.trim().is_empty() && item.amount != 0.0 {
            rows.push(vec![text(item.description.to_uppercase()), Cell::Number(item.amount)]);
        }
    }
    if statement.expenses.depreciation != 0.0 {
        rows.push(vec![
            text("DEPRECIATION (AS PER SCHEDULE A)"),
            Cell::Number(statement.expenses.depreciation),
        ]);
    }
    rows.push(vec![text("TOTAL EXPENSES"), Cell::Number(totals.total_expenses)]);
    if statement.other_income != 0.0 {
        rows.push(vec![text("OTHER INCOME"), Cell::Number(statement.other_income)]);
    }
    rows.push(vec![text("NET PROFIT"), Cell::Number(totals.net_profit)]);
    if totals.net_result < 0.0 {
        rows.push(vec![text("NET LOSS"), Cell::Number(-totals.net_result)]);
    }
    rows
}

// zero-amount rows stay stored but never land in the workbook
fn push_section(rows: &mut Vec<Row>, heading: &str, items: &[crate::models::LineItem]) {
    if !items.iter().any(|i| i.amount != 0.0) {
        return;
    }
    rows.push(vec![text(heading), Cell::Empty]);
    for item in items.iter().filter(|i| i.amount != 0.0) {
        rows.push(vec![text(item.description.to_uppercase()), Cell::Number(item.amount)]);
    }
}

fn write_archive(sheets: &[(&str, Vec<Row>)]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file("[Content_Types].xml", options)?;
    writer.write_all(content_types(sheets.len()).as_bytes())?;

    writer.start_file("_rels/.rels", options)?;
    writer.write_all(ROOT_RELS.as_bytes())?;

    writer.start_file("xl/workbook.xml", options)?;
    writer.write_all(workbook_xml(sheets).as_bytes())?;

    writer.start_file("xl/_rels/workbook.xml.rels", options)?;
    writer.write_all(workbook_rels(sheets.len()).as_bytes())?;

    for (index, (_, rows)) in sheets.iter().enumerate() {
        writer.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;
        writer.write_all(worksheet_xml(rows).as_bytes())?;
    }

    Ok(writer.finish()?.into_inner())
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

fn content_types(sheet_count: usize) -> String {
    let mut overrides = String::new();
    for i in 1..=sheet_count {
        overrides.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{overrides}</Types>"#
    )
}

fn workbook_xml(sheets: &[(&str, Vec<Row>)]) -> String {
    let mut entries = String::new();
    for (index, (name, _)) in sheets.iter().enumerate() {
        entries.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            xml_escape(name),
            index + 1,
            index + 1
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{entries}</sheets></workbook>"#
    )
}

fn workbook_rels(sheet_count: usize) -> String {
    let mut entries = String::new();
    for i in 1..=sheet_count {
        entries.push_str(&format!(
            r#"<Relationship Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{i}.xml"/>"#
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{entries}</Relationships>"#
    )
}

fn worksheet_xml(rows: &[Row]) -> String {
    let mut body = String::new();
    for (row_index, row) in rows.iter().enumerate() {
        let r = row_index + 1;
        body.push_str(&format!(r#"<row r="{r}">"#));
        for (col_index, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", col_ref(col_index), r);
            match cell {
                Cell::Empty => {}
                Cell::Text(value) => body.push_str(&format!(
                    r#"<c r="{reference}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    xml_escape(value)
                )),
                Cell::Number(value) => {
                    body.push_str(&format!(r#"<c r="{reference}"><v>{value}</v></c>"#))
                }
            }
        }
        body.push_str("</row>");
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{body}</sheetData></worksheet>"#
    )
}

/// Zero-based column index to its spreadsheet letter reference.
fn col_ref(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
