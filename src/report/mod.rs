// report module: layout model, statement composition, and the PDF/xlsx
// backends.

pub mod layout;
pub mod pdf;
pub mod statement;
pub mod xlsx;

/// Download filename for both export formats.
pub fn export_filename(year: &str, extension: &str) -> String {
    format!("Financial_Statements_{year}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_embed_the_fiscal_year() {
        assert_eq!(
            export_filename("2023-2024", "pdf"),
            "Financial_Statements_2023-2024.pdf"
        );
        assert_eq!(
            export_filename("2023-2024", "xlsx"),
            "Financial_Statements_2023-2024.xlsx"
        );
    }
}
