// config.rs
// Report header/footer settings, read once from the environment at startup
// (dotenv-compatible, same pattern as the Mongo connection settings).

use std::env;

#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub business_name: String,
    pub business_tagline: String,
    pub footer_text: String,
}

impl ReportSettings {
    pub fn from_env() -> Self {
        ReportSettings {
            business_name: env::var("REPORT_BUSINESS_NAME").unwrap_or_default(),
            business_tagline: env::var("REPORT_BUSINESS_TAGLINE").unwrap_or_default(),
            footer_text: env::var("REPORT_FOOTER_TEXT")
                .unwrap_or_else(|_| "NOTE: THIS IS A COMPUTER-GENERATED DOCUMENT.".to_string()),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            business_name: String::new(),
            business_tagline: String::new(),
            footer_text: "NOTE: THIS IS A COMPUTER-GENERATED DOCUMENT.".to_string(),
        }
    }
}
