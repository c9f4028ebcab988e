use crate::cli::OutputFormat;

pub struct DefaultsConfig {
    pub format: OutputFormat,
    pub precision: Option<usize>,
    pub delimiter: char,
    pub include_header: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            precision: None,
            delimiter: ',',
            include_header: true,
        }
    }
}
