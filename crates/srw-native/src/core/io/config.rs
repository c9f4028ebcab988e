use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),
}

/// Settings for [`super::export::write_grid_csv`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub delimiter: u8,
    pub include_header: bool,
    /// Digits after the decimal point; `None` writes the shortest exact form.
    pub precision: Option<usize>,
}

#[derive(Default)]
pub struct ExportConfigBuilder {
    delimiter: Option<char>,
    include_header: Option<bool>,
    precision: Option<usize>,
}

impl ExportConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
    pub fn include_header(mut self, include: bool) -> Self {
        self.include_header = Some(include);
        self
    }
    pub fn precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }

    pub fn build(self) -> Result<ExportConfig, ConfigError> {
        let delimiter = self
            .delimiter
            .ok_or(ConfigError::MissingParameter("delimiter"))?;
        if !delimiter.is_ascii() {
            return Err(ConfigError::InvalidDelimiter(delimiter));
        }
        Ok(ExportConfig {
            delimiter: delimiter as u8,
            include_header: self
                .include_header
                .ok_or(ConfigError::MissingParameter("include_header"))?,
            precision: self.precision,
        })
    }
}
