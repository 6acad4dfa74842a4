use crate::app::AppError;
use serde::{Deserialize, Serialize};

/// location and format of the wide survey file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    /// single-byte field delimiter. defaults to tab.
    #[serde(default = "InputConfig::default_delimiter")]
    pub delimiter: String,
}

impl InputConfig {
    fn default_delimiter() -> String {
        String::from("\t")
    }

    pub fn delimiter_byte(&self) -> Result<u8, AppError> {
        match self.delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => Err(AppError::ConfigurationError(format!(
                "delimiter must be a single byte, found '{}'",
                self.delimiter.escape_default()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InputConfig;

    #[test]
    fn test_delimiter_byte() {
        let mut conf = InputConfig {
            path: String::from("swissmetro.dat"),
            delimiter: String::from("\t"),
        };
        assert_eq!(conf.delimiter_byte().unwrap(), b'\t');
        conf.delimiter = String::from("::");
        let message = conf.delimiter_byte().unwrap_err().to_string();
        assert!(message.starts_with("invalid run configuration: delimiter must be a single byte"));
    }
}
