//! Terminal output formatting.
//!
//! Renders the collected result sequence in one of three formats: a JSON
//! array, separator-delimited lines for `mapfile`/`read`-style shell
//! consumption, or `Key='value'` pairs.

pub mod colors;

use aurs_core::error::{AurError, AurResult};
use aurs_core::types::Package;
use clap::ValueEnum;

/// Selectable output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array (default)
    Json,
    /// One line per package, fields joined by the separator
    Raw,
    /// One line per package of Key='value' pairs
    Pairs,
}

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        eprintln!("{}", self.colors.dim(message));
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.colors.red("✗"), message);
    }

    /// Render the collected results to stdout
    pub fn render(&self, packages: &[Package], format: OutputFormat, sep: &str) -> AurResult<()> {
        match format {
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(packages).map_err(|e| AurError::Output {
                        message: e.to_string(),
                    })?;
                println!("{json}");
            },
            OutputFormat::Raw => {
                for package in packages {
                    println!("{}", raw_line(package, sep));
                }
            },
            OutputFormat::Pairs => {
                for package in packages {
                    println!("{}", pairs_line(package));
                }
            },
        }
        Ok(())
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// One raw-format line: wire-order fields joined by the separator, with
/// the diagnostic URL and sequence appended when stamped
pub(crate) fn raw_line(package: &Package, sep: &str) -> String {
    let mut line = format!(
        "{name}{sep}{version}{sep}{description}{sep}{maintainer}{sep}{votes}{sep}{popularity}{sep}{url}",
        name = package.name,
        version = package.version,
        description = package.description,
        maintainer = package.maintainer,
        votes = package.num_votes,
        popularity = package.popularity,
        url = package.url,
    );
    if let (Some(request_url), Some(sequence)) = (&package.request_url, package.sequence) {
        line.push_str(&format!("{sep}{request_url}{sep}{sequence}"));
    }
    line
}

/// One pairs-format line; the separator is always `=` so the output can be
/// `eval`ed field by field
pub(crate) fn pairs_line(package: &Package) -> String {
    format!(
        "Name='{}' Version='{}' Description='{}' Maintainer='{}' NumVotes='{}' Popularity='{:.2}' URL='{}'",
        package.name,
        package.version,
        package.description,
        package.maintainer,
        package.num_votes,
        package.popularity,
        package.url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_package() -> Package {
        Package {
            name: "yay".to_string(),
            version: "12.3.5-1".to_string(),
            description: "Yet another yogurt".to_string(),
            maintainer: "jguer".to_string(),
            num_votes: 2295,
            popularity: 35.5,
            url: "https://github.com/Jguer/yay".to_string(),
            request_url: None,
            sequence: None,
        }
    }

    #[test]
    fn raw_line_joins_fields_in_wire_order() {
        let line = raw_line(&test_package(), "|");
        assert_eq!(
            line,
            "yay|12.3.5-1|Yet another yogurt|jguer|2295|35.5|https://github.com/Jguer/yay"
        );
    }

    #[test]
    fn raw_line_appends_diagnostics_when_stamped() {
        let mut package = test_package();
        package.stamp_diagnostics("https://aur.archlinux.org/rpc?arg=yay", 3);

        let line = raw_line(&package, "|");
        assert!(line.ends_with("|https://aur.archlinux.org/rpc?arg=yay|3"));
    }

    #[test]
    fn pairs_line_quotes_values() {
        let line = pairs_line(&test_package());
        assert!(line.starts_with("Name='yay' Version='12.3.5-1'"));
        assert!(line.contains("NumVotes='2295'"));
        assert!(line.contains("Popularity='35.50'"));
    }

    #[test]
    fn json_render_uses_wire_field_names() {
        let json = serde_json::to_string(&[test_package()]).unwrap();
        assert!(json.contains("\"Name\":\"yay\""));
        assert!(json.contains("\"NumVotes\":2295"));
    }
}
