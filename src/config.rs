//! Configuration handling for tabkit

/// Output format for transformed tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain delimited text, the engine's native format
    #[default]
    Delimited,
    Json,
    Terminal,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delimited" | "text" => Ok(OutputFormat::Delimited),
            "json" => Ok(OutputFormat::Json),
            "terminal" => Ok(OutputFormat::Terminal),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Default separator for multi-value cells
pub const DEFAULT_SECONDARY_SEPARATOR: char = ';';

/// Parse a separator argument: a single character or a well-known name
pub fn parse_separator(s: &str) -> Result<char, String> {
    match s.to_lowercase().as_str() {
        "tab" | "\\t" => return Ok('\t'),
        "comma" => return Ok(','),
        "semicolon" => return Ok(';'),
        "pipe" => return Ok('|'),
        "space" => return Ok(' '),
        _ => {}
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '\n' => Ok(c),
        _ => Err(format!("Separator must be a single character: {:?}", s)),
    }
}

/// Configuration for reading, transforming and writing tables
#[derive(Debug, Clone)]
pub struct Config {
    /// Input separator; detected from the file extension when unset
    pub separator: Option<char>,
    /// Output separator; defaults to the input separator
    pub output_separator: Option<char>,
    /// Separator between values inside one cell
    pub secondary_separator: char,
    /// Output format
    pub output_format: OutputFormat,
    /// Read input as quoted CSV
    pub quoted: bool,
    /// Log verbosity (0 = warnings only)
    pub verbose: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: None,
            output_separator: None,
            secondary_separator: DEFAULT_SECONDARY_SEPARATOR,
            output_format: OutputFormat::default(),
            quoted: false,
            verbose: 0,
        }
    }
}

impl Config {
    /// Set the input separator
    pub fn with_separator(mut self, sep: char) -> Self {
        self.separator = Some(sep);
        self
    }

    /// Set the output separator
    pub fn with_output_separator(mut self, sep: char) -> Self {
        self.output_separator = Some(sep);
        self
    }

    /// Set the multi-value separator
    pub fn with_secondary_separator(mut self, sep: char) -> Self {
        self.secondary_separator = sep;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Read input as quoted CSV
    pub fn with_quoted(mut self, quoted: bool) -> Self {
        self.quoted = quoted;
        self
    }

    /// Set log verbosity
    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    /// Input separator, falling back to `fallback`
    pub fn input_separator_or(&self, fallback: char) -> char {
        self.separator.unwrap_or(fallback)
    }

    /// Output separator, falling back to the input separator then `fallback`
    pub fn output_separator_or(&self, fallback: char) -> char {
        self.output_separator
            .or(self.separator)
            .unwrap_or(fallback)
    }

    /// Tracing filter directive for the configured verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator("tab"), Ok('\t'));
        assert_eq!(parse_separator("\t"), Ok('\t'));
        assert_eq!(parse_separator(","), Ok(','));
        assert_eq!(parse_separator("Pipe"), Ok('|'));
        assert!(parse_separator(",,").is_err());
        assert!(parse_separator("").is_err());
    }

    #[test]
    fn test_output_separator_fallbacks() {
        let config = Config::default();
        assert_eq!(config.output_separator_or(','), ',');

        let config = config.with_separator('\t');
        assert_eq!(config.output_separator_or(','), '\t');

        let config = config.with_output_separator(';');
        assert_eq!(config.output_separator_or(','), ';');
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Delimited));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(Config::default().log_level(), "warn");
        assert_eq!(Config::default().with_verbose(5).log_level(), "trace");
    }
}
