use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

/// Browse CariKerja job listings and articles from the terminal.
#[derive(Debug, Parser)]
#[command(name = "carikerja", version)]
pub struct Cli {
    /// RON configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,

    /// Category id to filter by on startup.
    #[arg(long, value_name = "ID")]
    pub category: Option<String>,

    /// Initial search text.
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;
    use crate::platform::logging::LogDestination;

    #[test]
    fn defaults_log_to_file() {
        let cli = Cli::try_parse_from(["carikerja"]).unwrap();
        assert_eq!(cli.log, LogDestination::File);
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn startup_filters_are_parsed() {
        let cli = Cli::try_parse_from([
            "carikerja",
            "--log",
            "both",
            "--category",
            "3",
            "--search",
            "jakarta",
            "--config",
            "carikerja.ron",
        ])
        .unwrap();
        assert_eq!(cli.log, LogDestination::Both);
        assert_eq!(cli.category.as_deref(), Some("3"));
        assert_eq!(cli.search.as_deref(), Some("jakarta"));
        assert_eq!(cli.config.unwrap().to_str(), Some("carikerja.ron"));
    }
}
