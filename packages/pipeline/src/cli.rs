//! Command-line flags for the scan worker.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ScanConfig;
use crate::models::ExtractionProfile;

/// CAMT.053 scan worker - Load every statement file in a directory into PostgreSQL.
///
/// Flags override `CAMT_INPUT_DIR` and `CAMT_PROFILE`.
#[derive(Debug, Parser)]
#[command(name = "camt-scan-worker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for *.xml files
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Extraction profile
    #[arg(short, long, value_enum)]
    pub profile: Option<ExtractionProfile>,

    /// Exit after the scan instead of waiting for SIGINT/SIGTERM
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    /// Apply the flags on top of an environment-derived config.
    pub fn apply(self, mut config: ScanConfig) -> ScanConfig {
        if let Some(dir) = self.input_dir {
            config = config.with_input_dir(dir);
        }
        if let Some(profile) = self.profile {
            config = config.with_profile(profile);
        }
        config.with_once(self.once)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_INPUT_DIR;

    fn base() -> ScanConfig {
        ScanConfig {
            database_url: "postgres://localhost/camt".into(),
            max_connections: 5,
            input_dir: DEFAULT_INPUT_DIR.into(),
            profile: ExtractionProfile::Full,
            once: false,
        }
    }

    #[test]
    fn test_no_flags_keeps_environment() {
        let cli = Cli::parse_from(["camt-scan-worker"]);
        let config = cli.apply(base());

        assert_eq!(config.input_dir, PathBuf::from(DEFAULT_INPUT_DIR));
        assert_eq!(config.profile, ExtractionProfile::Full);
        assert!(!config.once);
    }

    #[test]
    fn test_flags_override_environment() {
        let cli = Cli::parse_from([
            "camt-scan-worker",
            "--input-dir",
            "/srv/statements",
            "--profile",
            "header",
            "--once",
        ]);
        let config = cli.apply(base());

        assert_eq!(config.input_dir, PathBuf::from("/srv/statements"));
        assert_eq!(config.profile, ExtractionProfile::Header);
        assert!(config.once);
    }

    #[test]
    fn test_unknown_profile_rejected() {
        let result = Cli::try_parse_from(["camt-scan-worker", "--profile", "raw"]);
        assert!(result.is_err());
    }
}
