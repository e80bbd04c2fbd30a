use clap::Parser;
use std::path::PathBuf;

/// A TUI for signing up for a gym membership
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// The account service to register with. Should only be the protocol and
    /// domain, e.g. `https://gym.your-domain.com`.
    #[clap(long, env = "GYMREG_SERVER", default_value = "http://localhost:8000")]
    pub server: String,

    /// Branches to offer in the form. Repeat the flag (or comma-separate the
    /// environment variable) to offer more than one.
    #[clap(
        long = "branch",
        env = "GYMREG_BRANCHES",
        value_delimiter = ',',
        default_values = ["Pune Branch", "Mumbai Branch", "Delhi Branch"]
    )]
    pub branches: Vec<String>,

    /// How long notifications stay on screen, in seconds
    #[clap(long, env = "GYMREG_TOAST_SECONDS", default_value = "5")]
    toast_seconds: u32,

    /// Where should we write logs?
    #[clap(long)]
    log_dir: Option<PathBuf>,
}

impl Config {
    /// Get either the configured or a default log directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("com", "gymreg", "gymreg")
                    .map(|dirs| dirs.data_local_dir().join("logs"))
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// How long a toast should stay up
    pub fn toast_lifetime(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.toast_seconds.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["gymreg"]).unwrap();

        assert_eq!(config.server, "http://localhost:8000");
        assert_eq!(
            config.branches,
            vec!["Pune Branch", "Mumbai Branch", "Delhi Branch"]
        );
        assert_eq!(config.toast_lifetime(), chrono::Duration::seconds(5));
    }

    #[test]
    fn branches_can_be_replaced() {
        let config =
            Config::try_parse_from(["gymreg", "--branch", "Goa Branch", "--branch", "Nagpur"])
                .unwrap();

        assert_eq!(config.branches, vec!["Goa Branch", "Nagpur"]);
    }

    #[test]
    fn explicit_log_dir_wins() {
        let config = Config::try_parse_from(["gymreg", "--log-dir", "/tmp/gymreg"]).unwrap();

        assert_eq!(config.log_dir(), PathBuf::from("/tmp/gymreg"));
    }
}
