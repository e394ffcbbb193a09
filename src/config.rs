use crate::db::get_db_path;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "exam-prep", about = "Terminal quiz for exam preparation", version)]
pub struct Cli {
    /// Directory holding the question bank JSON files
    #[arg(long, short = 'd', env = "EXAM_PREP_DATA", default_value = "data")]
    pub data_dir: PathBuf,

    /// SQLite file for progress and history (default ~/.local/share/exam-prep/exam-prep.db)
    #[arg(long, env = "EXAM_PREP_DB")]
    pub db: Option<PathBuf>,

    /// Subject to open with; otherwise the last one used
    #[arg(long, short = 's')]
    pub subject: Option<String>,

    /// Log file (default: exam-prep.log next to the database)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_file: PathBuf,
    pub subject: Option<String>,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let db_path = cli.db.unwrap_or_else(get_db_path);
        let log_file = cli.log_file.unwrap_or_else(|| {
            db_path
                .parent()
                .map(|dir| dir.join("exam-prep.log"))
                .unwrap_or_else(|| PathBuf::from("exam-prep.log"))
        });
        Config {
            data_dir: cli.data_dir,
            db_path,
            log_file,
            subject: cli.subject,
            log_level: crate::logger::level_from_verbosity(cli.verbose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::try_parse_from([
            "exam-prep",
            "--data-dir",
            "/banks",
            "--db",
            "/tmp/quiz/state.db",
            "-s",
            "bio",
            "-vv",
        ])
        .unwrap();
        let config = Config::from_cli(cli);

        assert_eq!(config.data_dir, PathBuf::from("/banks"));
        assert_eq!(config.db_path, PathBuf::from("/tmp/quiz/state.db"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/quiz/exam-prep.log"));
        assert_eq!(config.subject.as_deref(), Some("bio"));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_log_file_override() {
        let cli = Cli::try_parse_from([
            "exam-prep",
            "--db",
            "/tmp/quiz/state.db",
            "--log-file",
            "/var/log/quiz.log",
        ])
        .unwrap();
        let config = Config::from_cli(cli);

        assert_eq!(config.log_file, PathBuf::from("/var/log/quiz.log"));
        assert_eq!(config.subject, None);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["exam-prep", "--bogus"]).is_err());
    }
}
