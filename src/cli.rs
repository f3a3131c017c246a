use crate::config::ThresholdConfig;
use crate::error::Result;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Delete older files from trash folders system wide.
#[derive(Parser, Debug)]
#[command(name = "trash-sweep", version, infer_long_args = true)]
pub struct Cli {
    /// File age in days
    #[arg(long = "age", value_name = "DAYS", default_value_t = 365.0)]
    pub min_age: f64,

    /// Min file size in MB to be considered 'large'
    #[arg(long = "largesize", value_name = "MB", default_value_t = 100.0)]
    pub large_min_size: f64,

    /// Large file age in days
    #[arg(long = "largeage", value_name = "DAYS", default_value_t = 64.0)]
    pub large_min_age: f64,

    /// Actually delete files. Without this flag nothing is removed.
    #[arg(long)]
    pub destroy: bool,

    /// List each file deleted
    #[arg(short, long)]
    pub verbose: bool,

    /// Sweep these directories instead of discovering trash folders
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,
}

impl Cli {
    /// Parse the process arguments after normalizing flag spelling.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn thresholds(&self) -> Result<ThresholdConfig> {
        Ok(
            ThresholdConfig::from_days(self.min_age, self.large_min_size, self.large_min_age)?
                .with_destroy(self.destroy)
                .with_verbose(self.verbose),
        )
    }
}

/// Lower-case flag words and turn single-dash long flags into double-dash
/// ones, so `-AGE 30` reads as `--age 30`. Values are left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.into_string() {
            Ok(word) => OsString::from(normalize_word(&word)),
            Err(raw) => raw,
        })
        .collect()
}

fn normalize_word(word: &str) -> String {
    if !word.starts_with('-') {
        return word.to_string();
    }

    let (flag, value) = match word.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (word, None),
    };
    let mut flag = flag.to_lowercase();

    let name = &flag[1..];
    let is_single_dash_long =
        name.len() >= 2 && name.chars().all(|c| c.is_ascii_alphabetic());
    if is_single_dash_long {
        flag.insert(0, '-');
    }

    match value {
        Some(value) => format!("{}={}", flag, value),
        None => flag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(args: &[&str]) -> Vec<String> {
        normalize_args(args.iter().copied())
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_normalize_single_dash_long_flags() {
        assert_eq!(
            normalized(&["trash-sweep", "-AGE", "30", "-Destroy", "-v"]),
            vec!["trash-sweep", "--age", "30", "--destroy", "-v"]
        );
    }

    #[test]
    fn test_normalize_keeps_values_and_negative_numbers() {
        assert_eq!(
            normalized(&["trash-sweep", "--ROOT=/Mnt/Trash", "--age", "-5"]),
            vec!["trash-sweep", "--root=/Mnt/Trash", "--age", "-5"]
        );
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["trash-sweep"]);
        let config = cli.thresholds().unwrap();
        assert_eq!(config, ThresholdConfig::default());
        assert!(cli.roots.is_empty());
    }

    #[test]
    fn test_parse_abbreviated_flags() {
        let cli = Cli::parse_from(normalize_args([
            "trash-sweep",
            "--dest",
            "-largesize",
            "50",
            "--root",
            "/tmp/a",
            "--root",
            "/tmp/b",
        ]));
        assert!(cli.destroy);
        assert_eq!(cli.large_min_size, 50.0);
        assert_eq!(cli.roots, vec![PathBuf::from("/tmp/a"), PathBuf::from("/tmp/b")]);
    }
}
