//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;
use lexgame_core::Competition;

/// Config file looked up when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "lexgame-config.yaml";

/// Run lexgame experiments.
#[derive(Debug, Parser)]
#[command(name = "lexgame-engine", version, about, long_about = None)]
pub struct Cli {
    /// Experiment configuration file [default: lexgame-config.yaml]
    pub config: Option<PathBuf>,

    /// Log at debug level, including per-episode traces.
    #[arg(long)]
    pub debug: bool,

    /// Play one trial and follow the forms competing for this object.
    #[arg(long, value_name = "OBJECT")]
    pub competition: Option<usize>,

    /// Agent whose forms `--competition` follows.
    #[arg(long, value_name = "AGENT", default_value_t = 0, requires = "competition")]
    pub agent: usize,
}

impl Cli {
    /// The configuration file to read.
    pub fn config_path(&self) -> &Path {
        self.config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Whether the path was given explicitly, in which case it must exist.
    pub const fn explicit_config(&self) -> bool {
        self.config.is_some()
    }

    /// The requested form competition, if any.
    pub fn competition(&self) -> Option<Competition> {
        self.competition.map(|object| Competition {
            agent: self.agent,
            object,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(core::iter::once("lexgame-engine").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_without_arguments() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.config_path(), Path::new(DEFAULT_CONFIG_PATH));
        assert!(!cli.debug);
        assert!(!cli.explicit_config());
        assert!(cli.competition().is_none());
    }

    #[test]
    fn config_and_debug_in_any_order() {
        for args in [["run.yaml", "--debug"], ["--debug", "run.yaml"]] {
            let cli = parse(&args).unwrap();
            assert_eq!(cli.config_path(), Path::new("run.yaml"));
            assert!(cli.debug);
            assert!(cli.explicit_config());
        }
    }

    #[test]
    fn rejects_unknown_flags_and_extra_paths() {
        assert_eq!(
            parse(&["--fast"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert!(parse(&["a.yaml", "b.yaml"]).is_err());
    }

    #[test]
    fn help_is_generated() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--competition"));
    }

    #[test]
    fn competition_takes_object_and_agent() {
        let cli = parse(&["--competition", "3", "--agent", "1"]).unwrap();
        assert_eq!(
            cli.competition(),
            Some(Competition {
                agent: 1,
                object: 3
            })
        );
        assert_eq!(
            parse(&["--competition", "2"]).unwrap().competition(),
            Some(Competition {
                agent: 0,
                object: 2
            })
        );
        assert_eq!(
            parse(&["--agent", "1"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert!(parse(&["--competition", "x"]).is_err());
    }
}
