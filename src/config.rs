//! Startup configuration, resolved once from the command line and environment.

use crate::statics;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "plistview", version, about = "View binary and XML property lists")]
pub struct Cli {
    /// Files to preload into the file list.
    pub files: Vec<PathBuf>,

    /// Disable drag-and-drop of files onto the window.
    #[arg(long)]
    pub no_drop: bool,

    /// Print each file's decoded JSON to stdout instead of opening a window.
    #[arg(long)]
    pub dump: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub files: Vec<PathBuf>,
    pub drag_and_drop: bool,
    pub dump: bool,
}

impl ViewerConfig {
    /// `env_no_dnd` is the value of `PLISTVIEW_NO_DND`, if set.
    pub fn resolve(cli: Cli, env_no_dnd: Option<&str>) -> Self {
        Self {
            files: cli.files,
            drag_and_drop: !cli.no_drop && !env_flag_set(env_no_dnd),
            dump: cli.dump,
        }
    }

    pub fn from_env() -> Self {
        let env = std::env::var(statics::ENV_NO_DND).ok();
        Self::resolve(Cli::parse(), env.as_deref())
    }
}

fn env_flag_set(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, ViewerConfig};
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("plistview").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_arguments_start_empty_with_drop_enabled() {
        let cfg = ViewerConfig::resolve(parse(&[]), None);
        assert!(cfg.files.is_empty());
        assert!(cfg.drag_and_drop);
        assert!(!cfg.dump);
    }

    #[test]
    fn files_keep_argument_order() {
        let cfg = ViewerConfig::resolve(parse(&["b.plist", "a.plist", "--dump"]), None);
        assert_eq!(
            cfg.files,
            vec![PathBuf::from("b.plist"), PathBuf::from("a.plist")]
        );
        assert!(cfg.dump);
    }

    #[test]
    fn drag_and_drop_can_be_disabled() {
        assert!(!ViewerConfig::resolve(parse(&["--no-drop"]), None).drag_and_drop);
        assert!(!ViewerConfig::resolve(parse(&[]), Some("1")).drag_and_drop);
        assert!(!ViewerConfig::resolve(parse(&[]), Some("yes")).drag_and_drop);
        assert!(ViewerConfig::resolve(parse(&[]), Some("0")).drag_and_drop);
        assert!(ViewerConfig::resolve(parse(&[]), Some("")).drag_and_drop);
    }
}
