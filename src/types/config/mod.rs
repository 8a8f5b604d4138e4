use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Settings that can live in a config file instead of the command line
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// dpkg administrative directory, relative to root
    pub admindir: Option<PathBuf>,
    /// Explicit status database, used as-is
    pub status: Option<PathBuf>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .context(format!("Failed to read config file at {}", path.display()))?;
        let config: Config = toml::from_str(&data)
            .context(format!("Failed to parse config file at {}", path.display()))?;
        Ok(config)
    }
}

#[derive(Parser)]
#[clap(about, version, author)]
pub struct Opts {
    #[clap(long, default_value = "/", help = "Root directory for operation")]
    pub root: PathBuf,
    #[clap(
        long,
        help = "dpkg administrative directory, relative to root [default: var/lib/dpkg]"
    )]
    pub admindir: Option<PathBuf>,
    #[clap(long, help = "Read this status database instead of the one in admindir")]
    pub status: Option<PathBuf>,
    #[clap(long, help = "Read settings from this TOML file")]
    pub config: Option<PathBuf>,
    #[clap(short, long, help = "Print additional debug information")]
    pub verbose: bool,
    #[clap(subcommand)]
    pub subcmd: SubCmd,
}

impl Opts {
    /// Location of the status database. Command line beats config file,
    /// an explicit status file beats admindir.
    pub fn status_path(&self, config: &Config) -> PathBuf {
        if let Some(status) = self.status.as_ref().or(config.status.as_ref()) {
            return status.clone();
        }
        let admindir = self
            .admindir
            .as_deref()
            .or(config.admindir.as_deref())
            .unwrap_or_else(|| Path::new(crate::DEFAULT_ADMINDIR));
        // Keep absolute admindirs inside root as well
        let admindir = admindir.strip_prefix("/").unwrap_or(admindir);
        self.root.join(admindir).join(crate::STATUS_FILE)
    }
}

#[derive(Parser)]
pub enum SubCmd {
    /// Show dependencies of an installed package
    Depends(DependsPkg),
    /// List installed packages
    List,
    /// Show the full record of an installed package
    Show(ShowPkg),
    /// Search installed packages by name and description
    Search(SearchPkg),
}

#[derive(Parser)]
pub struct DependsPkg {
    /// Name of an installed package
    pub name: String,
    /// Relationship field to read, like Pre-Depends or Recommends
    #[clap(long, default_value = "Depends")]
    pub field: String,
    /// Print the list on one line, in control file syntax
    #[clap(long)]
    pub inline: bool,
}

#[derive(Parser)]
pub struct ShowPkg {
    /// Name of an installed package
    pub name: String,
}

#[derive(Parser)]
pub struct SearchPkg {
    /// Matched against package names and descriptions
    pub keyword: String,
}

#[cfg(test)]
mod test {
    use super::*;

    fn opts(args: &[&str]) -> Opts {
        let mut argv = vec!["dpkg-deps"];
        argv.extend_from_slice(args);
        argv.push("list");
        Opts::parse_from(argv)
    }

    #[test]
    fn default_status_path() {
        let opts = opts(&[]);
        assert_eq!(
            opts.status_path(&Config::default()),
            PathBuf::from("/var/lib/dpkg/status")
        );
    }

    #[test]
    fn root_and_admindir() {
        let opts = opts(&["--root", "/mnt/target", "--admindir", "/srv/dpkg"]);
        assert_eq!(
            opts.status_path(&Config::default()),
            PathBuf::from("/mnt/target/srv/dpkg/status")
        );
    }

    #[test]
    fn command_line_beats_config() {
        let config: Config =
            toml::from_str("admindir = \"var/lib/other\"\nstatus = \"/tmp/status\"").unwrap();
        assert_eq!(opts(&[]).status_path(&config), PathBuf::from("/tmp/status"));
        assert_eq!(
            opts(&["--status", "fixtures/status"]).status_path(&config),
            PathBuf::from("fixtures/status")
        );

        let config: Config = toml::from_str("admindir = \"var/lib/other\"").unwrap();
        assert_eq!(
            opts(&[]).status_path(&config),
            PathBuf::from("/var/lib/other/status")
        );
        assert_eq!(
            opts(&["--admindir", "x"]).status_path(&config),
            PathBuf::from("/x/status")
        );
    }

    #[test]
    fn reject_unknown_config_keys() {
        assert!(toml::from_str::<Config>("arch = \"amd64\"").is_err());
        assert_eq!(toml::from_str::<Config>("").unwrap(), Config::default());
    }

    #[test]
    fn parse_subcommands() {
        let opts = Opts::parse_from([
            "dpkg-deps",
            "-v",
            "depends",
            "apache2-bin",
            "--field",
            "Recommends",
        ]);
        assert!(opts.verbose);
        match opts.subcmd {
            SubCmd::Depends(req) => {
                assert_eq!(req.name, "apache2-bin");
                assert_eq!(req.field, "Recommends");
                assert!(!req.inline);
            }
            _ => panic!("expected depends"),
        }
    }
}
