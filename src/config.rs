//! Defines data structures of command line arguments.

use crate::project;
use crate::template::TemplateKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cftemplate", version, author, about)]
pub struct Cli {
    /// Path to the snippet library source directory (defaults to ./template-lib/src)
    #[arg(long, value_name = "DIR", global = true)]
    pub lib_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a new solution file
    New(NewArgs),
    /// Bundle snippet mods, printing them or updating a solution in place
    Install(InstallArgs),
    /// List mods of the snippet library
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct NewArgs {
    #[arg(short, long, value_enum, default_value_t = TemplateKind::Basic)]
    pub kind: TemplateKind,

    /// Custom template file with {{PLACEHOLDER}}s
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Problem metadata in TOML
    #[arg(short, long, value_name = "FILE")]
    pub problem: Option<PathBuf>,

    /// Extra mods to include
    #[arg(short, long = "with", value_name = "MOD")]
    pub with: Vec<String>,

    /// Solve a single test case instead of reading the count
    #[arg(long)]
    pub single: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE", conflicts_with = "save")]
    pub output: Option<PathBuf>,

    /// Write to codeforces/contest_<id>/problem_<index>/main.rs
    #[arg(long, requires = "problem")]
    pub save: bool,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Mod to be included
    #[arg(value_name = "MOD", required = true)]
    pub mod_names: Vec<String>,

    /// Solution file whose marked region is replaced
    #[arg(short, long, value_name = "FILE")]
    pub into: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Mods to show (defaults to all)
    #[arg(value_name = "MOD")]
    pub mod_names: Vec<String>,
}

impl Cli {
    pub fn lib_path(&self) -> PathBuf {
        if let Some(lib_path) = &self.lib_path {
            return lib_path.to_owned();
        }

        if let Some(root_path) = project::project_root_path() {
            let lib_path = root_path.join("template-lib").join("src");
            if lib_path.is_dir() {
                return lib_path;
            }
        }

        trace!("Use the library bundled at build time");
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("template-lib")
            .join("src")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_new() {
        let cli = Cli::parse_from([
            "cftemplate",
            "new",
            "--kind",
            "advanced",
            "-w",
            "num",
            "--with",
            "bit",
            "--single",
        ]);
        match cli.command {
            Command::New(args) => {
                assert_eq!(args.kind, TemplateKind::Advanced);
                assert_eq!(args.with, vec!["num".to_owned(), "bit".to_owned()]);
                assert!(args.single);
                assert!(!args.save);
                assert!(!args.force);
            }
            command => panic!("unexpected {:?}", command),
        }
    }

    #[test]
    fn test_parse_install() {
        let cli = Cli::parse_from(["cftemplate", "install", "bit", "union_find", "--lib-path", "lib"]);
        assert_eq!(cli.lib_path(), PathBuf::from("lib"));
        match cli.command {
            Command::Install(args) => {
                assert_eq!(args.mod_names, vec!["bit".to_owned(), "union_find".to_owned()]);
                assert_eq!(args.into, None);
            }
            command => panic!("unexpected {:?}", command),
        }
    }

    #[test]
    fn test_parse_new_force() {
        let cli = Cli::parse_from(["cftemplate", "new", "-o", "main.rs", "-f"]);
        match cli.command {
            Command::New(args) => {
                assert_eq!(args.output, Some(PathBuf::from("main.rs")));
                assert!(args.force);
            }
            command => panic!("unexpected {:?}", command),
        }
    }

    #[test]
    fn test_save_requires_problem() {
        assert!(Cli::try_parse_from(["cftemplate", "new", "--save"]).is_err());
        assert!(Cli::try_parse_from(["cftemplate", "install"]).is_err());
        assert!(Cli::try_parse_from(["cftemplate", "list"]).is_ok());
    }
}
