#[macro_use]
extern crate log;

mod config;
mod error;
mod problem;
mod project;
mod template;

use clap::Parser;
use config::{Cli, Command, InstallArgs, ListArgs, NewArgs};
use error::{Error, Result};
use problem::ProblemInfo;
use project::Library;
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::process;

fn list_lines(library: &Library, args: &ListArgs) -> Result<Vec<String>> {
    let entries = if args.mod_names.is_empty() {
        library
            .entries()
            .iter()
            .filter(|entry| !entry.mod_path.is_empty())
            .collect::<Vec<_>>()
    } else {
        args.mod_names
            .iter()
            .map(|name| {
                library
                    .find(name)
                    .ok_or_else(|| Error::UnknownModule(name.to_owned()))
            })
            .collect::<Result<Vec<_>>>()?
    };

    let mut lines = vec![library.src_path().display().to_string()];
    for entry in entries {
        let deps = library.dependencies(entry);
        let file_path = entry
            .file_path
            .strip_prefix(library.src_path())
            .unwrap_or(&entry.file_path);

        let mut line = format!("  {} [{}]", entry.qualified_name(), file_path.display());
        if !deps.is_empty() {
            line += &format!(" (uses {})", deps.join(", "));
        }
        if let Some(doc) = &entry.doc {
            line += &format!(": {}", doc);
        }
        lines.push(line);
    }
    Ok(lines)
}

fn list(library: &Library, args: &ListArgs) -> Result<()> {
    for line in list_lines(library, args)? {
        println!("{}", line);
    }
    Ok(())
}

fn install(library: &Library, args: &InstallArgs) -> Result<()> {
    let code = library.bundle(&args.mod_names)?;
    match &args.into {
        Some(path) => template::install_into(path, &code),
        None => {
            println!("{}", code);
            Ok(())
        }
    }
}

/// Writes a new file. An existing one is kept unless `force` is set.
fn write_new_file(path: &Path, content: &str, force: bool) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|err| Error::io(dir, err))?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options.open(path).map_err(|err| match err.kind() {
        io::ErrorKind::AlreadyExists => Error::Exists {
            path: path.to_owned(),
        },
        _ => Error::io(path, err),
    })?;
    file.write_all(content.as_bytes())
        .map_err(|err| Error::io(path, err))
}

/// Renders a solution. `--save` places it under `base`.
fn new(library: &Library, args: &NewArgs, base: &Path) -> Result<()> {
    let problem = match &args.problem {
        Some(path) => Some(ProblemInfo::load(path)?),
        None => None,
    };

    let text = match &args.template {
        Some(path) => template::load_template(path),
        None => template::SKELETON.to_owned(),
    };

    let mut mod_names = args
        .kind
        .modules()
        .iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    mod_names.extend(args.with.iter().cloned());
    let code = library.bundle(&mod_names)?;

    let variables = template::variables(problem.as_ref(), &code, args.single);
    let rendered = template::render(&text, &variables);

    // clap makes --save require --problem.
    let output = match (&args.output, &problem) {
        (Some(path), _) => Some(path.to_owned()),
        (None, Some(problem)) if args.save => Some(problem.default_path(base)),
        (None, _) => None,
    };

    match output {
        Some(path) => {
            write_new_file(&path, &rendered, args.force)?;
            info!("Wrote {}", path.display());
            eprintln!("{}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let lib_path = cli.lib_path();
    debug!("Library at {}", lib_path.display());
    let library = Library::load(&lib_path)?;

    match &cli.command {
        Command::New(args) => {
            let cwd = env::current_dir().map_err(|err| Error::io(".", err))?;
            new(&library, args, &cwd)
        }
        Command::Install(args) => install(&library, args),
        Command::List(args) => list(&library, args),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    trace!("{:?}", cli);

    if let Err(err) = run(cli) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
