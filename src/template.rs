//! Solution templates and placeholder substitution.

use crate::error::{Error, Result};
use crate::problem::ProblemInfo;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

pub const START_MARKER: &str = "// cftemplate start";
pub const END_MARKER: &str = "// cftemplate end";

const HEADER: &str = "\
// Problem: {{PROBLEM_NAME}}
// Contest: {{CONTEST_ID}}
// URL: {{PROBLEM_URL}}
// Memory Limit: {{MEMORY_LIMIT}} MB
// Time Limit: {{TIME_LIMIT}} seconds
// Difficulty: {{DIFFICULTY}}
// Date: {{CURRENT_DATE}}

";

pub const SKELETON: &str = "\
{{HEADER}}#![allow(dead_code, unused_imports, unused_macros, unused_variables)]

// cftemplate start
{{LIBRARY}}
// cftemplate end

fn solve<W: std::io::Write>(sc: &mut Scanner, out: &mut W) {
    // Write the solution here.
}

fn main() {
    let mut sc = Scanner::new(std::io::stdin().lock());
    let mut out = stdout_writer();

    let t: usize = {{TEST_COUNT}};
    for _ in 0..t {
        solve(&mut sc, &mut out);
    }
    std::io::Write::flush(&mut out).unwrap();
}
";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum TemplateKind {
    /// Aliases, macros, constants and fast I/O.
    Basic,
    /// Basic plus number theory and data structures.
    Advanced,
}

impl TemplateKind {
    pub fn modules(self) -> &'static [&'static str] {
        match self {
            TemplateKind::Basic => &["prelude", "macros", "scanner", "output"],
            TemplateKind::Advanced => &[
                "prelude",
                "macros",
                "scanner",
                "output",
                "num",
                "combination",
                "union_find",
                "segment_tree",
                "bit",
                "binary_search",
            ],
        }
    }
}

/// Replaces `{{NAME}}` placeholders in one pass. Unknown ones are kept as is.
pub fn render(template: &str, variables: &BTreeMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = caps[1].trim();
            match variables.get(key) {
                Some(value) => value.to_owned(),
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}

pub fn variables(
    problem: Option<&ProblemInfo>,
    library: &str,
    single: bool,
) -> BTreeMap<&'static str, String> {
    let mut vars = BTreeMap::new();
    let header = match problem {
        Some(problem) => {
            let problem_vars = problem.variables();
            let header = render(HEADER, &problem_vars);
            vars.extend(problem_vars);
            header
        }
        None => String::new(),
    };
    vars.insert("HEADER", header);
    vars.insert("LIBRARY", library.to_owned());
    vars.insert(
        "TEST_COUNT",
        if single { "1" } else { "sc.read()" }.to_owned(),
    );
    vars
}

/// Reads a custom template, falling back to the built-in skeleton.
pub fn load_template(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                "Failed to read template {}: {}. Using the built-in one.",
                path.display(),
                err
            );
            SKELETON.to_owned()
        }
    }
}

/// Replaces lines between the markers with `library`.
/// Returns None unless a start marker is followed by an end marker.
pub fn splice(text: &str, library: &str) -> Option<String> {
    let lines = text.lines().collect::<Vec<_>>();
    let start = lines.iter().position(|line| line.trim() == START_MARKER)?;
    let end = start + lines[start..].iter().position(|line| line.trim() == END_MARKER)?;

    let mut out = String::new();
    for line in &lines[..=start] {
        out += line;
        out += "\n";
    }
    if !library.is_empty() {
        out += library;
        out += "\n";
    }
    for line in &lines[end..] {
        out += line;
        out += "\n";
    }
    Some(out)
}

/// Updates the marked region of an existing solution file.
pub fn install_into(path: &Path, library: &str) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
    let updated = splice(&text, library).ok_or_else(|| Error::MissingMarkers {
        path: path.to_owned(),
    })?;
    fs::write(path, updated).map_err(|err| Error::io(path, err))?;
    info!("Updated {}", path.display());
    Ok(())
}
