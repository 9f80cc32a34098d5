//! Problem metadata filled into template placeholders.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProblemInfo {
    pub name: String,
    pub contest_id: u32,
    pub index: String,
    /// Seconds.
    #[serde(default)]
    pub time_limit: Option<f64>,
    /// Megabytes.
    #[serde(default)]
    pub memory_limit: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<u32>,
    #[serde(default)]
    pub samples: Vec<Sample>,
}

fn format_sample_io(content: &str) -> String {
    content
        .lines()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "Unknown".to_owned())
}

impl ProblemInfo {
    pub fn load(path: &Path) -> Result<ProblemInfo> {
        let content = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        toml::from_str(&content).map_err(|source| Error::Problem {
            path: path.to_owned(),
            source,
        })
    }

    pub fn url(&self) -> String {
        format!(
            "https://codeforces.com/contest/{}/problem/{}",
            self.contest_id, self.index
        )
    }

    /// Where `new --save` puts the solution, relative to `base`.
    pub fn default_path(&self, base: &Path) -> PathBuf {
        base.join("codeforces")
            .join(format!("contest_{}", self.contest_id))
            .join(format!("problem_{}", self.index))
            .join("main.rs")
    }

    pub fn variables(&self) -> BTreeMap<&'static str, String> {
        let sample = self.samples.first();
        let mut vars = BTreeMap::new();
        vars.insert("PROBLEM_NAME", self.name.to_owned());
        vars.insert("PROBLEM_URL", self.url());
        vars.insert("TIME_LIMIT", or_unknown(self.time_limit));
        vars.insert("MEMORY_LIMIT", or_unknown(self.memory_limit));
        vars.insert("PROBLEM_INDEX", self.index.to_owned());
        vars.insert("CONTEST_ID", self.contest_id.to_string());
        vars.insert("DIFFICULTY", or_unknown(self.difficulty));
        vars.insert(
            "CURRENT_DATE",
            chrono::Local::now().format("%Y-%m-%d").to_string(),
        );
        vars.insert(
            "SAMPLE_INPUT",
            sample.map_or_else(String::new, |s| format_sample_io(&s.input)),
        );
        vars.insert(
            "SAMPLE_OUTPUT",
            sample.map_or_else(String::new, |s| format_sample_io(&s.output)),
        );
        vars
    }
}
