use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// `$BANKLINE_HOME`, or `~/.bankline`.
pub fn bankline_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BANKLINE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".bankline"))
}

pub fn ensure_bankline_home() -> Result<PathBuf> {
    let dir = bankline_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Message source for `ingest`: a file, or stdin when no path is given.
pub fn open_inbox(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) => {
            let f = fs::File::open(p).with_context(|| format!("open {}", p.display()))?;
            Ok(Box::new(BufReader::new(f)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// One inbox line is one notification; a literal `\n` stands for a line break
/// inside a multi-line message.
pub fn unescape_message(line: &str) -> String {
    line.trim_end_matches(['\r', '\n']).replace("\\n", "\n")
}
