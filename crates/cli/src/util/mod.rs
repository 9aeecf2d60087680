use anyhow::Context;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use xpathkit_builder::Recipe;

pub type CliResult<T> = anyhow::Result<T>;

/// Reads a recipe from `source`, or from stdin when `source` is `-`.
pub fn read_recipe(source: &Path) -> CliResult<Recipe> {
    if source.as_os_str() == "-" {
        tracing::debug!("reading recipe from stdin");
        return Recipe::from_reader(io::stdin().lock()).context("failed to read recipe from stdin");
    }
    tracing::debug!(path = %source.display(), "reading recipe file");
    let file = File::open(source)
        .with_context(|| format!("cannot open recipe {}", source.display()))?;
    Recipe::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to read recipe {}", source.display()))
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
pub(crate) fn strip_ansi(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }
    result
}
