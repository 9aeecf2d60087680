use crate::util::{CliResult, read_recipe, yes_no};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Write;
use std::path::PathBuf;
use xpathkit_builder::{PredicateToken, Recipe, XPathExpression};

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Recipe file, `-` for stdin.
    #[arg(value_name = "RECIPE", default_value = "-")]
    pub recipe: PathBuf,
}

pub fn run(args: &InspectArgs) -> CliResult<String> {
    let recipe = read_recipe(&args.recipe)?;
    Ok(inspect_recipe(&recipe))
}

pub(crate) fn inspect_recipe(recipe: &Recipe) -> String {
    render_inspection(&recipe.build())
}

fn colorize_query(query: &str) -> String {
    query
        .if_supports_color(Stream::Stdout, |text| text.bold().fg_rgb::<79, 166, 255>().to_string())
        .to_string()
}

fn colorize_clause(clause: &str) -> String {
    clause
        .if_supports_color(Stream::Stdout, |text| text.fg_rgb::<136, 192, 74>().to_string())
        .to_string()
}

fn colorize_connective(connective: &str) -> String {
    connective.if_supports_color(Stream::Stdout, |text| text.dimmed().to_string()).to_string()
}

fn colorize_issue(issue: &str) -> String {
    issue
        .if_supports_color(Stream::Stdout, |text| text.fg_rgb::<241, 149, 255>().to_string())
        .to_string()
}

pub(crate) fn render_inspection(expression: &XPathExpression) -> String {
    let mut output = String::new();
    let _ = writeln!(&mut output, "{}", colorize_query(&expression.render()));
    let tag = if expression.tag_name().is_empty() { "(none)" } else { expression.tag_name() };
    let _ = writeln!(&mut output, "tag: {tag}");

    if !expression.predicates().is_empty() {
        let _ = writeln!(&mut output, "predicate:");
        for token in expression.predicates() {
            match token {
                PredicateToken::Clause(clause) => {
                    let _ = writeln!(&mut output, "    {}", colorize_clause(clause));
                }
                PredicateToken::Connective(connective) => {
                    let _ = writeln!(&mut output, "  {}", colorize_connective(connective.as_str()));
                }
            }
        }
    }

    if !expression.path().is_empty() {
        let _ = writeln!(&mut output, "path:");
        for segment in expression.path() {
            let _ = writeln!(&mut output, "    /{segment}");
        }
    }

    let _ = writeln!(
        &mut output,
        "dangling connective: {}",
        yes_no(expression.has_dangling_connective())
    );
    for issue in expression.issues() {
        let _ = writeln!(&mut output, "issue: {}", colorize_issue(&issue.to_string()));
    }

    output.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::strip_ansi;
    use rstest::rstest;
    use xpathkit_builder::Placement;

    #[rstest]
    fn lists_tokens_and_segments() {
        let expression = XPathExpression::from("div")
            .where_position(2)
            .or()
            .where_attribute("class", "x")
            .where_child("span", Placement::Path);
        let plain = strip_ansi(&render_inspection(&expression));
        let lines: Vec<_> = plain.lines().collect();
        assert_eq!(
            lines,
            [
                "//div[position() = 2 or @class='x']/child::span",
                "tag: div",
                "predicate:",
                "    position() = 2",
                "  or",
                "    @class='x'",
                "path:",
                "    /child::span",
                "dangling connective: no",
            ]
        );
    }

    #[rstest]
    fn reports_issues() {
        let recipe = Recipe::from_json(
            r#"{ "steps": [ { "op": "any", "value": "a'b\"" }, { "op": "and" } ] }"#,
        )
        .expect("recipe");
        let plain = strip_ansi(&inspect_recipe(&recipe));
        assert!(plain.contains("tag: (none)"));
        assert!(plain.contains("dangling connective: yes"));
        assert!(plain.contains("issue: literal"));
    }
}
