use crate::OutputFormat;
use crate::util::{CliResult, read_recipe};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use xpathkit_builder::{Recipe, XPathExpression};

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Recipe file, `-` for stdin.
    #[arg(value_name = "RECIPE", default_value = "-")]
    pub recipe: PathBuf,
    /// Print the fragment form without the leading `//`.
    #[arg(long)]
    pub fragment: bool,
    /// Fail instead of printing a malformed query.
    #[arg(long)]
    pub strict: bool,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize, Debug, PartialEq)]
pub(crate) struct RenderSummary {
    query: String,
    fragment: String,
    dangling_connective: bool,
    issues: Vec<String>,
}

impl RenderSummary {
    fn from_expression(expression: &XPathExpression) -> Self {
        Self {
            query: expression.render(),
            fragment: expression.render_fragment(),
            dangling_connective: expression.has_dangling_connective(),
            issues: expression.issues().iter().map(ToString::to_string).collect(),
        }
    }
}

pub fn run(args: &RenderArgs) -> CliResult<String> {
    let recipe = read_recipe(&args.recipe)?;
    render_recipe(&recipe, args)
}

pub(crate) fn render_recipe(recipe: &Recipe, args: &RenderArgs) -> CliResult<String> {
    let expression = recipe.build();
    if args.strict {
        if args.fragment {
            expression.try_render_fragment()?;
        } else {
            expression.try_render()?;
        }
    } else {
        for issue in expression.issues() {
            tracing::warn!(%issue, "rendered query is malformed");
        }
        if expression.has_dangling_connective() {
            tracing::warn!("predicate ends with a dangling connective");
        }
    }

    let output = match args.format {
        OutputFormat::Text if args.fragment => expression.render_fragment(),
        OutputFormat::Text => expression.render(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&RenderSummary::from_expression(&expression))?
        }
    };
    Ok(output)
}
