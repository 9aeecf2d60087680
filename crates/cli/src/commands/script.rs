use crate::util::{CliResult, read_recipe};
use clap::Args;
use std::path::PathBuf;
use xpathkit_builder::Recipe;
use xpathkit_lookup::script;

#[derive(Args, Debug, Clone)]
pub struct ScriptArgs {
    /// Recipe file, `-` for stdin.
    #[arg(value_name = "RECIPE", default_value = "-")]
    pub recipe: PathBuf,
    /// Return every match instead of the first one.
    #[arg(long)]
    pub all: bool,
    /// Fail instead of embedding a malformed query.
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: &ScriptArgs) -> CliResult<String> {
    let recipe = read_recipe(&args.recipe)?;
    lookup_script(&recipe, args)
}

pub(crate) fn lookup_script(recipe: &Recipe, args: &ScriptArgs) -> CliResult<String> {
    let expression = recipe.build();
    let query = if args.strict { expression.try_render()? } else { expression.render() };
    Ok(if args.all { script::all_matches(&query) } else { script::first_match(&query) })
}
