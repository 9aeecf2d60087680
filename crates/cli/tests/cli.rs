use clap::Parser;
use rstest::{fixture, rstest};
use std::io::Write;
use tempfile::NamedTempFile;
use xpathkit_cli::{Cli, Commands, LogLevel, OutputFormat, execute};

#[fixture]
fn login_recipe() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{
            "tag": "input",
            "steps": [
                {{ "op": "attribute", "name": "type", "value": "password" }},
                {{ "op": "or" }},
                {{ "op": "attribute-contains", "name": "name", "value": "pass" }}
            ]
        }}"#
    )
    .expect("write recipe");
    file
}

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    execute(&cli)
}

#[rstest]
fn render_prints_query(login_recipe: NamedTempFile) {
    let path = login_recipe.path().to_str().expect("utf-8 path");
    let output = run(&["xpathkit", "render", path]).expect("render");
    assert_eq!(output, "//input[@type='password' or contains(@name,'pass')]");
}

#[rstest]
fn render_fragment_drops_root_prefix(login_recipe: NamedTempFile) {
    let path = login_recipe.path().to_str().expect("utf-8 path");
    let output = run(&["xpathkit", "render", "--fragment", path]).expect("render");
    assert_eq!(output, "input[@type='password' or contains(@name,'pass')]");
}

#[rstest]
fn render_json_reports_summary(login_recipe: NamedTempFile) {
    let path = login_recipe.path().to_str().expect("utf-8 path");
    let output = run(&["xpathkit", "render", "--format", "json", path]).expect("render");
    let json: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(json["fragment"], "input[@type='password' or contains(@name,'pass')]");
    assert_eq!(json["dangling_connective"], false);
}

#[rstest]
fn script_embeds_query(login_recipe: NamedTempFile) {
    let path = login_recipe.path().to_str().expect("utf-8 path");
    let output = run(&["xpathkit", "script", "--all", path]).expect("script");
    assert!(output.contains("//input[@type='password' or contains(@name,'pass')]"));
    assert!(output.contains("ORDERED_NODE_SNAPSHOT_TYPE"));
}

#[rstest]
fn inspect_lists_connective(login_recipe: NamedTempFile) {
    let path = login_recipe.path().to_str().expect("utf-8 path");
    let output = run(&["xpathkit", "inspect", path]).expect("inspect");
    assert!(output.contains("tag: input"));
    assert!(output.contains("or"));
    assert!(output.contains("dangling connective: no"));
}

#[rstest]
fn missing_recipe_file_is_reported() {
    let error = run(&["xpathkit", "render", "/nonexistent/recipe.json"]).expect_err("missing file");
    assert!(error.to_string().contains("cannot open recipe"));
}

#[rstest]
fn malformed_recipe_is_reported() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "tag": "a", "steps": [ {{ "op": "teleport" }} ] }}"#).expect("write");
    let path = file.path().to_str().expect("utf-8 path");
    let error = run(&["xpathkit", "render", path]).expect_err("bad recipe");
    assert!(format!("{error:#}").contains("invalid recipe"));
}

#[rstest]
fn parses_global_options() {
    let cli = Cli::try_parse_from(["xpathkit", "render", "--log-level", "debug", "--format", "json", "r.json"])
        .expect("parse");
    assert_eq!(cli.log_level, Some(LogLevel::Debug));
    match cli.command {
        Commands::Render(args) => {
            assert_eq!(args.format, OutputFormat::Json);
            assert_eq!(args.recipe.to_str(), Some("r.json"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}
