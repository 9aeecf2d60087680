//! JavaScript snippets for drivers that resolve XPath through
//! `document.evaluate` instead of a native lookup.

use crate::error::LookupError;
use serde_json::Value;
use xpathkit_builder::XPathExpression;

/// Replaces `window.alert` with a no-op and keeps the original around.
pub const DISABLE_ALERT: &str =
    "window.oldAlert = window.alert; window.alert = function () {}; return true;";

/// Puts the saved `window.alert` back. Returns `true` when nothing was saved.
pub const RESTORE_ALERT: &str = "if (window.oldAlert !== undefined) { \
     window.alert = window.oldAlert; delete window.oldAlert; \
     return window.oldAlert === undefined; } return true;";

/// Executes scripts in the page and hands back the JSON-converted result.
pub trait ScriptExecutor {
    fn execute(&self, script: &str) -> Result<Value, LookupError>;
}

fn snapshot(query: &str) -> String {
    format!(
        "const snapshot = document.evaluate(`{}`, document, null, \
         XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);",
        template_literal(query)
    )
}

/// Escapes `query` for use inside a JavaScript template literal.
fn template_literal(query: &str) -> String {
    query.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}

/// Script returning the first element matching `query`, or `null`.
pub fn first_match(query: &str) -> String {
    format!(
        "{} return snapshot.snapshotLength > 0 ? snapshot.snapshotItem(0) : null;",
        snapshot(query)
    )
}

/// Script returning every element matching `query` in document order.
pub fn all_matches(query: &str) -> String {
    format!(
        "{} const results = []; \
         for (let i = 0; i < snapshot.snapshotLength; ++i) {{ results.push(snapshot.snapshotItem(i)); }} \
         return results;",
        snapshot(query)
    )
}

/// Runs [`first_match`] for the rooted rendering of `expression`. `Ok(None)`
/// when the script yields `null`.
pub fn evaluate_first(
    executor: &impl ScriptExecutor,
    expression: &XPathExpression,
) -> Result<Option<Value>, LookupError> {
    let query = expression.render();
    tracing::debug!(%query, "evaluating query in page");
    match executor.execute(&first_match(&query))? {
        Value::Null => Ok(None),
        value => Ok(Some(value)),
    }
}

/// Runs [`all_matches`] for the rooted rendering of `expression`. A `null`
/// result counts as no matches.
pub fn evaluate_all(
    executor: &impl ScriptExecutor,
    expression: &XPathExpression,
) -> Result<Vec<Value>, LookupError> {
    let query = expression.render();
    tracing::debug!(%query, "evaluating query in page for all matches");
    match executor.execute(&all_matches(&query))? {
        Value::Null => Ok(Vec::new()),
        Value::Array(elements) => {
            tracing::trace!(%query, count = elements.len(), "matches evaluated");
            Ok(elements)
        }
        value => Err(LookupError::ScriptResult { value: value.to_string(), expected: "an array" }),
    }
}

pub fn disable_alert(executor: &impl ScriptExecutor) -> Result<bool, LookupError> {
    expect_bool(executor.execute(DISABLE_ALERT)?)
}

pub fn restore_alert(executor: &impl ScriptExecutor) -> Result<bool, LookupError> {
    expect_bool(executor.execute(RESTORE_ALERT)?)
}

fn expect_bool(value: Value) -> Result<bool, LookupError> {
    value
        .as_bool()
        .ok_or_else(|| LookupError::ScriptResult { value: value.to_string(), expected: "a boolean" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockExecutor;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn first_match_embeds_query() {
        let script = first_match("//a[@class='nav-link']");
        assert!(script.starts_with("const snapshot = document.evaluate(`//a[@class='nav-link']`"));
        assert!(script.ends_with("snapshot.snapshotItem(0) : null;"));
    }

    #[rstest]
    fn all_matches_returns_array() {
        let script = all_matches("//li");
        assert!(script.contains("document.evaluate(`//li`"));
        assert!(script.contains("results.push(snapshot.snapshotItem(i));"));
        assert!(script.ends_with("return results;"));
    }

    #[rstest]
    #[case("//a[text()='`x`']", "//a[text()='\\`x\\`']")]
    #[case("//a[text()='${x}']", "//a[text()='\\${x}']")]
    #[case("//a[text()='\\d']", "//a[text()='\\\\d']")]
    fn template_literal_escapes_special_sequences(#[case] query: &str, #[case] expected: &str) {
        assert_eq!(template_literal(query), expected);
    }

    #[rstest]
    fn alert_helpers_expect_booleans() {
        let executor = MockExecutor::returning(json!(true));
        assert_eq!(disable_alert(&executor), Ok(true));
        assert_eq!(restore_alert(&executor), Ok(true));
        assert_eq!(executor.scripts(), [DISABLE_ALERT, RESTORE_ALERT]);

        let executor = MockExecutor::returning(json!("nope"));
        assert_eq!(
            disable_alert(&executor),
            Err(LookupError::ScriptResult { value: "\"nope\"".into(), expected: "a boolean" })
        );
    }

    #[rstest]
    fn evaluate_first_maps_null_to_none() {
        let expression = XPathExpression::from("a").where_text_contains("ISO910");
        let executor = MockExecutor::returning(Value::Null);
        assert_eq!(evaluate_first(&executor, &expression), Ok(None));
        assert_eq!(executor.scripts(), [first_match("//a[contains(text(),'ISO910')]")]);

        let executor = MockExecutor::returning(json!({ "element-6066": "abc" }));
        assert!(evaluate_first(&executor, &expression).expect("script").is_some());
    }

    #[rstest]
    #[case(Value::Null, 0)]
    #[case(json!([]), 0)]
    #[case(json!([{ "element-6066": "a" }, { "element-6066": "b" }]), 2)]
    fn evaluate_all_collects_matches(#[case] result: Value, #[case] count: usize) {
        let expression = XPathExpression::from("li").where_attribute("class", "item");
        let executor = MockExecutor::returning(result);
        let elements = evaluate_all(&executor, &expression).expect("script");
        assert_eq!(elements.len(), count);
        assert_eq!(executor.scripts(), [all_matches("//li[@class='item']")]);
    }

    #[rstest]
    fn evaluate_all_rejects_non_array() {
        let expression = XPathExpression::from("li");
        let executor = MockExecutor::returning(json!(7));
        assert_eq!(
            evaluate_all(&executor, &expression),
            Err(LookupError::ScriptResult { value: "7".into(), expected: "an array" })
        );
    }
}
