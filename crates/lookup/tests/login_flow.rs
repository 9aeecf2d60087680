use rstest::{fixture, rstest};
use xpathkit_builder::{Placement, XPathExpression};
use xpathkit_lookup::mock::{MockElement, MockLocator};
use xpathkit_lookup::{ElementHandle, LocatorExt, LookupError, check_state, input_value};

fn email_input() -> XPathExpression {
    XPathExpression::from("input").where_attribute("type", "email")
}

fn submit_button() -> XPathExpression {
    XPathExpression::from("input").where_attribute("type", "submit")
}

fn slides_link() -> XPathExpression {
    XPathExpression::from("a").where_child(
        XPathExpression::from("img").where_attribute_contains("src", "powerpoint"),
        Placement::Predicate,
    )
}

#[fixture]
fn locator() -> MockLocator {
    MockLocator::new()
        .with_expression_match(
            &email_input(),
            MockElement::new("input").with_attribute("type", "email").with_attribute("value", ""),
        )
        .with_expression_match(&submit_button(), MockElement::new("input").with_attribute("type", "submit"))
        .with_match(
            "//a[./child::img[contains(@src,'powerpoint')]]",
            MockElement::new("a").with_attribute("href", "/slides/1.pptx").with_text("Unit 1"),
        )
        .with_match(
            "//a[./child::img[contains(@src,'powerpoint')]]",
            MockElement::new("a").with_attribute("href", "/slides/2.pptx").with_text("Unit 2"),
        )
}

#[rstest]
fn rendered_queries_reach_the_locator(locator: MockLocator) {
    let email = locator.require(&email_input()).expect("email input");
    assert_eq!(input_value(&email), Ok(Some(String::new())));
    let submit = locator.require(&submit_button()).expect("submit");
    assert_eq!(submit.attribute("@type").as_deref(), Some("submit"));

    assert_eq!(locator.queries(), ["//input[@type='email']", "//input[@type='submit']"]);
}

#[rstest]
fn find_all_keeps_document_order(locator: MockLocator) {
    let links = locator.find_all_expression(&slides_link()).expect("links");
    let texts: Vec<_> = links.iter().map(ElementHandle::text).collect();
    assert_eq!(texts, ["Unit 1", "Unit 2"]);
    assert_eq!(locator.find_expression(&slides_link()).expect("lookup"), links.first().cloned());
}

#[rstest]
fn missing_element_is_reported_with_its_query(locator: MockLocator) {
    let expression = XPathExpression::from("input").where_attribute("value", "No");
    assert_eq!(locator.find_expression(&expression), Ok(None));
    assert!(locator.find_all_expression(&expression).expect("lookup").is_empty());
    assert_eq!(
        locator.require(&expression),
        Err(LookupError::NotFound { query: "//input[@value='No']".into() })
    );
}

#[rstest]
fn driver_failures_propagate() {
    let locator = MockLocator::new().failing("session closed");
    assert_eq!(
        locator.find_expression(&email_input()),
        Err(LookupError::Driver("session closed".into()))
    );
}

#[rstest]
fn checkbox_state_through_locator() {
    let remember = XPathExpression::from("input").where_attribute("name", "remember");
    let locator = MockLocator::new().with_expression_match(
        &remember,
        MockElement::new("input").with_attribute("type", "checkbox").with_attribute("checked", "checked"),
    );
    let element = locator.require(&remember).expect("checkbox");
    assert_eq!(check_state(&element), Ok(true));
}
