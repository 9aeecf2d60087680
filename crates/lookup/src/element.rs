use crate::error::LookupError;
use crate::locator::ElementHandle;

const CHECKABLE_TYPES: &[&str] = &["checkbox", "radio"];

/// Current `value` attribute of an `<input>` element.
pub fn input_value(element: &impl ElementHandle) -> Result<Option<String>, LookupError> {
    let tag = element.tag_name();
    if !tag.eq_ignore_ascii_case("input") {
        return Err(LookupError::UnexpectedElement {
            expected: "an <input> element".to_owned(),
            found: format!("<{tag}>"),
        });
    }
    Ok(element.attribute("value"))
}

/// Whether a checkbox or radio button is checked, i.e. carries a `checked`
/// attribute.
pub fn check_state(element: &impl ElementHandle) -> Result<bool, LookupError> {
    let kind = element.attribute("type").unwrap_or_default();
    if !CHECKABLE_TYPES.contains(&kind.as_str()) {
        return Err(LookupError::UnexpectedElement {
            expected: "a checkbox or radio button".to_owned(),
            found: format!("<{} type={kind:?}>", element.tag_name()),
        });
    }
    Ok(element.attribute("checked").is_some())
}
