use crate::error::BuildIssue;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

/// Structural relationship used to step from one element to related ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    Parent,
    Ancestor,
    PrecedingSibling,
    FollowingSibling,
    Descendant,
    Child,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::Parent,
        Axis::Ancestor,
        Axis::PrecedingSibling,
        Axis::FollowingSibling,
        Axis::Descendant,
        Axis::Child,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Axis::Parent => "parent",
            Axis::Ancestor => "ancestor",
            Axis::PrecedingSibling => "preceding-sibling",
            Axis::FollowingSibling => "following-sibling",
            Axis::Descendant => "descendant",
            Axis::Child => "child",
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an axis step lands in the host expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Inside the predicate as `./<axis>::<target>`.
    #[default]
    Predicate,
    /// As a path continuation `/<axis>::<target>`.
    Path,
}

/// Anything that can stand after `<axis>::`: a plain tag name or another
/// expression, which contributes its fragment rendering.
pub trait StepTarget {
    fn step_text(&self) -> Cow<'_, str>;

    /// Issues the host expression inherits when embedding this target.
    fn inherited_issues(&self) -> Vec<BuildIssue> {
        Vec::new()
    }
}

impl StepTarget for str {
    fn step_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl StepTarget for String {
    fn step_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: StepTarget + ?Sized> StepTarget for &T {
    fn step_text(&self) -> Cow<'_, str> {
        (**self).step_text()
    }

    fn inherited_issues(&self) -> Vec<BuildIssue> {
        (**self).inherited_issues()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn axis_names_match_xpath_keywords() {
        let names: Vec<_> = Axis::ALL.iter().map(|axis| axis.name()).collect();
        assert_eq!(
            names,
            [
                "parent",
                "ancestor",
                "preceding-sibling",
                "following-sibling",
                "descendant",
                "child"
            ]
        );
    }

    #[rstest]
    fn placement_defaults_to_predicate() {
        assert_eq!(Placement::default(), Placement::Predicate);
    }

    #[rstest]
    fn plain_tags_have_no_issues() {
        assert!("div".inherited_issues().is_empty());
        assert_eq!(String::from("span").step_text(), "span");
    }
}
