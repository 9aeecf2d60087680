use proptest::prelude::*;
use xpathkit_builder::{Connective, PredicateToken, XPathExpression};

#[derive(Debug, Clone)]
enum Clause {
    Attribute(String, String),
    HasAttribute(String),
    TextContains(String),
    Position(usize),
    TextLength(usize),
    Any(String),
    AttributeGreaterThan(String, i64),
}

fn word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}"
}

fn clause() -> impl Strategy<Value = Clause> {
    prop_oneof![
        (word(), word()).prop_map(|(name, value)| Clause::Attribute(name, value)),
        word().prop_map(Clause::HasAttribute),
        word().prop_map(Clause::TextContains),
        (1usize..50).prop_map(Clause::Position),
        (0usize..200).prop_map(Clause::TextLength),
        word().prop_map(Clause::Any),
        (word(), -1000i64..1000).prop_map(|(name, value)| Clause::AttributeGreaterThan(name, value)),
    ]
}

fn apply(expression: XPathExpression, clause: &Clause) -> XPathExpression {
    match clause {
        Clause::Attribute(name, value) => expression.where_attribute(name, value),
        Clause::HasAttribute(name) => expression.where_has_attribute(name),
        Clause::TextContains(value) => expression.where_text_contains(value),
        Clause::Position(position) => expression.where_position(*position),
        Clause::TextLength(length) => expression.where_text_length(*length),
        Clause::Any(value) => expression.where_any(value),
        Clause::AttributeGreaterThan(name, value) => expression.where_greater_than(name, *value),
    }
}

proptest! {
    #[test]
    fn exactly_one_and_between_consecutive_clauses(clauses in prop::collection::vec(clause(), 1..12)) {
        let expression = clauses.iter().fold(XPathExpression::from("div"), apply);
        let tokens = expression.predicates();

        prop_assert_eq!(tokens.len(), clauses.len() * 2 - 1);
        for (index, token) in tokens.iter().enumerate() {
            if index % 2 == 0 {
                prop_assert!(matches!(token, PredicateToken::Clause(_)), "clause expected at {}", index);
            } else {
                prop_assert_eq!(token, &PredicateToken::Connective(Connective::And));
            }
        }
        prop_assert!(!expression.has_dangling_connective());
        prop_assert!(expression.try_render().is_ok());

        let rendered = expression.render();
        prop_assert!(rendered.starts_with("//div["));
        prop_assert!(!rendered.starts_with("//div[and"));
        prop_assert!(!rendered.ends_with(" and]"));
    }

    #[test]
    fn explicit_or_is_never_doubled(clauses in prop::collection::vec(clause(), 2..8)) {
        let mut expression = XPathExpression::from("li");
        for clause in &clauses {
            expression = apply(expression, clause).or().or().and();
        }
        let tokens = expression.predicates();
        for pair in tokens.windows(2) {
            prop_assert!(!(pair[0].is_connective() && pair[1].is_connective()));
        }
        prop_assert_eq!(expression.predicates().last(), Some(&PredicateToken::Connective(Connective::Or)));
    }

    #[test]
    fn render_is_pure(clauses in prop::collection::vec(clause(), 0..6)) {
        let expression = clauses.iter().fold(XPathExpression::from_any(), apply);
        let before = expression.clone();
        let first = expression.render();
        let _ = expression.render_fragment();
        prop_assert_eq!(&first, &expression.render());
        prop_assert_eq!(&before, &expression);
        prop_assert_eq!(first, format!("//{}", expression.render_fragment()));
    }
}
