#![forbid(unsafe_code)]

//! Structured select/plural messages.
//!
//! Patterns are trees rather than ICU strings: a [`MessagePattern`] is a list
//! of [`Segment`]s, and `select`/`plural` segments own one sub-pattern per
//! branch. Nothing is ever parsed, so locale text never needs escaping.
//!
//! A pattern is compiled once per locale ([`CompiledMessage::compile`]) and
//! evaluated many times ([`CompiledMessage::evaluate`]).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Plural node without `other` | Incomplete locale data | `InvalidPattern` at compile |
//! | Value marker outside a plural node | Malformed tree | `InvalidPattern` at compile |
//! | Argument not supplied | Caller bug | `MissingArgument` at evaluate |
//! | String given to plural node | Caller bug | `ArgumentType` at evaluate |
//! | Select value without branch | No match and no `other` | `NoBranch` at evaluate |

use std::collections::BTreeMap;

use crate::plural::{PluralCategory, PluralRule};

/// Errors from compiling or evaluating a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("invalid message pattern: {0}")]
    InvalidPattern(String),
    #[error("missing message argument '{0}'")]
    MissingArgument(String),
    #[error("message argument '{argument}' must be a {expected}")]
    ArgumentType {
        argument: String,
        expected: &'static str,
    },
    #[error("no branch of '{argument}' matches '{value}'")]
    NoBranch { argument: String, value: String },
}

/// One piece of a message pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted verbatim.
    Text(String),
    /// The number of the innermost enclosing plural node (ICU `#`).
    Value,
    /// Branch on a string argument.
    Select(SelectNode),
    /// Branch on the plural category of a numeric argument.
    Plural(PluralNode),
}

/// An ordered sequence of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePattern {
    segments: Vec<Segment>,
}

impl MessagePattern {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment, merging adjacent text.
    pub fn push(&mut self, segment: Segment) {
        if let (Segment::Text(next), Some(Segment::Text(prev))) =
            (&segment, self.segments.last_mut())
        {
            prev.push_str(next);
            return;
        }
        self.segments.push(segment);
    }

    /// Append literal text. Empty text is dropped.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.push(Segment::Text(text));
        }
    }

    /// Append the plural value marker.
    pub fn push_value(&mut self) {
        self.segments.push(Segment::Value);
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<Segment> for MessagePattern {
    fn from(segment: Segment) -> Self {
        Self {
            segments: vec![segment],
        }
    }
}

/// `{argument, select, key {..} other {..}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectNode {
    pub argument: String,
    pub branches: BTreeMap<String, MessagePattern>,
}

impl SelectNode {
    #[must_use]
    pub fn new(argument: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
            branches: BTreeMap::new(),
        }
    }

    /// Add (or replace) a branch.
    #[must_use]
    pub fn branch(mut self, key: impl Into<String>, pattern: MessagePattern) -> Self {
        self.branches.insert(key.into(), pattern);
        self
    }
}

/// `{argument, plural, one {..} other {..}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralNode {
    pub argument: String,
    pub branches: BTreeMap<PluralCategory, MessagePattern>,
}

impl PluralNode {
    #[must_use]
    pub fn new(argument: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
            branches: BTreeMap::new(),
        }
    }

    /// Add (or replace) a branch.
    #[must_use]
    pub fn branch(mut self, category: PluralCategory, pattern: MessagePattern) -> Self {
        self.branches.insert(category, pattern);
        self
    }
}

/// A named argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Str(String),
    Number(i64),
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// A validated pattern bound to a plural rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMessage {
    pattern: MessagePattern,
    rule: PluralRule,
}

impl CompiledMessage {
    /// Validate `pattern` and bind it to the plural rule of `locale`.
    pub fn compile(pattern: MessagePattern, locale: &str) -> Result<Self, MessageError> {
        Self::compile_with_rule(pattern, PluralRule::for_locale(locale))
    }

    /// Validate `pattern` and bind it to an explicit plural rule.
    pub fn compile_with_rule(
        pattern: MessagePattern,
        rule: PluralRule,
    ) -> Result<Self, MessageError> {
        validate(pattern.segments(), false)?;
        Ok(Self { pattern, rule })
    }

    #[must_use]
    pub fn plural_rule(&self) -> PluralRule {
        self.rule
    }

    /// Render the message with the given arguments.
    pub fn evaluate(&self, args: &[(&str, ArgValue)]) -> Result<String, MessageError> {
        let mut out = String::new();
        self.render(self.pattern.segments(), args, None, &mut out)?;
        Ok(out)
    }

    fn render(
        &self,
        segments: &[Segment],
        args: &[(&str, ArgValue)],
        value: Option<i64>,
        out: &mut String,
    ) -> Result<(), MessageError> {
        for segment in segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Value => {
                    // compile() rejects Value outside a plural node
                    if let Some(n) = value {
                        out.push_str(&n.to_string());
                    }
                }
                Segment::Select(node) => {
                    let selected = match lookup(args, &node.argument)? {
                        ArgValue::Str(s) => s,
                        ArgValue::Number(_) => {
                            return Err(MessageError::ArgumentType {
                                argument: node.argument.clone(),
                                expected: "string",
                            });
                        }
                    };
                    let branch = node
                        .branches
                        .get(selected.as_str())
                        .or_else(|| node.branches.get("other"))
                        .ok_or_else(|| MessageError::NoBranch {
                            argument: node.argument.clone(),
                            value: selected.clone(),
                        })?;
                    self.render(branch.segments(), args, value, out)?;
                }
                Segment::Plural(node) => {
                    let n = match lookup(args, &node.argument)? {
                        ArgValue::Number(n) => *n,
                        ArgValue::Str(_) => {
                            return Err(MessageError::ArgumentType {
                                argument: node.argument.clone(),
                                expected: "number",
                            });
                        }
                    };
                    let category = self.rule.categorize(n);
                    let branch = node
                        .branches
                        .get(&category)
                        .or_else(|| node.branches.get(&PluralCategory::Other))
                        .ok_or_else(|| MessageError::NoBranch {
                            argument: node.argument.clone(),
                            value: category.to_string(),
                        })?;
                    self.render(branch.segments(), args, Some(n), out)?;
                }
            }
        }
        Ok(())
    }
}

fn lookup<'a>(args: &'a [(&str, ArgValue)], name: &str) -> Result<&'a ArgValue, MessageError> {
    args.iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .ok_or_else(|| MessageError::MissingArgument(name.to_string()))
}

fn validate(segments: &[Segment], in_plural: bool) -> Result<(), MessageError> {
    for segment in segments {
        match segment {
            Segment::Text(_) => {}
            Segment::Value => {
                if !in_plural {
                    return Err(MessageError::InvalidPattern(
                        "value marker outside of a plural branch".into(),
                    ));
                }
            }
            Segment::Select(node) => {
                if node.branches.is_empty() {
                    return Err(MessageError::InvalidPattern(format!(
                        "select on '{}' has no branches",
                        node.argument
                    )));
                }
                for branch in node.branches.values() {
                    validate(branch.segments(), in_plural)?;
                }
            }
            Segment::Plural(node) => {
                if !node.branches.contains_key(&PluralCategory::Other) {
                    return Err(MessageError::InvalidPattern(format!(
                        "plural on '{}' has no 'other' branch",
                        node.argument
                    )));
                }
                for branch in node.branches.values() {
                    validate(branch.segments(), true)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> MessagePattern {
        let mut p = MessagePattern::new();
        p.push_text(s);
        p
    }

    fn counted(before: &str, after: &str) -> MessagePattern {
        let mut p = MessagePattern::new();
        p.push_text(before);
        p.push_value();
        p.push_text(after);
        p
    }

    fn days() -> MessagePattern {
        let future = PluralNode::new("0")
            .branch(PluralCategory::One, counted("in ", " day"))
            .branch(PluralCategory::Other, counted("in ", " days"));
        let past = PluralNode::new("0")
            .branch(PluralCategory::One, counted("", " day ago"))
            .branch(PluralCategory::Other, counted("", " days ago"));
        Segment::Select(
            SelectNode::new("when")
                .branch("future", Segment::Plural(future).into())
                .branch("past", Segment::Plural(past).into()),
        )
        .into()
    }

    #[test]
    fn evaluates_nested_select_and_plural() {
        let msg = CompiledMessage::compile(days(), "en").unwrap();
        let render = |n: i64, when: &str| {
            msg.evaluate(&[("0", n.into()), ("when", when.into())])
                .unwrap()
        };
        assert_eq!(render(1, "future"), "in 1 day");
        assert_eq!(render(3, "future"), "in 3 days");
        assert_eq!(render(1, "past"), "1 day ago");
        assert_eq!(render(30, "past"), "30 days ago");
    }

    #[test]
    fn plural_rule_comes_from_locale() {
        let msg = CompiledMessage::compile(days(), "fr").unwrap();
        assert_eq!(msg.plural_rule(), PluralRule::French);
        // French puts 0 in "one"
        let out = msg
            .evaluate(&[("0", ArgValue::Number(0)), ("when", "past".into())])
            .unwrap();
        assert_eq!(out, "0 day ago");
    }

    #[test]
    fn explicit_rule_overrides_locale() {
        let few = PluralNode::new("0")
            .branch(PluralCategory::One, counted("", " den"))
            .branch(PluralCategory::Few, counted("", " dny"))
            .branch(PluralCategory::Other, counted("", " dní"));
        let pattern: MessagePattern = Segment::Plural(few).into();
        let msg = CompiledMessage::compile_with_rule(pattern.clone(), PluralRule::Czech).unwrap();
        assert_eq!(msg.plural_rule(), PluralRule::Czech);
        assert_eq!(msg.evaluate(&[("0", ArgValue::Number(3))]).unwrap(), "3 dny");
        assert_eq!(msg.evaluate(&[("0", ArgValue::Number(5))]).unwrap(), "5 dní");
        let english = CompiledMessage::compile(pattern, "sk").unwrap();
        assert_eq!(english.evaluate(&[("0", ArgValue::Number(3))]).unwrap(), "3 dní");
    }

    #[test]
    fn push_text_merges_adjacent_text() {
        let mut p = MessagePattern::new();
        p.push_text("a");
        p.push_text("b");
        p.push_text("");
        assert_eq!(p.segments(), &[Segment::Text("ab".into())]);
    }

    #[test]
    fn plural_without_other_is_rejected() {
        let node = PluralNode::new("0").branch(PluralCategory::One, counted("", " day"));
        let err = CompiledMessage::compile(Segment::Plural(node).into(), "en").unwrap_err();
        assert!(matches!(err, MessageError::InvalidPattern(_)));
    }

    #[test]
    fn value_outside_plural_is_rejected() {
        let mut p = MessagePattern::new();
        p.push_value();
        assert!(matches!(
            CompiledMessage::compile(p, "en"),
            Err(MessageError::InvalidPattern(_))
        ));
    }

    #[test]
    fn empty_select_is_rejected() {
        let p = Segment::Select(SelectNode::new("when")).into();
        assert!(CompiledMessage::compile(p, "en").is_err());
    }

    #[test]
    fn missing_argument() {
        let msg = CompiledMessage::compile(days(), "en").unwrap();
        assert_eq!(
            msg.evaluate(&[("when", "past".into())]),
            Err(MessageError::MissingArgument("0".into()))
        );
    }

    #[test]
    fn argument_type_mismatch() {
        let msg = CompiledMessage::compile(days(), "en").unwrap();
        let err = msg
            .evaluate(&[("0", "three".into()), ("when", "past".into())])
            .unwrap_err();
        assert!(matches!(err, MessageError::ArgumentType { expected: "number", .. }));
        let err = msg
            .evaluate(&[("0", ArgValue::Number(3)), ("when", ArgValue::Number(1))])
            .unwrap_err();
        assert!(matches!(err, MessageError::ArgumentType { expected: "string", .. }));
    }

    #[test]
    fn select_without_match_or_other() {
        let msg = CompiledMessage::compile(days(), "en").unwrap();
        let err = msg
            .evaluate(&[("0", ArgValue::Number(3)), ("when", "sideways".into())])
            .unwrap_err();
        assert_eq!(
            err,
            MessageError::NoBranch {
                argument: "when".into(),
                value: "sideways".into()
            }
        );
    }

    #[test]
    fn select_falls_back_to_other() {
        let p = Segment::Select(
            SelectNode::new("g")
                .branch("a", text("A"))
                .branch("other", text("?")),
        )
        .into();
        let msg = CompiledMessage::compile(p, "en").unwrap();
        assert_eq!(msg.evaluate(&[("g", "z".into())]).unwrap(), "?");
    }

    #[test]
    fn locale_text_is_never_reparsed() {
        let node = PluralNode::new("0").branch(PluralCategory::Other, counted("{#} ", " {x}"));
        let msg = CompiledMessage::compile(Segment::Plural(node).into(), "en").unwrap();
        assert_eq!(msg.evaluate(&[("0", ArgValue::Number(2))]).unwrap(), "{#} 2 {x}");
    }
}
