//! CSS selector parsing and matching.
//!
//! Supports the subset used to address modal panels and their triggers:
//! type, universal, `#id`, `.class`, attribute selectors (`[attr]`,
//! `[attr=v]`, `~=`, `|=`, `^=`, `$=`, `*=`), `:first-child` /
//! `:last-child`, descendant and child combinators, and comma lists.

use std::fmt;

use modals_types::error::{ModalError, Result};
use modals_types::input::NodeId;

use crate::dom::{Document, ElementData, NodeKind};

// -------------------------------------------------------------------
// Selector types
// -------------------------------------------------------------------

/// A single, atomic selector component.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// Type selector: `div`, `a`.
    Type(String),
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#idname`.
    Id(String),
    /// Universal selector: `*`.
    Universal,
    /// Attribute selector: `[name]` or `[name op value]`.
    Attribute {
        name: String,
        matcher: Option<(AttrOp, String)>,
    },
    /// Pseudo-class: `:first-child`.
    PseudoClass(String),
}

/// Attribute value comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `=`
    Equals,
    /// `~=` whitespace-separated word.
    Includes,
    /// `|=` exact or followed by `-`.
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

/// Combinator linking two compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant: `div p` (whitespace).
    Descendant,
    /// Child: `div > p`.
    Child,
}

/// A compound selector is a sequence of simple selectors applied to the
/// same element (e.g. `div.class[data-x]`).
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub parts: Vec<SimpleSelector>,
}

/// A full selector is a chain of compound selectors separated by
/// combinators. Each entry stores the compound selector and the
/// combinator that *preceded* it (`None` for the first in the chain).
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub parts: Vec<(CompoundSelector, Option<Combinator>)>,
}

/// Comma-separated list of selectors, kept with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
    source: String,
}

impl SelectorList {
    /// Parse a selector list such as `[data-modal], .dialog`.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = SelectorParser::new(input);
        let selectors = parser.parse_selector_list()?;
        Ok(Self {
            selectors,
            source: input.trim().to_string(),
        })
    }

    /// The selector text this list was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether any selector in the list matches `node_id`.
    pub fn matches(&self, doc: &Document, node_id: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|sel| matches_selector(doc, node_id, sel))
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

// -------------------------------------------------------------------
// Document queries
// -------------------------------------------------------------------

impl Document {
    /// Whether `node_id` matches `selectors` (the DOM `Element.matches`).
    pub fn matches(&self, node_id: NodeId, selectors: &SelectorList) -> bool {
        selectors.matches(self, node_id)
    }

    /// All attached elements matching `selectors`, in document order.
    pub fn query_selector_all(&self, selectors: &SelectorList) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| selectors.matches(self, id))
            .collect()
    }
}

// -------------------------------------------------------------------
// Parser
// -------------------------------------------------------------------

struct SelectorParser {
    chars: Vec<char>,
    pos: usize,
}

impl SelectorParser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn error(&self, msg: &str) -> ModalError {
        let source: String = self.chars.iter().collect();
        ModalError::Selector(format!("{msg} at offset {} in `{source}`", self.pos))
    }

    fn parse_selector_list(&mut self) -> Result<Vec<Selector>> {
        let mut selectors = vec![self.parse_selector()?];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                    selectors.push(self.parse_selector()?);
                },
                None => return Ok(selectors),
                Some(ch) => return Err(self.error(&format!("unexpected `{ch}`"))),
            }
        }
    }

    fn parse_selector(&mut self) -> Result<Selector> {
        self.skip_whitespace();
        let first = self.parse_compound_selector()?;
        let mut parts = vec![(first, None)];
        loop {
            let had_ws = self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => {
                    self.advance();
                    self.skip_whitespace();
                    Combinator::Child
                },
                Some(ch) if had_ws && is_compound_start(ch) => Combinator::Descendant,
                _ => break,
            };
            let compound = self.parse_compound_selector()?;
            parts.push((compound, Some(combinator)));
        }
        Ok(Selector { parts })
    }

    fn parse_compound_selector(&mut self) -> Result<CompoundSelector> {
        let mut parts = Vec::new();
        loop {
            match self.peek() {
                Some('*') => {
                    self.advance();
                    parts.push(SimpleSelector::Universal);
                },
                Some('#') => {
                    self.advance();
                    parts.push(SimpleSelector::Id(self.parse_ident()?));
                },
                Some('.') => {
                    self.advance();
                    parts.push(SimpleSelector::Class(self.parse_ident()?));
                },
                Some(':') => {
                    self.advance();
                    parts.push(SimpleSelector::PseudoClass(self.parse_ident()?));
                },
                Some('[') => {
                    self.advance();
                    parts.push(self.parse_attribute()?);
                },
                Some(ch) if is_ident_char(ch) && parts.is_empty() => {
                    let name = self.parse_ident()?;
                    parts.push(SimpleSelector::Type(name.to_ascii_lowercase()));
                },
                _ => break,
            }
        }
        if parts.is_empty() {
            Err(self.error("expected a selector"))
        } else {
            Ok(CompoundSelector { parts })
        }
    }

    fn parse_ident(&mut self) -> Result<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected an identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// Parse the inside of `[...]`; the opening bracket is consumed.
    fn parse_attribute(&mut self) -> Result<SimpleSelector> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();
        let op = match self.peek() {
            Some(']') => {
                self.advance();
                return Ok(SimpleSelector::Attribute {
                    name,
                    matcher: None,
                });
            },
            Some('=') => {
                self.advance();
                AttrOp::Equals
            },
            Some(prefix @ ('~' | '|' | '^' | '$' | '*')) => {
                self.advance();
                if self.advance() != Some('=') {
                    return Err(self.error("expected `=` in attribute selector"));
                }
                match prefix {
                    '~' => AttrOp::Includes,
                    '|' => AttrOp::DashMatch,
                    '^' => AttrOp::Prefix,
                    '$' => AttrOp::Suffix,
                    _ => AttrOp::Substring,
                }
            },
            _ => return Err(self.error("malformed attribute selector")),
        };
        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                let value: String = self.chars[start..self.pos].iter().collect();
                if self.advance() != Some(quote) {
                    return Err(self.error("unterminated string"));
                }
                value
            },
            _ => self.parse_ident()?,
        };
        self.skip_whitespace();
        if self.advance() != Some(']') {
            return Err(self.error("expected `]`"));
        }
        Ok(SimpleSelector::Attribute {
            name,
            matcher: Some((op, value)),
        })
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii()
}

fn is_compound_start(ch: char) -> bool {
    is_ident_char(ch) || matches!(ch, '*' | '#' | '.' | ':' | '[')
}

// -------------------------------------------------------------------
// Matching
// -------------------------------------------------------------------

/// Check a full selector against a node.
///
/// The last compound is the *subject* and must match `node_id`; the
/// remaining compounds are walked right-to-left towards the root.
fn matches_selector(doc: &Document, node_id: NodeId, selector: &Selector) -> bool {
    let parts = &selector.parts;
    let Some(last_idx) = parts.len().checked_sub(1) else {
        return false;
    };
    if !matches_compound(doc, node_id, &parts[last_idx].0) {
        return false;
    }

    let mut current = node_id;
    for i in (0..last_idx).rev() {
        let compound = &parts[i].0;
        // The combinator joining parts[i] and parts[i + 1] lives on parts[i + 1].
        match parts[i + 1].1 {
            Some(Combinator::Child) => match doc.parent_element(current) {
                Some(pid) if matches_compound(doc, pid, compound) => current = pid,
                _ => return false,
            },
            Some(Combinator::Descendant) | None => {
                let mut ancestor = doc.parent_element(current);
                loop {
                    match ancestor {
                        Some(anc) if matches_compound(doc, anc, compound) => {
                            current = anc;
                            break;
                        },
                        Some(anc) => ancestor = doc.parent_element(anc),
                        None => return false,
                    }
                }
            },
        }
    }
    true
}

fn matches_compound(doc: &Document, node_id: NodeId, compound: &CompoundSelector) -> bool {
    let Some(elem) = doc.element(node_id) else {
        return false;
    };
    compound
        .parts
        .iter()
        .all(|simple| matches_simple(doc, node_id, elem, simple))
}

fn matches_simple(
    doc: &Document,
    node_id: NodeId,
    elem: &ElementData,
    simple: &SimpleSelector,
) -> bool {
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => elem.tag.as_str().eq_ignore_ascii_case(tag),
        SimpleSelector::Class(cls) => elem.has_class(cls),
        SimpleSelector::Id(id) => elem.id() == Some(id.as_str()),
        SimpleSelector::Attribute { name, matcher } => {
            let Some(actual) = elem.get_attribute(name) else {
                return false;
            };
            match matcher {
                None => true,
                Some((op, expected)) => match_attribute(*op, actual, expected),
            }
        },
        SimpleSelector::PseudoClass(pseudo) => match_pseudo_class(doc, node_id, pseudo),
    }
}

fn match_attribute(op: AttrOp, actual: &str, expected: &str) -> bool {
    match op {
        AttrOp::Equals => actual == expected,
        AttrOp::Includes => actual.split_ascii_whitespace().any(|w| w == expected),
        AttrOp::DashMatch => {
            actual == expected
                || actual
                    .strip_prefix(expected)
                    .is_some_and(|rest| rest.starts_with('-'))
        },
        AttrOp::Prefix => !expected.is_empty() && actual.starts_with(expected),
        AttrOp::Suffix => !expected.is_empty() && actual.ends_with(expected),
        AttrOp::Substring => !expected.is_empty() && actual.contains(expected),
    }
}

/// Structural pseudo-classes. Stateful ones (`:hover`, `:focus`) never
/// match.
fn match_pseudo_class(doc: &Document, node_id: NodeId, pseudo: &str) -> bool {
    let Some(pid) = doc.get(node_id).parent else {
        return false;
    };
    let mut siblings = doc
        .get(pid)
        .children
        .iter()
        .copied()
        .filter(|&sid| matches!(doc.get(sid).kind, NodeKind::Element(_)));
    match pseudo {
        "first-child" => siblings.next() == Some(node_id),
        "last-child" => siblings.next_back() == Some(node_id),
        _ => false,
    }
}
