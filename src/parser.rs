use regex::Regex;
use std::sync::LazyLock;
use strum_macros::Display;
use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::error::{MalformedFormulaError, Result};
use crate::tally::{format, ElementTally};

// ----- Segmentation -----

static ELEMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]*$").expect("element symbol regex is valid"));

#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
#[strum(serialize_all = "lowercase")]
pub enum UnitKind {
    Element,
    Group,
}

/// One top-level slice of a formula: an element or a parenthesized group,
/// each with an optional trailing multiplier digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Unit<'a> {
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the unit within the outermost formula.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> UnitKind {
        if self.text.starts_with('(') {
            UnitKind::Group
        } else {
            UnitKind::Element
        }
    }
}

/// Cuts exactly one unit off the front of `remaining`.
///
/// `offset` is where `remaining` starts in the outermost formula and is only
/// used to position errors.
fn segment(remaining: &str, offset: usize) -> Result<(Unit<'_>, &str)> {
    let group = remaining.starts_with('(');
    let mut depth = 0usize;

    for (i, c) in remaining.char_indices() {
        let pos = offset + i;
        let boundary = match c {
            '(' if i > 0 && depth == 0 => Some(i),
            '(' => {
                depth += 1;
                None
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(MalformedFormulaError::UnmatchedClose { pos })?;
                None
            }
            'A'..='Z' if i > 0 && depth == 0 => Some(i),
            'A'..='Z' => None,
            // lowercase right after a closed group cannot belong to any symbol
            'a'..='z' if group && depth == 0 => {
                return Err(MalformedFormulaError::InvalidSymbol {
                    pos,
                    symbol: c.to_string(),
                })
            }
            'a'..='z' => None,
            '0'..='9' if depth == 0 => {
                if i == 0 {
                    return Err(MalformedFormulaError::DanglingDigit { pos });
                }
                // the unit's own multiplier: consume it and stop
                Some(i + 1)
            }
            '0'..='9' => None,
            found => return Err(MalformedFormulaError::InvalidCharacter { pos, found }),
        };

        if let Some(end) = boundary {
            let (text, rest) = remaining.split_at(end);
            return Ok((Unit { text, offset }, rest));
        }
    }

    if depth > 0 {
        // every unclosed paren sits inside the unit's leading one
        return Err(MalformedFormulaError::UnmatchedOpen { pos: offset });
    }

    Ok((
        Unit {
            text: remaining,
            offset,
        },
        "",
    ))
}

/// Splits the next unit off `remaining`, returning `(unit, rest)`.
///
/// `unit + rest == remaining` always holds, and `unit` is empty only when
/// `remaining` is.
pub fn next_unit(remaining: &str) -> Result<(&str, &str)> {
    if remaining.is_empty() {
        return Ok(("", ""));
    }
    let (unit, rest) = segment(remaining, 0)?;
    Ok((unit.as_str(), rest))
}

/// Walks a formula unit by unit. Owned by a single parse call.
struct Cursor<'a> {
    rest: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, offset: usize) -> Self {
        Cursor { rest: text, offset }
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = Result<Unit<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match segment(self.rest, self.offset) {
            Ok((unit, rest)) => {
                trace!(
                    kind = %unit.kind(),
                    unit = unit.as_str(),
                    offset = unit.offset(),
                    "segmented unit"
                );
                self.rest = rest;
                self.offset += unit.as_str().len();
                Some(Ok(unit))
            }
            Err(e) => {
                self.rest = "";
                Some(Err(e))
            }
        }
    }
}

// ----- Evaluation -----

/// One `(element, count)` fact produced while evaluating a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub symbol: String,
    pub count: u32,
}

impl Contribution {
    pub fn new(symbol: impl Into<String>, count: u32) -> Self {
        Contribution {
            symbol: symbol.into(),
            count,
        }
    }
}

/// Splits off the trailing multiplier digit, if any.
fn trailing_count<'a>(unit: &Unit<'a>) -> Result<(&'a str, u32)> {
    let text = unit.as_str();
    let Some(digit) = text.chars().last().and_then(|c| c.to_digit(10)) else {
        return Ok((text, 1));
    };
    if digit == 0 {
        return Err(MalformedFormulaError::ZeroCount {
            pos: unit.offset() + text.len() - 1,
        });
    }
    Ok((&text[..text.len() - 1], digit))
}

fn evaluate_element(unit: &Unit<'_>) -> Result<Contribution> {
    let (symbol, count) = trailing_count(unit)?;
    if !ELEMENT_REGEX.is_match(symbol) {
        return Err(MalformedFormulaError::InvalidSymbol {
            pos: unit.offset(),
            symbol: symbol.to_string(),
        });
    }
    Ok(Contribution::new(symbol, count))
}

fn evaluate_group(
    unit: &Unit<'_>,
    depth: usize,
    config: &ParserConfig,
) -> Result<Vec<Contribution>> {
    let (body, multiplier) = trailing_count(unit)?;
    let inner = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or(MalformedFormulaError::UnmatchedOpen { pos: unit.offset() })?;

    if inner.is_empty() {
        return Err(MalformedFormulaError::EmptyGroup { pos: unit.offset() });
    }
    if depth >= config.max_depth {
        return Err(MalformedFormulaError::TooDeep {
            pos: unit.offset(),
            limit: config.max_depth,
        });
    }

    // the inner text is an independent sub-formula with its own cursor
    contributions(inner, unit.offset() + 1, depth + 1, config)?
        .into_iter()
        .map(|c| -> Result<Contribution> {
            let count = c
                .count
                .checked_mul(multiplier)
                .ok_or(MalformedFormulaError::Overflow)?;
            Ok(Contribution::new(c.symbol, count))
        })
        .collect()
}

fn evaluate_unit(
    unit: &Unit<'_>,
    depth: usize,
    config: &ParserConfig,
) -> Result<Vec<Contribution>> {
    match unit.kind() {
        UnitKind::Element => Ok(vec![evaluate_element(unit)?]),
        UnitKind::Group => evaluate_group(unit, depth, config),
    }
}

fn contributions(
    text: &str,
    offset: usize,
    depth: usize,
    config: &ParserConfig,
) -> Result<Vec<Contribution>> {
    let mut out = Vec::new();
    for unit in Cursor::new(text, offset) {
        out.extend(evaluate_unit(&unit?, depth, config)?);
    }
    Ok(out)
}

/// Evaluates a single unit (as produced by [`next_unit`]) into its contributions.
///
/// Groups are evaluated recursively, every nested count multiplied by the
/// group's trailing digit.
pub fn evaluate(unit: &str) -> Result<Vec<Contribution>> {
    evaluate_with(unit, &ParserConfig::default())
}

pub fn evaluate_with(unit: &str, config: &ParserConfig) -> Result<Vec<Contribution>> {
    if unit.is_empty() {
        return Ok(Vec::new());
    }
    let (unit, rest) = segment(unit, 0)?;
    if !rest.is_empty() {
        return Err(MalformedFormulaError::TrailingInput {
            pos: unit.as_str().len(),
        });
    }
    evaluate_unit(&unit, 0, config)
}

// ----- Aggregation -----

/// Folds every contribution of `formula` into an [`ElementTally`], in
/// first-occurrence order.
pub fn aggregate(formula: &str) -> Result<ElementTally> {
    aggregate_with(formula, &ParserConfig::default())
}

pub fn aggregate_with(formula: &str, config: &ParserConfig) -> Result<ElementTally> {
    let mut tally = ElementTally::new();
    for unit in Cursor::new(formula, 0) {
        for contribution in evaluate_unit(&unit?, 0, config)? {
            tally.add(contribution)?;
        }
    }
    Ok(tally)
}

/// Parse a condensed chemical formula and render its element counts as
/// `Element:Count` pairs in first-occurrence order.
/// # Examples
/// ```
/// let result = chem_formula::parse("Cu(OH)2").unwrap();
/// assert_eq!(result, "Cu:1,O:2,H:2");
/// ```
pub fn parse(formula: &str) -> Result<String> {
    parse_with(formula, &ParserConfig::default())
}

pub fn parse_with(formula: &str, config: &ParserConfig) -> Result<String> {
    if formula.is_empty() {
        return Ok(String::new());
    }
    let tally = aggregate_with(formula, config)?;
    debug!(formula, elements = tally.len(), "parsed formula");
    Ok(format(&tally))
}
