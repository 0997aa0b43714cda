//! Stoichiometry extraction from pre-balanced equation strings.

use crate::error::{ReactionError, ReactionResult};
use std::collections::BTreeMap;

/// Formula → signed net coefficient (reactants negative, products positive).
pub type ReactionStoichiometry = BTreeMap<String, f64>;

/// Reaction-arrow delimiters, checked in this order at equal positions.
const DELIMITERS: [&str; 3] = ["=", "→", "->"];

fn split_sides(equation: &str) -> Option<(&str, &str)> {
    let mut earliest: Option<(usize, &str)> = None;
    for delim in DELIMITERS {
        if let Some(pos) = equation.find(delim)
            && earliest.is_none_or(|(best, _)| pos < best)
        {
            earliest = Some((pos, delim));
        }
    }
    earliest.map(|(pos, delim)| (&equation[..pos], &equation[pos + delim.len()..]))
}

/// Split a term like "2H2O" or "1.5 O2" into (coefficient, formula text).
fn split_term(term: &str) -> (f64, &str) {
    let term = term.trim();
    let split_at = term
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
        .map(|(i, _)| i)
        .unwrap_or(term.len());
    let (head, tail) = term.split_at(split_at);
    let coefficient = if head.is_empty() {
        1.0
    } else {
        head.parse().unwrap_or(1.0)
    };
    (coefficient, tail.trim())
}

/// Match `text` against the known formulas, longest first.
fn match_formula<'a>(text: &str, known_longest_first: &'a [&'a str]) -> Option<&'a str> {
    known_longest_first
        .iter()
        .find(|formula| text == **formula)
        .copied()
}

/// Extract the net stoichiometry of a pre-balanced equation.
///
/// The string splits on the first of '=', '→' or '->'; each side splits on
/// '+'. A term is an optional leading numeric coefficient (default 1.0)
/// directly followed by one of `known_formulas`; repeats sum, reactant
/// coefficients are negated, and the result carries one net coefficient
/// per formula. Terms that match no known formula are ignored; the
/// upstream extractor supplies the full compound list.
///
/// Errors: no delimiter, or zero extracted coefficients.
pub fn parse_equation(
    equation: &str,
    known_formulas: &[String],
) -> ReactionResult<ReactionStoichiometry> {
    let (reactants, products) = split_sides(equation).ok_or(ReactionError::MalformedEquation {
        reason: "no reaction delimiter ('=', '→', '->')",
    })?;

    let mut longest_first: Vec<&str> = known_formulas.iter().map(String::as_str).collect();
    longest_first.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut stoichiometry = ReactionStoichiometry::new();
    for (side, sign) in [(reactants, -1.0), (products, 1.0)] {
        for term in side.split('+') {
            let (coefficient, text) = split_term(term);
            if text.is_empty() {
                continue;
            }
            if let Some(formula) = match_formula(text, &longest_first) {
                *stoichiometry.entry(formula.to_string()).or_insert(0.0) += sign * coefficient;
            }
        }
    }

    if stoichiometry.is_empty() {
        return Err(ReactionError::MalformedEquation {
            reason: "no known formulas extracted from the equation",
        });
    }
    Ok(stoichiometry)
}
