//! Cryptarithmetic (e.g. `SEND + MORE = MONEY`). Ground: section 3/4.B
//! (`AllDifferent`, `Linear`) and design notes §9's documented-but-missing
//! leading-digit restriction, fixed here by construction.

use std::collections::{HashMap, HashSet};

use crate::constraints::{AllDifferentConstraint, LinearConstraint, LinearOp};
use crate::csp::{Csp, CspBuilder};
use crate::domain::Domain;
use crate::error::CspError;

fn accumulate(word: &str, sign: i64, coeffs: &mut HashMap<char, i64>) {
    let mut place = 1i64;
    for ch in word.chars().rev() {
        *coeffs.entry(ch).or_insert(0) += sign * place;
        place *= 10;
    }
}

/// One variable per distinct letter (domain `0..=9`, or `1..=9` for a
/// letter that leads any multi-letter word — the unary restriction design
/// notes §9 flags as missing from the reference), an `AllDifferent` over
/// every letter, and a single `Linear` equation `sum(addends) - result =
/// 0` with per-letter coefficients from their positional place value.
pub fn build(addends: &[String], result_word: &str) -> Result<Csp<i64>, CspError> {
    if addends.is_empty() {
        return Err(CspError::MalformedInput("at least one addend word is required".to_string()));
    }
    let words: Vec<&str> = addends.iter().map(String::as_str).chain(std::iter::once(result_word)).collect();

    let mut leading = HashSet::new();
    let mut letters = Vec::new();
    let mut seen = HashSet::new();
    for &word in &words {
        if word.is_empty() {
            return Err(CspError::MalformedInput("cryptarithmetic words must be non-empty".to_string()));
        }
        if word.len() > 1 {
            leading.insert(word.chars().next().expect("non-empty"));
        }
        for ch in word.chars() {
            if !ch.is_ascii_alphabetic() {
                return Err(CspError::MalformedInput(format!("non-alphabetic character `{ch}`")));
            }
            let ch = ch.to_ascii_uppercase();
            if seen.insert(ch) {
                letters.push(ch);
            }
        }
    }
    if letters.len() > 10 {
        return Err(CspError::MalformedInput(format!(
            "cryptarithmetic puzzle has {} distinct letters, at most 10 fit in base 10",
            letters.len()
        )));
    }

    let mut b: CspBuilder<i64> = CspBuilder::new();
    let mut idx = HashMap::with_capacity(letters.len());
    let mut domains_for_linear = HashMap::with_capacity(letters.len());
    for &ch in &letters {
        let domain = if leading.contains(&ch.to_ascii_lowercase()) || leading.contains(&ch) {
            Domain::new((1..=9i64).collect())
        } else {
            Domain::new((0..=9i64).collect())
        };
        domains_for_linear.insert(ch, domain.copy());
        idx.insert(ch, b.add_variable(ch.to_string(), domain)?);
    }

    let scope: Vec<usize> = letters.iter().map(|ch| idx[ch]).collect();
    b.add_constraint(Box::new(AllDifferentConstraint::new("letters-all-different", scope.clone())))?;

    let mut coeffs_by_letter: HashMap<char, i64> = HashMap::new();
    for word in addends {
        accumulate(&word.to_ascii_uppercase(), 1, &mut coeffs_by_letter);
    }
    accumulate(&result_word.to_ascii_uppercase(), -1, &mut coeffs_by_letter);

    let coeffs: Vec<i64> = letters.iter().map(|ch| coeffs_by_letter.get(ch).copied().unwrap_or(0)).collect();
    let initial_domains: Vec<&Domain<i64>> = letters.iter().map(|ch| &domains_for_linear[ch]).collect();
    let linear = LinearConstraint::new("sum-equation", scope, coeffs, LinearOp::Eq, 0, &initial_domains);
    b.add_constraint(Box::new(linear))?;

    b.build()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::result::SolveStatus;
    use crate::search::{BacktrackingSolver, SolverConfig};

    #[test]
    fn send_more_money_is_satisfiable_with_no_leading_zero() {
        let csp = build(&["SEND".to_string(), "MORE".to_string()], "MONEY").unwrap();
        let solver = BacktrackingSolver::new(SolverConfig::default());
        let result = solver.solve(&csp);
        assert_eq!(result.status, SolveStatus::Satisfiable);
        let sol = &result.solutions[0];
        assert_ne!(sol["S"], 0);
        assert_ne!(sol["M"], 0);

        let send = sol["S"] * 1000 + sol["E"] * 100 + sol["N"] * 10 + sol["D"];
        let more = sol["M"] * 1000 + sol["O"] * 100 + sol["R"] * 10 + sol["E"];
        let money = sol["M"] * 10000 + sol["O"] * 1000 + sol["N"] * 100 + sol["E"] * 10 + sol["Y"];
        assert_eq!(send + more, money);
    }

    #[test]
    fn too_many_distinct_letters_is_rejected() {
        let err = build(&["ABCDEFGHIJ".to_string()], "KLMNOPQRST").unwrap_err();
        assert!(matches!(err, CspError::MalformedInput(_)));
    }
}
