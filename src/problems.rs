//! Curated problem builders: external payload → `Csp`. Ground: section 6,
//! "Problem builders".

pub mod coloring;
pub mod cryptarithmetic;
pub mod queens;
pub mod sudoku;
