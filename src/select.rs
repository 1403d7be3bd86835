pub mod value;
pub mod variable;

pub use value::{DefaultValueSelector, LcvValueSelector, ValueSelector};
pub use variable::{DegreeSelector, DomWdegSelector, MrvDegreeSelector, MrvSelector, VariableSelector};
