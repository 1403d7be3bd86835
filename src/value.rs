//! Marker traits bounding the generic domain-element type `V`.
//!
//! Mirrors the teacher's `DomainType`/`IdentifierType` split (blanket-impl'd
//! marker traits over the primitive types the solver actually gets used
//! with) rather than spelling the same long bound list out at every impl
//! site.

use std::fmt::Debug;
use std::hash::Hash;

/// Bound required of every CSP value type: equality and hashing, per
/// section 3 of the spec ("All operations require value equality and
/// hashing"). `Send + Sync` let a `Csp` (and its constraints) be shared
/// read-only across solves running on separate threads, per section 5.
pub trait Value: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T: Clone + Eq + Hash + Debug + Send + Sync> Value for T {}

/// Additional bound for constraints that need a total order
/// (`LessThanOrEqual`, bounds-based `Linear` analysis).
pub trait OrderedValue: Value + Ord {}

impl<T: Value + Ord> OrderedValue for T {}

/// Bound for constraints doing arithmetic on the value itself
/// (`Linear`, `NQueensDiagonalConstraint`'s `|col1 - col2|`).
pub trait NumericValue: OrderedValue + Copy {
    fn to_i64(self) -> i64;
    fn from_i64(v: i64) -> Self;
}

macro_rules! impl_numeric_value {
    ($($t:ty),*) => {
        $(
            impl NumericValue for $t {
                fn to_i64(self) -> i64 {
                    self as i64
                }
                fn from_i64(v: i64) -> Self {
                    v as $t
                }
            }
        )*
    };
}

impl_numeric_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
