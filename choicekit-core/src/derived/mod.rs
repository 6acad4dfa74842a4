mod derived_variable;
mod row_predicate;

pub use derived_variable::{DerivedExpression, DerivedVariable};
pub use row_predicate::RowPredicate;
