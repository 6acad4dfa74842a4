use crate::{
    reshape::{AlternativeId, ColumnRef, LongTable},
    ChoiceDataError,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// alternatives sharing one coefficient in a utility equation.
///
/// in configuration, `[1, 2, 3]` gives each alternative its own coefficient
/// while `[[1, 2], 3]` shares one between alternatives 1 and 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlternativeGroup {
    Single(AlternativeId),
    Shared(Vec<AlternativeId>),
}

impl AlternativeGroup {
    pub fn alternatives(&self) -> Vec<AlternativeId> {
        match self {
            AlternativeGroup::Single(a) => vec![*a],
            AlternativeGroup::Shared(group) => group.clone(),
        }
    }
}

/// one variable of a multinomial logit utility specification along with the
/// human-readable names of the coefficients it introduces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecificationTerm {
    pub variable: String,
    pub alternatives: Vec<AlternativeGroup>,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSpecification {
    pub terms: Vec<SpecificationTerm>,
}

impl ModelSpecification {
    /// pseudo-variable for alternative-specific constants. needs no column.
    pub const INTERCEPT: &'static str = "intercept";

    /// coefficient names in specification order.
    pub fn coefficient_names(&self) -> Vec<String> {
        self.terms
            .iter()
            .flat_map(|t| t.names.iter().cloned())
            .collect_vec()
    }

    /// checks that this specification can be estimated on the given table.
    pub fn validate(&self, table: &LongTable) -> Result<(), ChoiceDataError> {
        if self.terms.is_empty() {
            return Err(ChoiceDataError::InvalidSpecification(String::from(
                "specification has no terms",
            )));
        }
        let universe = table.alternatives().iter().collect::<HashSet<_>>();
        let mut names = HashSet::new();
        for term in self.terms.iter() {
            let variable = &term.variable;
            let column = if variable == Self::INTERCEPT {
                None
            } else {
                let column = table.resolve(variable).map_err(|_| {
                    ChoiceDataError::InvalidSpecification(format!(
                        "variable '{variable}' is not a column of the long table"
                    ))
                })?;
                Some(column)
            };
            if term.alternatives.is_empty() {
                return Err(ChoiceDataError::InvalidSpecification(format!(
                    "variable '{variable}' is not applied to any alternative"
                )));
            }
            if term.alternatives.len() != term.names.len() {
                return Err(ChoiceDataError::InvalidSpecification(format!(
                    "variable '{variable}' has {} alternative groups but {} coefficient names",
                    term.alternatives.len(),
                    term.names.len()
                )));
            }
            if let Some(group) = term.alternatives.iter().find(|g| g.alternatives().is_empty()) {
                return Err(ChoiceDataError::InvalidSpecification(format!(
                    "variable '{variable}' has an empty alternative group {group:?}"
                )));
            }
            let mut seen = HashSet::new();
            for alternative in term.alternatives.iter().flat_map(|g| g.alternatives()) {
                if !universe.contains(&alternative) {
                    return Err(ChoiceDataError::InvalidSpecification(format!(
                        "variable '{variable}' references alternative {alternative} outside of [{}]",
                        table.alternatives().iter().join(", ")
                    )));
                }
                if !seen.insert(alternative) {
                    return Err(ChoiceDataError::InvalidSpecification(format!(
                        "variable '{variable}' references alternative {alternative} more than once"
                    )));
                }
                if let Some(column) = column {
                    if !defined_for(table, column, alternative) {
                        return Err(ChoiceDataError::InvalidSpecification(format!(
                            "variable '{variable}' has no value for alternative {alternative}"
                        )));
                    }
                }
            }
            for name in term.names.iter() {
                if !names.insert(name) {
                    return Err(ChoiceDataError::InvalidSpecification(format!(
                        "coefficient name '{name}' is used more than once"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// true if some row of the alternative has a value in the column. a
/// coefficient on a column that is absent for every row cannot be estimated.
fn defined_for(table: &LongTable, column: ColumnRef, alternative: AlternativeId) -> bool {
    table
        .records()
        .iter()
        .any(|r| r.alternative_id == alternative && r.get(column).is_some())
}
