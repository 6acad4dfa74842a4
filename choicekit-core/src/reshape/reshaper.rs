use super::{AlternativeColumn, AlternativeId, LongRecord, LongTable, ReshapeConfig};
use crate::{ChoiceDataError, WideTable};
use itertools::Itertools;
use std::collections::{BTreeSet, HashMap, HashSet};

/// a [`ReshapeConfig`] resolved against a wide table schema.
///
/// every column name is checked and turned into a column index here, so
/// [`Reshaper::reshape`] can only fail on row data, never on configuration.
#[derive(Debug, Clone)]
pub struct Reshaper {
    config: ReshapeConfig,
    schema: Vec<String>,
    alternatives: Vec<AlternativeId>,
    observation_id_idx: usize,
    choice_idx: usize,
    individual_idxs: Vec<usize>,
    /// `[variable][alternative position]` -> wide column index
    variable_idxs: Vec<Vec<Option<usize>>>,
    /// `[alternative position]` -> wide column index, empty if no availability is declared
    availability_idxs: Vec<Option<usize>>,
}

impl Reshaper {
    pub fn try_new(config: ReshapeConfig, schema: &[String]) -> Result<Reshaper, ChoiceDataError> {
        let lookup = schema
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect::<HashMap<_, _>>();
        let find = |name: &str| {
            lookup
                .get(name)
                .copied()
                .ok_or_else(|| ChoiceDataError::MissingColumn(name.to_string()))
        };

        check_long_names(&config)?;

        let observation_id_idx = find(config.observation_id_column.as_str())?;
        let choice_idx = find(config.choice_column.as_str())?;
        let individual_idxs = config
            .individual_columns
            .iter()
            .map(|c| find(c.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        // alternative -> column lookups for each mapping, validated for duplicates
        let mut variable_maps = Vec::with_capacity(config.alternative_variables.len());
        for variable in config.alternative_variables.iter() {
            if variable.columns.is_empty() {
                return Err(ChoiceDataError::InvalidConfiguration(format!(
                    "variable '{}' does not map any alternatives",
                    variable.name
                )));
            }
            variable_maps.push(mapping_lookup(&variable.name, &variable.columns, &find)?);
        }
        let availability_map =
            mapping_lookup("availability", &config.availability_columns, &find)?;

        let universe = variable_maps
            .iter()
            .flat_map(|m| m.keys())
            .chain(availability_map.keys())
            .copied()
            .collect::<BTreeSet<_>>();
        let alternatives = alternative_order(&config, universe)?;

        let variable_idxs = variable_maps
            .iter()
            .map(|m| alternatives.iter().map(|a| m.get(a).copied()).collect_vec())
            .collect_vec();
        let availability_idxs = if config.availability_columns.is_empty() {
            vec![]
        } else {
            alternatives
                .iter()
                .map(|a| availability_map.get(a).copied())
                .collect_vec()
        };

        log::debug!(
            "reshape validated: {} individual fields, {} alternative variables, alternatives [{}]",
            individual_idxs.len(),
            variable_idxs.len(),
            alternatives.iter().join(", ")
        );

        Ok(Reshaper {
            config,
            schema: schema.to_vec(),
            alternatives,
            observation_id_idx,
            choice_idx,
            individual_idxs,
            variable_idxs,
            availability_idxs,
        })
    }

    /// the alternative universe in emission order.
    pub fn alternatives(&self) -> &[AlternativeId] {
        &self.alternatives
    }

    /// value columns of the long table this reshaper produces, in record order.
    pub fn value_columns(&self) -> Vec<String> {
        let mut columns = self.config.individual_columns.clone();
        columns.extend(
            self.config
                .alternative_variables
                .iter()
                .map(|v| v.name.clone()),
        );
        if !self.availability_idxs.is_empty() {
            columns.push(self.config.availability_column.clone());
        }
        columns
    }

    /// emits one long row per (wide row, alternative), alternatives in universe order.
    pub fn reshape(&self, wide: &WideTable) -> Result<LongTable, ChoiceDataError> {
        if wide.columns() != self.schema.as_slice() {
            return Err(ChoiceDataError::InvalidConfiguration(String::from(
                "wide table schema differs from the schema this reshape was validated against",
            )));
        }

        let mut records = Vec::with_capacity(wide.len() * self.alternatives.len());
        for (row_idx, row) in wide.rows().iter().enumerate() {
            let observation_value = &row[self.observation_id_idx];
            let observation_id = observation_value.as_integer().ok_or_else(|| {
                ChoiceDataError::InvalidObservationId {
                    column: self.config.observation_id_column.clone(),
                    value: observation_value.to_string(),
                    row: row_idx,
                }
            })?;

            let choice_value = &row[self.choice_idx];
            let choice = choice_value
                .as_integer()
                .map(AlternativeId)
                .filter(|c| self.alternatives.contains(c))
                .ok_or_else(|| ChoiceDataError::ChoiceOutsideUniverse {
                    observation_id: observation_id.to_string(),
                    value: choice_value.to_string(),
                    universe: self.alternatives.iter().join(", "),
                })?;

            for (alt_pos, alternative) in self.alternatives.iter().enumerate() {
                let individual = self.individual_idxs.iter().map(|i| Some(row[*i].clone()));
                let variables = self
                    .variable_idxs
                    .iter()
                    .map(|by_alt| by_alt[alt_pos].map(|i| row[i].clone()));
                let availability = self
                    .availability_idxs
                    .get(alt_pos)
                    .map(|idx| idx.map(|i| row[i].clone()));
                let values = individual
                    .chain(variables)
                    .chain(availability)
                    .collect_vec();
                records.push(LongRecord {
                    observation_id,
                    alternative_id: *alternative,
                    chosen: *alternative == choice,
                    values,
                });
            }
        }

        log::info!(
            "reshaped {} observations x {} alternatives into {} long rows",
            wide.len(),
            self.alternatives.len(),
            records.len()
        );

        let availability_column = if self.availability_idxs.is_empty() {
            None
        } else {
            Some(self.config.availability_column.clone())
        };
        Ok(LongTable::new(
            self.config.observation_id_column.clone(),
            self.config.alternative_id_column.clone(),
            self.config.choice_column.clone(),
            availability_column,
            self.value_columns(),
            self.alternatives.clone(),
            records,
        ))
    }
}

/// long-format column names must be unique across identifiers, individual
/// fields, variables and availability.
fn check_long_names(config: &ReshapeConfig) -> Result<(), ChoiceDataError> {
    let mut names = vec![
        &config.observation_id_column,
        &config.alternative_id_column,
        &config.choice_column,
    ];
    names.extend(config.individual_columns.iter());
    names.extend(config.alternative_variables.iter().map(|v| &v.name));
    if !config.availability_columns.is_empty() {
        names.push(&config.availability_column);
    }
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ChoiceDataError::InvalidConfiguration(format!(
                "long table column '{name}' would appear more than once"
            )));
        }
    }
    Ok(())
}

fn mapping_lookup<F>(
    name: &str,
    columns: &[AlternativeColumn],
    find: &F,
) -> Result<HashMap<AlternativeId, usize>, ChoiceDataError>
where
    F: Fn(&str) -> Result<usize, ChoiceDataError>,
{
    let mut lookup = HashMap::with_capacity(columns.len());
    for AlternativeColumn {
        alternative,
        column,
    } in columns.iter()
    {
        let idx = find(column.as_str())?;
        if lookup.insert(*alternative, idx).is_some() {
            return Err(ChoiceDataError::InvalidConfiguration(format!(
                "'{name}' maps alternative {alternative} more than once"
            )));
        }
    }
    Ok(lookup)
}

fn alternative_order(
    config: &ReshapeConfig,
    universe: BTreeSet<AlternativeId>,
) -> Result<Vec<AlternativeId>, ChoiceDataError> {
    if universe.is_empty() {
        return Err(ChoiceDataError::InvalidConfiguration(String::from(
            "no alternatives are declared by any variable or availability mapping",
        )));
    }
    match &config.alternative_order {
        None => Ok(universe.into_iter().collect_vec()),
        Some(order) => {
            let ordered = order.iter().copied().collect::<BTreeSet<_>>();
            if ordered.len() != order.len() || ordered != universe {
                Err(ChoiceDataError::InvalidConfiguration(format!(
                    "alternative_order [{}] must list each of the alternatives [{}] exactly once",
                    order.iter().join(", "),
                    universe.iter().join(", ")
                )))
            } else {
                Ok(order.clone())
            }
        }
    }
}
