use super::RowPredicate;
use crate::{
    reshape::{ColumnRef, LongRecord, LongTable},
    table::Value,
    ChoiceDataError,
};
use serde::{Deserialize, Serialize};

/// a column computed row-by-row from columns already present in a long table.
///
/// ```toml
/// [[derived]]
/// name = "travel_time_hrs"
/// expression = { type = "scaled", column = "travel_time", divisor = 60.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedVariable {
    pub name: String,
    pub expression: DerivedExpression,
}

/// row-local arithmetic used to build model variables. absent inputs produce
/// absent outputs, with the single exception of a satisfied `zero_when` clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DerivedExpression {
    /// `column / divisor`
    Scaled { column: String, divisor: f64 },
    /// 1 if the value of `column` is one of `equals`, otherwise 0
    Indicator { column: String, equals: Vec<f64> },
    /// `1 - column`, for flipping the base level of a 0/1 variable
    Complement { column: String },
    /// `column / divisor`, but exactly 0 on rows where every `zero_when`
    /// predicate holds, whatever the raw value is. used for costs that do not
    /// apply to some travellers, e.g. fares for annual pass holders.
    ScaledUnless {
        column: String,
        divisor: f64,
        zero_when: Vec<RowPredicate>,
    },
}

impl DerivedVariable {
    /// computes this variable and appends it to the table.
    pub fn apply(&self, table: &mut LongTable) -> Result<(), ChoiceDataError> {
        let values = self.evaluate(table)?;
        table.add_column(&self.name, values)?;
        log::info!("derived column '{}'", self.name);
        Ok(())
    }

    /// computes this variable for every row without modifying the table.
    pub fn evaluate(&self, table: &LongTable) -> Result<Vec<Option<Value>>, ChoiceDataError> {
        if table.has_column(&self.name) {
            return Err(ChoiceDataError::InvalidConfiguration(format!(
                "derived column '{}' already exists",
                self.name
            )));
        }
        match &self.expression {
            DerivedExpression::Scaled { column, divisor } => {
                check_divisor(&self.name, *divisor)?;
                let col = table.resolve(column)?;
                map_numeric(table, column, col, |x| x / divisor)
            }
            DerivedExpression::Indicator { column, equals } => {
                let col = table.resolve(column)?;
                map_numeric(table, column, col, |x| {
                    if equals.contains(&x) {
                        1.0
                    } else {
                        0.0
                    }
                })
            }
            DerivedExpression::Complement { column } => {
                let col = table.resolve(column)?;
                map_numeric(table, column, col, |x| 1.0 - x)
            }
            DerivedExpression::ScaledUnless {
                column,
                divisor,
                zero_when,
            } => {
                check_divisor(&self.name, *divisor)?;
                if zero_when.is_empty() {
                    return Err(ChoiceDataError::InvalidConfiguration(format!(
                        "derived column '{}' has an empty zero_when list",
                        self.name
                    )));
                }
                let col = table.resolve(column)?;
                let predicates = zero_when
                    .iter()
                    .map(|p| p.resolve(table))
                    .collect::<Result<Vec<_>, _>>()?;
                table
                    .records()
                    .iter()
                    .map(|record| {
                        if predicates.iter().all(|p| p.test(record)) {
                            Ok(Some(Value::Float(0.0)))
                        } else {
                            numeric(record, column, col)
                                .map(|x| x.map(|v| Value::Float(v / divisor)))
                        }
                    })
                    .collect()
            }
        }
    }
}

fn check_divisor(name: &str, divisor: f64) -> Result<(), ChoiceDataError> {
    if divisor == 0.0 || !divisor.is_finite() {
        Err(ChoiceDataError::InvalidConfiguration(format!(
            "derived column '{name}' has invalid divisor {divisor}"
        )))
    } else {
        Ok(())
    }
}

fn map_numeric<F>(
    table: &LongTable,
    name: &str,
    column: ColumnRef,
    op: F,
) -> Result<Vec<Option<Value>>, ChoiceDataError>
where
    F: Fn(f64) -> f64,
{
    table
        .records()
        .iter()
        .map(|record| numeric(record, name, column).map(|x| x.map(|v| Value::Float(op(v)))))
        .collect()
}

/// numeric value of a column on a record. absent stays absent, text is an error.
fn numeric(record: &LongRecord, name: &str, column: ColumnRef) -> Result<Option<f64>, ChoiceDataError> {
    match record.get(column) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ChoiceDataError::NonNumericValue {
                column: name.to_string(),
                value: value.to_string(),
                observation_id: record.observation_id,
                alternative_id: record.alternative_id.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::{DerivedExpression, DerivedVariable};
    use crate::{
        derived::RowPredicate,
        reshape::{AlternativeColumn, AlternativeId, AlternativeVariable, LongTable, ReshapeConfig, Reshaper},
        table::{assign_observation_ids, Value},
        ChoiceDataError, WideTable,
    };

    fn long_table(rows: &str) -> LongTable {
        let data = format!("GA\tLUGGAGE\tFIRST\tTRAIN_CO\tSM_CO\tCAR_CO\tSM_SEATS\tCHOICE\n{rows}");
        let wide = WideTable::from_reader(data.as_bytes(), b'\t').unwrap();
        let wide = assign_observation_ids(&wide, "custom_id").unwrap();
        let columns = |pairs: &[(i64, &str)]| {
            pairs
                .iter()
                .map(|(a, c)| AlternativeColumn {
                    alternative: AlternativeId(*a),
                    column: c.to_string(),
                })
                .collect::<Vec<_>>()
        };
        let config = ReshapeConfig {
            individual_columns: vec![
                String::from("GA"),
                String::from("LUGGAGE"),
                String::from("FIRST"),
            ],
            alternative_variables: vec![
                AlternativeVariable {
                    name: String::from("travel_cost"),
                    columns: columns(&[(1, "TRAIN_CO"), (2, "SM_CO"), (3, "CAR_CO")]),
                },
                AlternativeVariable {
                    name: String::from("seat_configuration"),
                    columns: columns(&[(2, "SM_SEATS")]),
                },
            ],
            availability_columns: vec![],
            observation_id_column: String::from("custom_id"),
            choice_column: String::from("CHOICE"),
            alternative_id_column: String::from("mode_id"),
            availability_column: String::from("availability"),
            alternative_order: None,
        };
        Reshaper::try_new(config, wide.columns())
            .unwrap()
            .reshape(&wide)
            .unwrap()
    }

    fn cost_hundredth() -> DerivedVariable {
        DerivedVariable {
            name: String::from("travel_cost_hundredth"),
            expression: DerivedExpression::ScaledUnless {
                column: String::from("travel_cost"),
                divisor: 100.0,
                zero_when: vec![
                    RowPredicate {
                        column: String::from("GA"),
                        one_of: vec![1.0],
                    },
                    RowPredicate {
                        column: String::from("mode_id"),
                        one_of: vec![1.0, 2.0],
                    },
                ],
            },
        }
    }

    #[test]
    fn test_annual_pass_zeroes_train_and_swissmetro_cost() {
        let mut table = long_table("1\t1\t0\t48\t52\t65\t0\t2\n0\t3\t1\t48\t52\t65\t0\t3\n");
        cost_hundredth().apply(&mut table).unwrap();
        let values = (0..table.len())
            .map(|row| table.get(row, "travel_cost_hundredth").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                Some(Value::Float(0.0)),
                Some(Value::Float(0.0)),
                Some(Value::Float(0.65)),
                Some(Value::Float(0.48)),
                Some(Value::Float(0.52)),
                Some(Value::Float(0.65)),
            ]
        );
        // exactly zero, never negative zero
        for row in 0..2 {
            match table.get(row, "travel_cost_hundredth").unwrap() {
                Some(Value::Float(v)) => assert!(v == 0.0 && v.is_sign_positive()),
                other => panic!("expected a float, found {other:?}"),
            }
        }
    }

    #[test]
    fn test_satisfied_zero_when_overrides_absent_value() {
        let mut table = long_table("1\t1\t0\t48\t52\t65\t0\t2\n");
        DerivedVariable {
            name: String::from("seats_unless_pass"),
            expression: DerivedExpression::ScaledUnless {
                column: String::from("seat_configuration"),
                divisor: 1.0,
                zero_when: vec![RowPredicate {
                    column: String::from("GA"),
                    one_of: vec![1.0],
                }],
            },
        }
        .apply(&mut table)
        .unwrap();
        assert_eq!(
            table.get(0, "seats_unless_pass").unwrap(),
            Some(Value::Float(0.0))
        );
    }

    #[test]
    fn test_scaled_keeps_absent_values_absent() {
        let mut table = long_table("0\t1\t0\t48\t52\t65\t1\t2\n");
        DerivedVariable {
            name: String::from("seats_scaled"),
            expression: DerivedExpression::Scaled {
                column: String::from("seat_configuration"),
                divisor: 2.0,
            },
        }
        .apply(&mut table)
        .unwrap();
        assert_eq!(table.get(0, "seats_scaled").unwrap(), None);
        assert_eq!(table.get(1, "seats_scaled").unwrap(), Some(Value::Float(0.5)));
        assert_eq!(table.get(2, "seats_scaled").unwrap(), None);
    }

    #[test]
    fn test_indicator_and_complement() {
        let mut table = long_table("0\t3\t1\t48\t52\t65\t1\t2\n");
        DerivedVariable {
            name: String::from("multiple_luggage_pieces"),
            expression: DerivedExpression::Indicator {
                column: String::from("LUGGAGE"),
                equals: vec![3.0],
            },
        }
        .apply(&mut table)
        .unwrap();
        DerivedVariable {
            name: String::from("regular_class"),
            expression: DerivedExpression::Complement {
                column: String::from("FIRST"),
            },
        }
        .apply(&mut table)
        .unwrap();
        assert_eq!(
            table.get(0, "multiple_luggage_pieces").unwrap(),
            Some(Value::Float(1.0))
        );
        assert_eq!(table.get(2, "regular_class").unwrap(), Some(Value::Float(0.0)));
    }

    #[test]
    fn test_zero_divisor_is_rejected() {
        let mut table = long_table("0\t1\t0\t48\t52\t65\t1\t2\n");
        let result = DerivedVariable {
            name: String::from("bad"),
            expression: DerivedExpression::Scaled {
                column: String::from("travel_cost"),
                divisor: 0.0,
            },
        }
        .apply(&mut table);
        assert!(matches!(result, Err(ChoiceDataError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_name_collision_is_rejected() {
        let mut table = long_table("0\t1\t0\t48\t52\t65\t1\t2\n");
        let result = DerivedVariable {
            name: String::from("travel_cost"),
            expression: DerivedExpression::Complement {
                column: String::from("FIRST"),
            },
        }
        .apply(&mut table);
        assert!(matches!(result, Err(ChoiceDataError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_missing_source_column_is_rejected() {
        let mut table = long_table("0\t1\t0\t48\t52\t65\t1\t2\n");
        let result = DerivedVariable {
            name: String::from("headway_hrs"),
            expression: DerivedExpression::Scaled {
                column: String::from("headway"),
                divisor: 60.0,
            },
        }
        .apply(&mut table);
        assert!(matches!(result, Err(ChoiceDataError::MissingColumn(c)) if c == "headway"));
    }

    #[test]
    fn test_empty_zero_when_is_rejected() {
        let mut table = long_table("1\t1\t0\t48\t52\t65\t0\t2\n");
        let result = DerivedVariable {
            name: String::from("travel_cost_hundredth"),
            expression: DerivedExpression::ScaledUnless {
                column: String::from("travel_cost"),
                divisor: 100.0,
                zero_when: vec![],
            },
        }
        .apply(&mut table);
        assert!(matches!(result, Err(ChoiceDataError::InvalidConfiguration(_))));
        assert!(!table.has_column("travel_cost_hundredth"));
    }

    #[test]
    fn test_text_value_names_observation_and_alternative() {
        let mut table = long_table("0\t1\t0\t48\t52\t65\t1\t2\n0\tmany\t0\t48\t52\t65\t1\t2\n");
        let result = DerivedVariable {
            name: String::from("single_luggage_piece"),
            expression: DerivedExpression::Indicator {
                column: String::from("LUGGAGE"),
                equals: vec![1.0],
            },
        }
        .apply(&mut table);
        match result {
            Err(ChoiceDataError::NonNumericValue {
                column,
                value,
                observation_id,
                alternative_id,
            }) => {
                assert_eq!(column, "LUGGAGE");
                assert_eq!(value, "many");
                assert_eq!(observation_id, 2);
                assert_eq!(alternative_id, "1");
            }
            other => panic!("expected NonNumericValue, found {other:?}"),
        }
        assert!(!table.has_column("single_luggage_piece"));
    }
}
