use crate::{app::AppError, config::PipelineConfig};
use choicekit_core::{
    filter::FilterSummary, reshape::Reshaper, table::assign_observation_ids, ChoiceDataError,
    LongTable, WideTable,
};

/// a filtered, reshaped sample with derived variables, ready for estimation.
#[derive(Debug, Clone)]
pub struct PreparedSample {
    pub filter_summary: FilterSummary,
    pub long_table: LongTable,
}

/// reads the configured input file and prepares it for estimation.
pub fn prepare(conf: &PipelineConfig, progress: bool) -> Result<PreparedSample, AppError> {
    let delimiter = conf.input.delimiter_byte()?;
    let wide = WideTable::from_path(&conf.input.path, delimiter, progress)?;
    prepare_table(conf, &wide)
}

/// filter, number, reshape, derive and validate, in that order. fails before
/// reshaping if the filter leaves no observations.
pub fn prepare_table(conf: &PipelineConfig, wide: &WideTable) -> Result<PreparedSample, AppError> {
    let (filtered, filter_summary) = conf.filter.apply(wide)?;
    if filter_summary.is_empty() {
        return Err(ChoiceDataError::EmptySample(filter_summary.input_rows).into());
    }

    let numbered = assign_observation_ids(&filtered, &conf.reshape.observation_id_column)?;
    let reshaper = Reshaper::try_new(conf.reshape.clone(), numbered.columns())?;
    let mut long_table = reshaper.reshape(&numbered)?;

    for variable in conf.derived.iter() {
        variable.apply(&mut long_table)?;
    }
    conf.model.validate(&long_table)?;
    log::info!(
        "prepared {} observations ({} long rows, {} model coefficients)",
        long_table.n_observations(),
        long_table.len(),
        conf.model.coefficient_names().len()
    );

    Ok(PreparedSample {
        filter_summary,
        long_table,
    })
}
