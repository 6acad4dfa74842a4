mod observation_ids;
mod value;
mod wide_table;

pub use observation_ids::assign_observation_ids;
pub use value::Value;
pub use wide_table::WideTable;
