mod alternative_id;
mod column_ref;
mod long_record;
mod long_table;
mod reshape_config;
mod reshaper;

pub use alternative_id::AlternativeId;
pub use column_ref::ColumnRef;
pub use long_record::LongRecord;
pub use long_table::LongTable;
pub use reshape_config::{AlternativeColumn, AlternativeVariable, ReshapeConfig};
pub use reshaper::Reshaper;
