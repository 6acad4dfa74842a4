/// a resolved reference to a column of a [`super::LongTable`].
///
/// the identifier and chosen columns live on each [`super::LongRecord`] directly,
/// every other column is stored positionally in `LongRecord::values`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef {
    ObservationId,
    AlternativeId,
    Chosen,
    Value(usize),
}
