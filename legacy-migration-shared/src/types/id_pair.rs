/// The identity remap for one migrated parent record.
///
/// Produced when a parent is inserted (the store assigns `new`) and passed
/// by value into nested child migrations, which scope their remote fetches
/// by `old` and write `new` into foreign key columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPair {
    /// Identifier the record carried in the legacy API.
    pub old: i32,
    /// Identifier assigned by the local store.
    pub new: i32,
}
