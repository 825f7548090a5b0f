/// Storage-side view of the health probe. Mapped onto the API payload by the
/// HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStats {
    pub database: String,
    pub schema: String,
    pub wishes_table: bool,
    pub count: i64,
}
