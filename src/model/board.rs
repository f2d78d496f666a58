use serde::Serialize;

use super::table::Table;

/// A board's name paired with its flattened, relabeled table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardResult {
    pub name: String,
    #[serde(flatten)]
    pub table: Table,
}
