//! Pull items from monday.com boards and flatten them into sparse tables,
//! one per board, with column ids relabeled to their titles.

pub mod config;
pub mod error;
pub mod extractor;
pub mod flatten;
pub mod model;
pub mod query;
pub mod render;

pub use error::ExtractError;
pub use extractor::{BoardExtractor, MondayExtractor};
pub use model::board::BoardResult;
pub use model::table::{Record, Table, ITEM_LABEL};
