use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ExtractError, Result};
use crate::model::board::BoardResult;
use crate::model::table::{Record, Table, ITEM_LABEL};

#[derive(Deserialize)]
struct GqlResponse {
    data: Option<GqlData>,
    #[serde(default)]
    errors: Vec<GqlError>,
}

#[derive(Deserialize)]
struct GqlError {
    message: String,
}

#[derive(Deserialize)]
struct GqlData {
    boards: Option<Vec<Board>>,
}

#[derive(Deserialize)]
struct Board {
    name: String,
    #[serde(default)]
    columns: Option<Vec<ColumnDef>>,
    items_page: ItemsPage,
}

#[derive(Deserialize)]
struct ColumnDef {
    id: String,
    title: String,
}

#[derive(Deserialize)]
struct ItemsPage {
    items: Vec<Item>,
}

#[derive(Deserialize)]
struct Item {
    id: String,
    name: String,
    #[serde(default)]
    column_values: Vec<ColumnValue>,
}

#[derive(Deserialize)]
struct ColumnValue {
    id: String,
    text: Option<String>,
}

/// Turn a decoded boards response into one table per board, in response order.
pub fn flatten_response(response: Value) -> Result<Vec<BoardResult>> {
    let gql: GqlResponse =
        serde_json::from_value(response).map_err(|e| ExtractError::Malformed(e.to_string()))?;

    if !gql.errors.is_empty() {
        return Err(ExtractError::Api(
            gql.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    let boards = gql
        .data
        .ok_or_else(|| ExtractError::Malformed("missing `data`".into()))?
        .boards
        .ok_or_else(|| ExtractError::Malformed("missing `data.boards`".into()))?;

    Ok(boards.into_iter().map(flatten_board).collect())
}

fn flatten_board(board: Board) -> BoardResult {
    let titles: HashMap<String, String> = board
        .columns
        .unwrap_or_default()
        .into_iter()
        .map(|c| (c.id, c.title))
        .collect();

    let records: Vec<Record> = board.items_page.items.into_iter().map(item_record).collect();
    let mut table = Table::from_records(records);
    table.rename_columns(&titles);

    tracing::debug!(
        board = %board.name,
        rows = table.rows().len(),
        columns = table.columns().len(),
        "flattened board"
    );

    BoardResult {
        name: board.name,
        table,
    }
}

fn item_record(item: Item) -> Record {
    tracing::trace!(item = %item.id, values = item.column_values.len(), "flattening item");
    let mut record = Record::new();
    for value in item.column_values {
        record.insert(value.id, value.text);
    }
    record.insert(ITEM_LABEL, Some(item.name));
    record
}
