use std::fmt::Display;

/// Items requested per board. Boards with more items are truncated.
pub const ITEMS_PAGE_LIMIT: usize = 500;

/// Build the GraphQL query for the given boards.
///
/// Ids are interpolated verbatim. Anything other than a plain number is
/// logged, since it ends up inside the query text unescaped.
pub fn build_query<I: Display>(board_ids: &[I]) -> String {
    let ids: Vec<String> = board_ids.iter().map(ToString::to_string).collect();
    for id in ids.iter().filter(|id| !is_numeric_id(id)) {
        tracing::warn!(board_id = %id, "board id is not numeric; passing it through unchecked");
    }
    let ids = ids.join(", ");

    format!(
        r#"query {{
  boards(ids: [{ids}]) {{
    name
    columns {{ id title }}
    items_page(limit: {ITEMS_PAGE_LIMIT}) {{
      items {{
        id
        name
        column_values {{ id text }}
      }}
    }}
  }}
}}"#
    )
}

fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}
