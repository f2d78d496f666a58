use std::collections::{HashMap, HashSet};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Label of the field holding an item's display name.
pub const ITEM_LABEL: &str = "Item";

/// A sparse row: only the keys an item actually carries, in insertion order.
///
/// A key that was never inserted is absent. A key inserted with `None` is
/// present with a null value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Option<String>> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Key used inside records (a column id, or [`ITEM_LABEL`]).
    pub key: String,
    /// Display name; starts out equal to `key` until a rename pass runs.
    pub label: String,
}

/// Rows with heterogeneous key sets plus the union of their keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Record>,
}

impl Table {
    /// Assemble rows into a table. Columns are the union of row keys in
    /// first-seen order.
    pub fn from_records(rows: Vec<Record>) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if seen.insert(key.to_string()) {
                    columns.push(Column {
                        key: key.to_string(),
                        label: key.to_string(),
                    });
                }
            }
        }
        Self { columns, rows }
    }

    /// Relabel columns whose key appears in `titles`.
    ///
    /// Keys missing from `titles` keep their current label. Titles are
    /// checked against the labels the table ends up with: a title that would
    /// duplicate another column's final label is skipped (first column wins),
    /// so labels stay unique.
    pub fn rename_columns(&mut self, titles: &HashMap<String, String>) {
        let mut targets: Vec<Option<&String>> = self
            .columns
            .iter()
            .map(|c| titles.get(&c.key).filter(|t| **t != c.label))
            .collect();

        // Each refusal turns a title back into a kept label, which can
        // collide with a title granted earlier, so repeat until stable.
        loop {
            let mut taken: HashSet<&str> = self
                .columns
                .iter()
                .zip(&targets)
                .filter(|(_, target)| target.is_none())
                .map(|(c, _)| c.label.as_str())
                .collect();
            let mut refused = false;
            for (column, target) in self.columns.iter().zip(targets.iter_mut()) {
                let Some(title) = *target else {
                    continue;
                };
                if !taken.insert(title.as_str()) {
                    tracing::debug!(column = %column.key, %title, "title already in use, keeping id");
                    *target = None;
                    refused = true;
                }
            }
            if !refused {
                break;
            }
        }

        for (column, target) in self.columns.iter_mut().zip(targets) {
            if let Some(title) = target {
                column.label = title.clone();
            }
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of the cell under `label` in row `row`. Absent and null cells
    /// both read as `None`.
    pub fn cell(&self, row: usize, label: &str) -> Option<&str> {
        let column = self.columns.iter().find(|c| c.label == label)?;
        self.rows.get(row)?.get(&column.key)?.as_deref()
    }

    /// Row `row` viewed through the current labels, holding only that row's own keys.
    pub fn labeled_row(&self, row: usize) -> Option<LabeledRow<'_>> {
        self.rows.get(row).map(|record| LabeledRow {
            table: self,
            record,
        })
    }

    pub fn labeled_rows(&self) -> impl Iterator<Item = LabeledRow<'_>> {
        self.rows.iter().map(move |record| LabeledRow {
            table: self,
            record,
        })
    }
}

/// A record paired with its table's column labels.
#[derive(Debug, Clone, Copy)]
pub struct LabeledRow<'a> {
    table: &'a Table,
    record: &'a Record,
}

impl<'a> LabeledRow<'a> {
    /// `(label, value)` pairs for the keys this row carries, in table column order.
    pub fn fields(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + '_ {
        let (table, record) = (self.table, self.record);
        table.columns.iter().filter_map(move |c| {
            record
                .get(&c.key)
                .map(|value| (c.label.as_str(), value.as_deref()))
        })
    }
}

impl Serialize for LabeledRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.len()))?;
        for (label, value) in self.fields() {
            map.serialize_entry(label, &value)?;
        }
        map.end()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        let labels: Vec<&str> = self.labels().collect();
        map.serialize_entry("columns", &labels)?;
        let rows: Vec<LabeledRow<'_>> = self.labeled_rows().collect();
        map.serialize_entry("rows", &rows)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, Option<&str>)]) -> Record {
        let mut r = Record::new();
        for (k, v) in fields {
            r.insert(*k, v.map(String::from));
        }
        r
    }

    fn titles(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn record_distinguishes_absent_from_null() {
        let r = record(&[("c1", None)]);
        assert_eq!(r.get("c1"), Some(&None));
        assert_eq!(r.get("c2"), None);
        assert!(r.contains_key("c1"));
        assert!(!r.contains_key("c2"));
    }

    #[test]
    fn record_insert_replaces_in_place() {
        let mut r = record(&[("a", Some("1")), ("b", Some("2"))]);
        r.insert("a", Some("3".into()));
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(r.get("a"), Some(&Some("3".to_string())));
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let table = Table::from_records(vec![
            record(&[("c1", Some("x")), (ITEM_LABEL, Some("A"))]),
            record(&[("c2", Some("y")), (ITEM_LABEL, Some("B"))]),
        ]);
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["c1", "Item", "c2"]);
    }

    #[test]
    fn disjoint_rows_keep_their_own_keys() {
        let table = Table::from_records(vec![
            record(&[("c1", Some("x"))]),
            record(&[("c2", Some("y"))]),
        ]);
        assert_eq!(table.rows()[0].keys().collect::<Vec<_>>(), vec!["c1"]);
        assert_eq!(table.rows()[1].keys().collect::<Vec<_>>(), vec!["c2"]);
        assert_eq!(table.cell(0, "c2"), None);
        assert_eq!(table.cell(1, "c2"), Some("y"));
    }

    #[test]
    fn empty_rename_map_changes_nothing() {
        let mut table = Table::from_records(vec![record(&[("c1", Some("x"))])]);
        let before = table.clone();
        table.rename_columns(&HashMap::new());
        assert_eq!(table, before);
    }

    #[test]
    fn rename_is_best_effort() {
        let mut table = Table::from_records(vec![record(&[
            ("c1", Some("x")),
            ("c9", Some("y")),
            (ITEM_LABEL, Some("A")),
        ])]);
        table.rename_columns(&titles(&[("c1", "Status")]));
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["Status", "c9", "Item"]);
        assert_eq!(table.cell(0, "Status"), Some("x"));
        assert_eq!(table.cell(0, "c1"), None);
    }

    #[test]
    fn colliding_titles_keep_the_id() {
        let mut table = Table::from_records(vec![record(&[
            ("c1", Some("x")),
            ("c2", Some("y")),
            ("c3", Some("z")),
            (ITEM_LABEL, Some("A")),
        ])]);
        table.rename_columns(&titles(&[("c1", "Owner"), ("c2", "Owner"), ("c3", "Item")]));
        assert_eq!(
            table.labels().collect::<Vec<_>>(),
            vec!["Owner", "c2", "c3", "Item"]
        );
    }

    #[test]
    fn rename_can_swap_labels_between_columns() {
        let mut table = Table::from_records(vec![record(&[("a", Some("1")), ("b", Some("2"))])]);
        table.rename_columns(&titles(&[("a", "Alpha"), ("b", "a")]));
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["Alpha", "a"]);
        assert_eq!(table.cell(0, "a"), Some("2"));
    }

    #[test]
    fn title_matching_a_renamed_id_is_applied() {
        let mut table = Table::from_records(vec![record(&[("a", Some("1")), ("b", Some("2"))])]);
        table.rename_columns(&titles(&[("a", "b"), ("b", "Bee")]));
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["b", "Bee"]);
        assert_eq!(table.cell(0, "b"), Some("1"));
        assert_eq!(table.cell(0, "Bee"), Some("2"));
    }

    #[test]
    fn refused_title_keeps_its_id_reserved() {
        // c2 loses "X" to c1 and keeps "c2", so c3 may not take "c2".
        let mut table = Table::from_records(vec![record(&[
            ("c1", Some("1")),
            ("c2", Some("2")),
            ("c3", Some("3")),
        ])]);
        table.rename_columns(&titles(&[("c1", "X"), ("c2", "X"), ("c3", "c2")]));
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["X", "c2", "c3"]);
        assert_eq!(table.cell(0, "c2"), Some("2"));
    }

    #[test]
    fn serializes_rows_with_only_their_keys() {
        let mut table = Table::from_records(vec![
            record(&[("c1", Some("Done")), (ITEM_LABEL, Some("A"))]),
            record(&[(ITEM_LABEL, Some("B"))]),
            record(&[("c1", None), (ITEM_LABEL, Some("C"))]),
        ]);
        table.rename_columns(&titles(&[("c1", "Status")]));
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "columns": ["Status", "Item"],
                "rows": [
                    {"Status": "Done", "Item": "A"},
                    {"Item": "B"},
                    {"Status": null, "Item": "C"},
                ]
            })
        );
    }
}
