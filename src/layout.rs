// src/layout.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use thiserror::Error;

/// Position of a physical row in file order, starting at 0.
pub type RowIndex = usize;

/// What the classifier does with a row at a given index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    /// Emit field 0 only (a metadata value).
    FirstField,
    /// Emit every field (the column-name header).
    FullRow,
    /// No emission.
    Skip,
}

/// Semantic names for the positional header rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderField {
    Name,
    GridReference,
    Altitude,
    Latitude,
    ColumnNames,
}

impl HeaderField {
    pub fn as_str(&self) -> &str {
        match self {
            HeaderField::Name => "name",
            HeaderField::GridReference => "grid_reference",
            HeaderField::Altitude => "altitude",
            HeaderField::Latitude => "latitude",
            HeaderField::ColumnNames => "column_names",
        }
    }

    /// The action a header field implies: the column-name row is emitted
    /// whole, every other field is a single value.
    pub fn default_action(&self) -> RowAction {
        match self {
            HeaderField::ColumnNames => RowAction::FullRow,
            _ => RowAction::FirstField,
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("row {index} is assigned twice")]
    DuplicateIndex { index: RowIndex },
    #[error("field `{field}` is assigned twice")]
    DuplicateField { field: HeaderField },
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Slot {
    action: RowAction,
    field: Option<HeaderField>,
}

/// Immutable mapping from row index to the action taken on that row.
///
/// Indexes that are not mapped fall through to [`RowAction::Skip`], which
/// covers blank separators and the bulk data rows alike.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LayoutSpec", into = "LayoutSpec")]
pub struct RowLayout {
    slots: BTreeMap<RowIndex, Slot>,
}

impl RowLayout {
    /// The station file layout: name, NGR, altitude and latitude on rows
    /// 0–3, a blank row 4, column names on row 5, data from row 6 on.
    pub fn lds() -> Self {
        let mut slots = BTreeMap::new();
        for (index, field) in [
            (0, HeaderField::Name),
            (1, HeaderField::GridReference),
            (2, HeaderField::Altitude),
            (3, HeaderField::Latitude),
            (5, HeaderField::ColumnNames),
        ] {
            slots.insert(
                index,
                Slot {
                    action: field.default_action(),
                    field: Some(field),
                },
            );
        }
        Self { slots }
    }

    pub fn builder() -> RowLayoutBuilder {
        RowLayoutBuilder::default()
    }

    /// Parse a layout from its JSON form, e.g.
    /// `{"rows":[{"index":0,"field":"name"},{"index":3,"action":"full_row"}]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing row layout JSON")
    }

    pub fn action_for(&self, index: RowIndex) -> RowAction {
        self.slots
            .get(&index)
            .map(|s| s.action)
            .unwrap_or(RowAction::Skip)
    }

    pub fn index_of(&self, field: HeaderField) -> Option<RowIndex> {
        self.slots
            .iter()
            .find(|(_, s)| s.field == Some(field))
            .map(|(i, _)| *i)
    }

    pub fn field_at(&self, index: RowIndex) -> Option<HeaderField> {
        self.slots.get(&index).and_then(|s| s.field)
    }

    /// Highest index with a non-skip action; nothing past it is emitted.
    pub fn last_index(&self) -> Option<RowIndex> {
        self.slots
            .iter()
            .rev()
            .find(|(_, s)| s.action != RowAction::Skip)
            .map(|(i, _)| *i)
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::lds()
    }
}

/// Incrementally assembles a [`RowLayout`], rejecting overlapping rows.
#[derive(Debug, Default)]
pub struct RowLayoutBuilder {
    slots: BTreeMap<RowIndex, Slot>,
    error: Option<LayoutError>,
}

impl RowLayoutBuilder {
    /// Map `index` to a named header field with the field's default action.
    pub fn field(self, index: RowIndex, field: HeaderField) -> Self {
        self.insert(index, field.default_action(), Some(field))
    }

    /// Map `index` to an anonymous action.
    pub fn action(self, index: RowIndex, action: RowAction) -> Self {
        self.insert(index, action, None)
    }

    fn insert(mut self, index: RowIndex, action: RowAction, field: Option<HeaderField>) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Some(f) = field {
            if self.slots.values().any(|s| s.field == Some(f)) {
                self.error = Some(LayoutError::DuplicateField { field: f });
                return self;
            }
        }
        if self.slots.insert(index, Slot { action, field }).is_some() {
            self.error = Some(LayoutError::DuplicateIndex { index });
        }
        self
    }

    pub fn build(self) -> Result<RowLayout, LayoutError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(RowLayout { slots: self.slots }),
        }
    }
}

// ─── serde representation ────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct LayoutSpec {
    rows: Vec<RowSpec>,
}

#[derive(Serialize, Deserialize)]
struct RowSpec {
    index: RowIndex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<HeaderField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<RowAction>,
}

impl TryFrom<LayoutSpec> for RowLayout {
    type Error = LayoutError;

    fn try_from(spec: LayoutSpec) -> Result<Self, Self::Error> {
        let mut builder = RowLayout::builder();
        for row in spec.rows {
            let action = row
                .action
                .or_else(|| row.field.map(|f| f.default_action()))
                .unwrap_or(RowAction::Skip);
            builder = builder.insert(row.index, action, row.field);
        }
        builder.build()
    }
}

impl From<RowLayout> for LayoutSpec {
    fn from(layout: RowLayout) -> Self {
        LayoutSpec {
            rows: layout
                .slots
                .into_iter()
                .map(|(index, s)| RowSpec {
                    index,
                    field: s.field,
                    action: Some(s.action),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lds_layout_matches_station_files() {
        let layout = RowLayout::lds();
        for i in 0..=3 {
            assert_eq!(layout.action_for(i), RowAction::FirstField);
        }
        assert_eq!(layout.action_for(4), RowAction::Skip);
        assert_eq!(layout.action_for(5), RowAction::FullRow);
        assert_eq!(layout.action_for(6), RowAction::Skip);
        assert_eq!(layout.action_for(10_000), RowAction::Skip);

        assert_eq!(layout.index_of(HeaderField::Latitude), Some(3));
        assert_eq!(layout.field_at(1), Some(HeaderField::GridReference));
        assert_eq!(layout.field_at(4), None);
        assert_eq!(layout.last_index(), Some(5));
    }

    #[test]
    fn builder_rejects_overlapping_rows() {
        let err = RowLayout::builder()
            .field(0, HeaderField::Name)
            .action(0, RowAction::FullRow)
            .build()
            .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateIndex { index: 0 });

        let err = RowLayout::builder()
            .field(0, HeaderField::Name)
            .field(2, HeaderField::Name)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::DuplicateField {
                field: HeaderField::Name
            }
        );
    }

    #[test]
    fn layout_from_json() -> Result<()> {
        let layout = RowLayout::from_json_str(
            r#"{"rows":[
                {"index":0,"field":"name"},
                {"index":2,"field":"column_names"},
                {"index":7,"action":"full_row"}
            ]}"#,
        )?;
        assert_eq!(layout.action_for(0), RowAction::FirstField);
        assert_eq!(layout.action_for(1), RowAction::Skip);
        assert_eq!(layout.action_for(2), RowAction::FullRow);
        assert_eq!(layout.action_for(7), RowAction::FullRow);
        assert_eq!(layout.last_index(), Some(7));

        let back: RowLayout = serde_json::from_str(&serde_json::to_string(&layout)?)?;
        assert_eq!(back, layout);
        Ok(())
    }

    #[test]
    fn json_with_duplicate_rows_is_rejected() {
        let res = RowLayout::from_json_str(
            r#"{"rows":[{"index":1,"field":"name"},{"index":1,"field":"altitude"}]}"#,
        );
        assert!(res.is_err());
    }
}
