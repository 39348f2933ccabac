// src/classify/mod.rs
pub mod decode;

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    iter::FusedIterator,
    path::Path,
};
use thiserror::Error;
use tracing::{debug, trace};

use crate::layout::{RowAction, RowIndex, RowLayout};
pub use decode::{CsvLineDecoder, Row, RowDecoder, SplitDecoder};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// A first-field row with no fields at all.
    #[error("row {index} has no fields but its value is required")]
    MalformedRow { index: RowIndex },
    /// A [`RowDecoder`] could not split a line into fields. The bundled
    /// decoders accept any text; stricter decoders report through this.
    #[error("could not decode row: {reason}")]
    Decode { reason: String },
}

/// What a single row produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emission {
    Value(String),
    Row(Row),
    Skipped,
}

impl Emission {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Emission::Skipped)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedRow {
    pub index: RowIndex,
    pub emission: Emission,
}

/// Apply `action` to a decoded row.
pub fn apply_action(index: RowIndex, action: RowAction, row: Row) -> Result<Emission, ClassifyError> {
    match action {
        RowAction::FirstField => row
            .into_iter()
            .next()
            .map(Emission::Value)
            .ok_or(ClassifyError::MalformedRow { index }),
        RowAction::FullRow => Ok(Emission::Row(row)),
        RowAction::Skip => Ok(Emission::Skipped),
    }
}

/// Lazily classifies every row of a fixed-layout file.
///
/// Owns the underlying reader, so the file is closed when the classifier is
/// dropped, whether it ran to the end or not. After the first error the
/// iterator is exhausted.
pub struct RowClassifier<R, D = CsvLineDecoder> {
    lines: Lines<R>,
    layout: RowLayout,
    decoder: D,
    source: String,
    next_index: RowIndex,
    done: bool,
}

impl<R: BufRead> RowClassifier<R> {
    pub fn new(reader: R, layout: RowLayout, source: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            layout,
            decoder: CsvLineDecoder,
            source: source.into(),
            next_index: 0,
            done: false,
        }
    }
}

impl<R: BufRead, D: RowDecoder> RowClassifier<R, D> {
    /// Swap the line decoder, e.g. for [`SplitDecoder`].
    pub fn with_decoder<E: RowDecoder>(self, decoder: E) -> RowClassifier<R, E> {
        RowClassifier {
            lines: self.lines,
            layout: self.layout,
            decoder,
            source: self.source,
            next_index: self.next_index,
            done: self.done,
        }
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// Number of rows read so far.
    pub fn rows_read(&self) -> usize {
        self.next_index
    }
}

impl<R: BufRead, D: RowDecoder> Iterator for RowClassifier<R, D> {
    type Item = Result<ClassifiedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let index = self.next_index;
        let line = match self.lines.next() {
            None => {
                self.done = true;
                debug!(source = %self.source, rows = index, "end of input");
                return None;
            }
            Some(Err(e)) => {
                self.done = true;
                return Some(
                    Err(e).with_context(|| format!("reading row {} of {}", index, self.source)),
                );
            }
            Some(Ok(line)) => line,
        };
        self.next_index += 1;

        let action = self.layout.action_for(index);
        if action == RowAction::Skip {
            trace!(index, "skip");
            return Some(Ok(ClassifiedRow {
                index,
                emission: Emission::Skipped,
            }));
        }

        let line = if index == 0 {
            line.strip_prefix('\u{feff}').unwrap_or(line.as_str())
        } else {
            line.as_str()
        };
        let emission = self
            .decoder
            .decode(line)
            .and_then(|row| apply_action(index, action, row));

        match emission {
            Ok(emission) => {
                trace!(index, ?action, "emit");
                Some(Ok(ClassifiedRow { index, emission }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(anyhow::Error::new(e)
                    .context(format!("classifying row {} of {}", index, self.source))))
            }
        }
    }
}

impl<R: BufRead, D: RowDecoder> FusedIterator for RowClassifier<R, D> {}

/// Open `path` and return a lazy classifier over its rows.
///
/// The file is opened here, so a missing path fails before any row is read.
#[tracing::instrument(level = "info", skip(path, layout), fields(path = %path.as_ref().display()))]
pub fn classify_and_emit<P: AsRef<Path>>(
    path: P,
    layout: RowLayout,
) -> Result<RowClassifier<BufReader<File>>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open CSV file: {:?}", path))?;
    debug!("opened");
    Ok(RowClassifier::new(
        BufReader::new(file),
        layout,
        path.display().to_string(),
    ))
}

/// Classify rows from any buffered reader.
pub fn classify_rows<R: BufRead>(reader: R, layout: RowLayout) -> RowClassifier<R> {
    RowClassifier::new(reader, layout, "<reader>")
}
