// src/sink.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, info};

use crate::classify::{ClassifiedRow, Emission};
use crate::layout::RowIndex;

/// Destination for classifier output.
pub trait Sink {
    fn emit(&mut self, index: RowIndex, emission: &Emission) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Plain text: a value on its own line, a full row as one CSV line.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn emit(&mut self, index: RowIndex, emission: &Emission) -> Result<()> {
        match emission {
            Emission::Value(v) => writeln!(self.out, "{}", v)
                .with_context(|| format!("writing value of row {}", index))?,
            Emission::Row(fields) => {
                let mut wtr = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(&mut self.out);
                wtr.write_record(fields)
                    .with_context(|| format!("writing row {}", index))?;
                wtr.flush()?;
            }
            Emission::Skipped => {}
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().context("flushing output")
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    index: RowIndex,
    #[serde(flatten)]
    emission: &'a Emission,
}

/// One JSON object per non-skipped row, e.g. `{"index":0,"value":"Heathrow"}`.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn emit(&mut self, index: RowIndex, emission: &Emission) -> Result<()> {
        if emission.is_skipped() {
            return Ok(());
        }
        serde_json::to_writer(&mut self.out, &JsonLine { index, emission })
            .with_context(|| format!("serialising row {}", index))?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().context("flushing output")
    }
}

/// Keeps every non-skipped emission in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub emitted: Vec<(RowIndex, Emission)>,
}

impl Sink for MemorySink {
    fn emit(&mut self, index: RowIndex, emission: &Emission) -> Result<()> {
        if !emission.is_skipped() {
            self.emitted.push((index, emission.clone()));
        }
        Ok(())
    }
}

/// Push every classified row into `sink`, stopping at the first error.
/// `finish` runs either way. Returns how many rows produced output.
pub fn drain<I, S>(rows: I, sink: &mut S) -> Result<usize>
where
    I: IntoIterator<Item = Result<ClassifiedRow>>,
    S: Sink + ?Sized,
{
    let mut emitted = 0;
    let mut seen = 0;
    let pushed = rows.into_iter().try_for_each(|row| -> Result<()> {
        let row = row?;
        seen += 1;
        if !row.emission.is_skipped() {
            sink.emit(row.index, &row.emission)?;
            emitted += 1;
        }
        Ok(())
    });
    let finished = sink.finish();
    pushed?;
    finished?;
    debug!(rows = seen, "drained");
    info!(emitted, "emissions written");
    Ok(emitted)
}
