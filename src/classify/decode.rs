// src/classify/decode.rs

use csv::ReaderBuilder;

use super::ClassifyError;

/// One physical row: its fields in order.
pub type Row = Vec<String>;

/// Turns one physical line (without its terminator) into a [`Row`].
///
/// An empty line must decode to an empty row so blank separator rows still
/// occupy an index.
pub trait RowDecoder {
    fn decode(&self, line: &str) -> Result<Row, ClassifyError>;
}

/// Decodes a line with the `csv` crate: comma delimiter, double-quote
/// quoting, no header handling. Quoted fields spanning lines are not
/// supported.
#[derive(Clone, Copy, Debug, Default)]
pub struct CsvLineDecoder;

impl RowDecoder for CsvLineDecoder {
    fn decode(&self, line: &str) -> Result<Row, ClassifyError> {
        if line.is_empty() {
            return Ok(Vec::new());
        }
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());

        match rdr.records().next() {
            Some(record) => {
                let record = record.map_err(|e| ClassifyError::Decode {
                    reason: e.to_string(),
                })?;
                Ok(record.iter().map(|s| s.to_string()).collect())
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Plain `split(',')`; quotes are kept as literal characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplitDecoder;

impl RowDecoder for SplitDecoder {
    fn decode(&self, line: &str) -> Result<Row, ClassifyError> {
        if line.is_empty() {
            return Ok(Vec::new());
        }
        Ok(line.split(',').map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_is_an_empty_row() -> anyhow::Result<()> {
        assert!(CsvLineDecoder.decode("")?.is_empty());
        assert!(SplitDecoder.decode("")?.is_empty());
        Ok(())
    }

    #[test]
    fn csv_decoder_keeps_quoted_commas_together() -> anyhow::Result<()> {
        let row = CsvLineDecoder.decode(r#"Leuchars,"NO 468 209, Fife",10m"#)?;
        assert_eq!(row, vec!["Leuchars", "NO 468 209, Fife", "10m"]);

        let naive = SplitDecoder.decode(r#"Leuchars,"NO 468 209, Fife",10m"#)?;
        assert_eq!(naive.len(), 4);
        Ok(())
    }

    #[test]
    fn separator_rows_keep_their_empty_fields() -> anyhow::Result<()> {
        assert_eq!(CsvLineDecoder.decode(",,,")?, vec!["", "", "", ""]);
        assert_eq!(SplitDecoder.decode(",,,")?, vec!["", "", "", ""]);
        Ok(())
    }
}
