use std::io;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;

use super::Sample;
use crate::error::Result;

impl<T: Serialize> Sample<T> {
    /// Write every observation as a CSV record, with a header row derived
    /// from the record's field names.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
        for record in &self.data {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the sample to a CSV file at `path`, replacing any existing file.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        sample: usize,
        estimate: f64,
    }

    #[test]
    fn writes_header_and_rows() {
        let sample = Sample::new(vec![
            Row { sample: 1, estimate: 3.5 },
            Row { sample: 2, estimate: 4.25 },
        ]);
        let mut buf = Vec::new();
        sample.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "sample,estimate\n1,3.5\n2,4.25\n");
    }
}
