//! Replay of recorded sensor streams.
//!
//! Recordings are CSV files with a header row. Required columns are
//! `kind,x,y,z`; an optional `timestamp_ms` column is carried through to the
//! readouts. Accelerometer and gyroscope rows may interleave in any order,
//! exactly as the platform delivered them.
//!
//! ```text
//! timestamp_ms,kind,x,y,z
//! 0,accel,0.0,0.0,9.8
//! 5,gyro,0.01,0.00,-0.02
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{SensorKind, SensorSample};

#[derive(Debug, Deserialize)]
struct SampleRecord {
    #[serde(default)]
    timestamp_ms: Option<u64>,
    kind: String,
    x: f32,
    y: f32,
    z: f32,
}

impl SampleRecord {
    fn into_sample(self) -> Result<SensorSample> {
        let kind: SensorKind = self.kind.parse()?;
        Ok(SensorSample {
            kind,
            values: [self.x, self.y, self.z],
            timestamp_ms: self.timestamp_ms,
        })
    }
}

/// Iterator over the samples of a recording.
///
/// Tracks the file line of the last record it produced, so callers can point
/// at the offending row even when comment lines were skipped.
pub struct SampleReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Option<csv::StringRecord>,
    record: csv::StringRecord,
    line: u64,
    done: bool,
}

impl<R: Read> SampleReader<R> {
    /// Wrap any reader producing CSV text.
    pub fn from_reader(reader: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);
        Self {
            reader,
            headers: None,
            record: csv::StringRecord::new(),
            line: 0,
            done: false,
        }
    }

    /// 1-based file line of the most recently read record, 0 before the first.
    pub fn line(&self) -> u64 {
        self.line
    }
}

impl SampleReader<std::fs::File> {
    /// Open a recording on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Replaying samples from {}", path.display());
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> Iterator for SampleReader<R> {
    type Item = Result<SensorSample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.headers.is_none() {
            match self.reader.headers() {
                Ok(headers) => self.headers = Some(headers.clone()),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }

        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                if let Some(position) = self.record.position() {
                    self.line = position.line();
                }
                let sample = self
                    .record
                    .deserialize::<SampleRecord>(self.headers.as_ref())
                    .map_err(Error::from)
                    .and_then(SampleRecord::into_sample);
                Some(sample)
            }
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                if let Some(position) = e.position() {
                    self.line = position.line();
                }
                // An I/O failure will not clear up on retry.
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    self.done = true;
                }
                Some(Err(e.into()))
            }
        }
    }
}

/// Read a whole recording into memory.
pub fn read_samples(path: impl AsRef<Path>) -> Result<Vec<SensorSample>> {
    SampleReader::open(path)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_interleaved_stream() {
        let data = "\
timestamp_ms,kind,x,y,z
0,accel,0.0,0.0,9.8
5,gyro,0.1,-0.2,0.3
10, Accelerometer , 1.5, 0.0, 9.7
";
        let samples: Vec<SensorSample> = SampleReader::from_reader(data.as_bytes())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], SensorSample::accel(0.0, 0.0, 9.8).at(0));
        assert_eq!(samples[1], SensorSample::gyro(0.1, -0.2, 0.3).at(5));
        assert_eq!(samples[2].kind, SensorKind::Accelerometer);
        assert_eq!(samples[2].values, [1.5, 0.0, 9.7]);
    }

    #[test]
    fn test_timestamp_column_optional() {
        let data = "kind,x,y,z\ngyro,0,1,0\n";
        let samples: Vec<SensorSample> = SampleReader::from_reader(data.as_bytes())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(samples, vec![SensorSample::gyro(0.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_comments_skipped() {
        let data = "kind,x,y,z\n# settle\naccel,0,0,9.8\n";
        let count = SampleReader::from_reader(data.as_bytes()).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_bad_rows_reported() {
        let data = "kind,x,y,z\nmagnetometer,1,2,3\naccel,oops,0,0\naccel,0,0,9.8\n";
        let results: Vec<Result<SensorSample>> =
            SampleReader::from_reader(data.as_bytes()).collect();

        assert!(matches!(results[0], Err(Error::UnknownSensorKind(_))));
        assert!(matches!(results[1], Err(Error::Csv(_))));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_line_counts_comments_and_header() {
        let data = "kind,x,y,z\n# settle\n# still settling\nmagnetometer,1,2,3\naccel,0,0,9.8\n";
        let mut reader = SampleReader::from_reader(data.as_bytes());
        assert_eq!(reader.line(), 0);

        assert!(matches!(reader.next(), Some(Err(Error::UnknownSensorKind(_)))));
        assert_eq!(reader.line(), 4);

        assert!(matches!(reader.next(), Some(Ok(_))));
        assert_eq!(reader.line(), 5);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_ragged_row_does_not_end_stream() {
        let data = "kind,x,y,z\naccel,0,0\ngyro,0,1,0\n";
        let mut reader = SampleReader::from_reader(data.as_bytes());

        assert!(matches!(reader.next(), Some(Err(Error::Csv(_)))));
        assert_eq!(reader.line(), 2);
        assert_eq!(reader.next().unwrap().unwrap(), SensorSample::gyro(0.0, 1.0, 0.0));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_read_samples_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "kind,x,y,z").unwrap();
        writeln!(file, "accel,0,0,9.8").unwrap();
        writeln!(file, "gyro,0,0,0").unwrap();

        let samples = read_samples(file.path()).unwrap();
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_samples("/nonexistent/recording.csv"),
            Err(Error::Io { .. })
        ));
    }
}
