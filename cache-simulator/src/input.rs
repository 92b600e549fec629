//! Trace input for cache simulation
//!
//! Traces are CSV files with a `timestamp,key,size` header. Rows starting
//! with `#` are comments. Requests are streamed one file after another, so
//! memory use does not grow with trace length.

use crate::models::Request;
use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while locating or reading traces.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed trace {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no trace files found in {0}")]
    NoTraces(PathBuf),
}

const TRACE_EXTENSIONS: [&str; 3] = ["csv", "log", "txt"];

/// Expands each input into trace files: files are taken as given,
/// directories contribute their trace files sorted by name.
pub fn collect_traces(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, TraceError> {
    let mut traces = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = traces_in_dir(input)?;
            if found.is_empty() {
                return Err(TraceError::NoTraces(input.clone()));
            }
            traces.extend(found);
        } else {
            traces.push(input.clone());
        }
    }
    Ok(traces)
}

fn traces_in_dir(dir: &Path) -> Result<Vec<PathBuf>, TraceError> {
    let io_err = |source| TraceError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_trace = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| TRACE_EXTENSIONS.contains(&ext));
        if path.is_file() && is_trace {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Streams requests from trace files in order.
pub struct RequestIterator {
    files: std::vec::IntoIter<PathBuf>,
    current: Option<(PathBuf, DeserializeRecordsIntoIter<File, Request>)>,
}

impl RequestIterator {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files: files.into_iter(),
            current: None,
        }
    }

    fn open(path: &Path) -> Result<DeserializeRecordsIntoIter<File, Request>, csv::Error> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .flexible(true)
            .from_path(path)?;
        Ok(reader.into_deserialize())
    }
}

impl Iterator for RequestIterator {
    type Item = Result<Request, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((path, records)) = &mut self.current {
                match records.next() {
                    Some(Ok(request)) => return Some(Ok(request)),
                    Some(Err(source)) => {
                        return Some(Err(TraceError::Csv {
                            path: path.clone(),
                            source,
                        }))
                    }
                    None => self.current = None,
                }
                continue;
            }

            let path = self.files.next()?;
            match Self::open(&path) {
                Ok(records) => self.current = Some((path, records)),
                Err(source) => return Some(Err(TraceError::Csv { path, source })),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_trace(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_streams_across_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_trace(dir.path(), "b.csv", "timestamp,key,size\n3,c,30\n");
        write_trace(
            dir.path(),
            "a.csv",
            "timestamp,key,size,ttl\n# warmup\n1, a ,10,0\n2,b,20,0\n",
        );
        write_trace(dir.path(), "notes.md", "ignored");

        let files = collect_traces(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 2);

        let requests: Vec<Request> = RequestIterator::new(files)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            requests,
            vec![
                Request::new(1, "a", 10),
                Request::new(2, "b", 20),
                Request::new(3, "c", 30),
            ]
        );
    }

    #[test]
    fn test_malformed_row_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_trace(dir.path(), "bad.csv", "timestamp,key,size\n1,a,big\n");

        let mut iter = RequestIterator::new(vec![path]);
        assert!(matches!(iter.next(), Some(Err(TraceError::Csv { .. }))));
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_traces(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, TraceError::NoTraces(_)));
    }
}
