//! Sample data files.
//!
//! Content items name their data through the `hdf5-file` key. The
//! [`CsvLoader`] reads those paths as CSV:
//!
//! * sample files: the header names the variables, each row is one draw;
//! * uncertainty files: each header is a kinematic assignment such as
//!   `q2=1.5`, each row is one draw of the observable at every point.
//!
//! Lines starting with `#` are comments.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Posterior samples with named columns.
#[derive(Debug, Clone)]
pub struct DataFile {
    pub path: PathBuf,
    pub variable_indices: IndexMap<String, usize>,
    rows: Vec<Vec<f64>>,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>, variables: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        let variable_indices = variables
            .into_iter()
            .enumerate()
            .map(|(i, v)| (v, i))
            .collect();
        DataFile {
            path: path.into(),
            variable_indices,
            rows,
        }
    }

    /// All rows, one per sample.
    pub fn data(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// The samples of `variable`. Fails with a value error for names not in
    /// the file.
    pub fn column(&self, variable: &str) -> Result<Vec<f64>> {
        let index = *self.variable_indices.get(variable).ok_or_else(|| {
            Error::value(format!(
                "variable '{}' not contained in '{}'",
                variable,
                self.path.display()
            ))
        })?;
        Ok(self.rows.iter().map(|row| row[index]).collect())
    }
}

/// Draws of an observable at a list of kinematic points.
#[derive(Debug, Clone)]
pub struct UncertaintyDataFile {
    pub path: PathBuf,
    /// Column index and kinematic assignment string, e.g. `(0, "q2=1.5")`
    pub parameters: Vec<(usize, String)>,
    rows: Vec<Vec<f64>>,
}

impl UncertaintyDataFile {
    pub fn new(path: impl Into<PathBuf>, labels: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        UncertaintyDataFile {
            path: path.into(),
            parameters: labels.into_iter().enumerate().collect(),
            rows,
        }
    }

    pub fn data(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// All draws for column `index`.
    pub fn samples(&self, index: usize) -> Vec<f64> {
        self.rows.iter().filter_map(|row| row.get(index).copied()).collect()
    }
}

/// Source of sample data files.
pub trait DataLoader {
    fn load_data_file(&self, path: &Path) -> Result<DataFile>;

    fn load_uncertainty_file(&self, path: &Path) -> Result<UncertaintyDataFile>;
}

/// Reads data files from CSV.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvLoader;

impl CsvLoader {
    fn read(path: &Path) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_path(path)
            .map_err(|e| Error::data_file(path, e.to_string()))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::data_file(path, e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(Error::data_file(path, "missing header row"));
        }

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| Error::data_file(path, e.to_string()))?;
            let row = record
                .iter()
                .map(|field| {
                    field.parse::<f64>().map_err(|_| {
                        Error::data_file(
                            path,
                            format!("row {}: '{}' is not a number", line + 1, field),
                        )
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push(row);
        }

        Ok((headers, rows))
    }
}

impl DataLoader for CsvLoader {
    fn load_data_file(&self, path: &Path) -> Result<DataFile> {
        let (headers, rows) = Self::read(path)?;
        Ok(DataFile::new(path, headers, rows))
    }

    fn load_uncertainty_file(&self, path: &Path) -> Result<UncertaintyDataFile> {
        let (headers, rows) = Self::read(path)?;
        Ok(UncertaintyDataFile::new(path, headers, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_data_file() {
        let file = write_csv("# posterior samples\nx, y\n1.0, 2.0\n3.0, 4.0\n");
        let data = CsvLoader.load_data_file(file.path()).unwrap();
        assert_eq!(data.variable_indices.get("y"), Some(&1));
        assert_eq!(data.column("x").unwrap(), vec![1.0, 3.0]);
        assert_eq!(data.data().len(), 2);
        assert!(matches!(data.column("z"), Err(Error::Value(_))));
    }

    #[test]
    fn test_load_uncertainty_file() {
        let file = write_csv("q2=0.0,q2=1.0\n1,2\n3,4\n5,6\n");
        let data = CsvLoader.load_uncertainty_file(file.path()).unwrap();
        assert_eq!(data.parameters, vec![(0, "q2=0.0".to_string()), (1, "q2=1.0".to_string())]);
        assert_eq!(data.samples(1), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_malformed_rows() {
        let file = write_csv("x,y\n1,abc\n");
        assert!(matches!(
            CsvLoader.load_data_file(file.path()),
            Err(Error::DataFile { .. })
        ));

        let ragged = write_csv("x,y\n1,2\n3\n");
        assert!(matches!(
            CsvLoader.load_data_file(ragged.path()),
            Err(Error::DataFile { .. })
        ));

        assert!(matches!(
            CsvLoader.load_data_file(Path::new("/nonexistent/samples.csv")),
            Err(Error::DataFile { .. })
        ));
    }
}
