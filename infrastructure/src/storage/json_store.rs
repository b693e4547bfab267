//! JSON files for every pipeline stage
//!
//! ```text
//! sheets.json                 {"<sheet>": [{<column>: <cell>}, ...], ...}
//! questions.json              [QuestionRecord]
//! responses/<model>.json      [ResponseRecord]
//! extracted/<model>.json      [GradedRecord]
//! report/summary.json         BenchSummary
//! report/<model>.json         [flattened graded row]
//! ```
//!
//! Files are pretty-printed UTF-8; non-ASCII text is written as is.

use indexmap::IndexMap;
use mcq_application::ports::record_store::{RecordStore, StoreError};
use mcq_domain::{
    BenchSummary, GradedRecord, Model, QuestionRecord, ResponseRecord, Sheet, SheetRow,
    report_row,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locations read and written by [`JsonFileStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct StorePaths {
    pub sheets: PathBuf,
    pub questions: PathBuf,
    pub responses_dir: PathBuf,
    pub extracted_dir: PathBuf,
    pub report_dir: PathBuf,
}

impl StorePaths {
    /// Conventional layout under one directory
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            sheets: root.join("sheets.json"),
            questions: root.join("questions.json"),
            responses_dir: root.join("responses"),
            extracted_dir: root.join("extracted"),
            report_dir: root.join("report"),
        }
    }
}

/// [`RecordStore`] over plain JSON files
pub struct JsonFileStore {
    paths: StorePaths,
}

impl JsonFileStore {
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    fn model_file(dir: &Path, model: &Model) -> PathBuf {
        dir.join(format!("{}.json", model.file_stem()))
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    if e.kind() == ErrorKind::NotFound {
        StoreError::NotFound(path.display().to_string())
    } else {
        StoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::Malformed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    writer.flush().map_err(|e| io_error(path, e))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

impl RecordStore for JsonFileStore {
    fn load_sheets(&self) -> Result<Vec<Sheet>, StoreError> {
        let workbook: IndexMap<String, Vec<SheetRow>> = read_json(&self.paths.sheets)?;
        Ok(workbook
            .into_iter()
            .map(|(name, rows)| Sheet::new(name, rows))
            .collect())
    }

    fn save_questions(&self, questions: &[QuestionRecord]) -> Result<(), StoreError> {
        write_json(&self.paths.questions, questions)
    }

    fn load_questions(&self) -> Result<Vec<QuestionRecord>, StoreError> {
        read_json(&self.paths.questions)
    }

    fn save_responses(&self, model: &Model, records: &[ResponseRecord]) -> Result<(), StoreError> {
        write_json(&Self::model_file(&self.paths.responses_dir, model), records)
    }

    fn load_responses(&self, model: &Model) -> Result<Vec<ResponseRecord>, StoreError> {
        read_json(&Self::model_file(&self.paths.responses_dir, model))
    }

    fn save_graded(&self, model: &Model, records: &[GradedRecord]) -> Result<(), StoreError> {
        write_json(&Self::model_file(&self.paths.extracted_dir, model), records)
    }

    fn load_graded(&self, model: &Model) -> Result<Vec<GradedRecord>, StoreError> {
        read_json(&Self::model_file(&self.paths.extracted_dir, model))
    }

    fn save_report(
        &self,
        summary: &BenchSummary,
        runs: &[(Model, Vec<GradedRecord>)],
    ) -> Result<(), StoreError> {
        let dir = &self.paths.report_dir;
        write_json(&dir.join("summary.json"), summary)?;
        for (model, records) in runs {
            let rows: Vec<_> = records.iter().map(report_row).collect();
            write_json(&Self::model_file(dir, model), &rows)?;
        }
        Ok(())
    }
}
