//! Batch driver: every matching file under a directory, one after another.
//!
//! The loop here is the only place that decides what a failure means. Per
//! file and per picture results come back from [`pipeline::process_file`]
//! as values; this module logs them and moves on. Only a directory that
//! cannot be listed ends the run early.
//!
//! Files are processed strictly in sequence: a file's tag is written back
//! before the next file is opened.

use crate::config::ResizeConfig;
use crate::imaging::{ImageBackend, RustBackend};
use crate::logger::Logger;
use crate::pipeline::{self, FileError, FileSummary};
use crate::scan::{self, ScanError};
use std::path::{Path, PathBuf};

/// Outcome for one file of the batch.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<FileSummary, FileError>,
}

/// Outcome of a whole batch run, in processing order.
#[derive(Debug)]
pub struct BatchReport {
    pub root: PathBuf,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Files whose tag was written back.
    pub fn rewritten_count(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_ok()).count()
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.result.is_err())
    }

    pub fn pictures_resized(&self) -> usize {
        self.summaries().map(FileSummary::resized_count).sum()
    }

    pub fn pictures_failed(&self) -> usize {
        self.summaries().map(FileSummary::failed_count).sum()
    }

    fn summaries(&self) -> impl Iterator<Item = &FileSummary> {
        self.files.iter().filter_map(|f| f.result.as_ref().ok())
    }
}

/// Resize the covers of every matching file under `root`.
pub fn resize(
    root: &Path,
    config: &ResizeConfig,
    logger: &dyn Logger,
) -> Result<BatchReport, ScanError> {
    let backend = RustBackend::new();
    resize_with_backend(&backend, root, config, logger)
}

/// Resize using a specific backend (allows testing with mock).
pub fn resize_with_backend(
    backend: &impl ImageBackend,
    root: &Path,
    config: &ResizeConfig,
    logger: &dyn Logger,
) -> Result<BatchReport, ScanError> {
    logger.info(&format!(
        ">> Starting resize process for directory {}",
        root.display()
    ));
    logger.info(&format!(
        ">> New max size of album covers: {}x{} Pixels",
        config.width, config.height
    ));

    let files = scan::list_files(root, &config.filter, config.recursive)?;
    let total = files.len();
    logger.info(&format!(">> Found {total} files, which will be processed"));

    let reports = process_each(files, logger, |path| {
        pipeline::process_file(path, config, backend)
    });

    Ok(BatchReport {
        root: root.to_path_buf(),
        files: reports,
    })
}

/// Run `process` over `files` in order, logging progress and every failure.
/// A failed file never stops the loop.
fn process_each(
    files: Vec<PathBuf>,
    logger: &dyn Logger,
    mut process: impl FnMut(&Path) -> Result<FileSummary, FileError>,
) -> Vec<FileReport> {
    let total = files.len();
    let mut reports = Vec::with_capacity(total);
    for (i, path) in files.into_iter().enumerate() {
        logger.info(&format!("({}/{}) Processing file {}", i + 1, total, path.display()));
        let result = process(&path);
        log_result(logger, &path, &result);
        reports.push(FileReport { path, result });
    }
    reports
}

fn log_result(logger: &dyn Logger, path: &Path, result: &Result<FileSummary, FileError>) {
    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            logger.error(&format!("Could not process file {}: {e}", path.display()));
            return;
        }
    };

    if let Some(cover) = &summary.cover_override {
        logger.info(&format!(
            "    Replaced embedded pictures with {}",
            cover.display()
        ));
    }
    for picture in &summary.pictures {
        match &picture.result {
            Ok(dims) => logger.info(&format!(
                "    Picture {} ({:?}) resized to {dims}",
                picture.index + 1,
                picture.picture_type
            )),
            Err(e) => logger.error(&format!(
                "Could not resize picture {} ({:?}) in {}: {e}",
                picture.index + 1,
                picture.picture_type,
                path.display()
            )),
        }
    }
}
