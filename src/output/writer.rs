// src/output/writer.rs
//! Executes output operations by performing actual I/O.
//!
//! This module is the only place where site files are written or removed.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Delivers the output plan, attempting every operation and recording each
/// outcome in the report.
pub fn deliver(plan: OutputPlan) -> OutputReport {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::info!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    for operation in plan.operations {
        let op_start = Instant::now();
        match execute_operation(&operation) {
            Ok(bytes_written) => {
                let duration_ms = op_start.elapsed().as_millis() as u64;
                report = report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                    duration_ms,
                });
            }
            Err(e) => {
                log::error!("Operation failed: {}", e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;

    log::info!(
        "Output plan execution complete: {} succeeded, {} failed in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.total_duration_ms
    );

    report
}

/// Turns a report with failures into `AppError::DeliveryFailed`.
pub fn ensure_delivered(report: &OutputReport) -> Result<(), AppError> {
    if report.is_success() {
        return Ok(());
    }
    Err(AppError::DeliveryFailed {
        failures: report.failed.iter().map(|f| f.error.clone()).collect(),
    })
}

fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::CreateDirectory { path } => {
            create_directory(path)?;
            Ok(0)
        }
        DeliveryTarget::RemoveFile { path } => {
            remove_file(path)?;
            Ok(0)
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, content)?;
    Ok(content.len())
}

fn create_directory(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        if path.is_dir() {
            log::debug!("Directory already exists: {}", path.display());
            return Ok(());
        }
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", path.display()),
        )));
    }

    fs::create_dir_all(path)?;
    log::debug!("Created directory: {}", path.display());
    Ok(())
}

/// Removes `path` and then any parent directories it leaves empty.
fn remove_file(path: &Path) -> Result<(), AppError> {
    match fs::remove_file(path) {
        Ok(()) => log::info!("Removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Already gone: {}", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let mut dir = path.parent();
    while let Some(current) = dir {
        // remove_dir refuses non-empty directories, which ends the walk
        if fs::remove_dir(current).is_err() {
            break;
        }
        dir = current.parent();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("blog/ai/list/index.html");
        let keep = dir.path().join("blog/keep.html");
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(&keep, "x").unwrap();

        let report = deliver(OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: page.clone(),
            content: "<p>hi</p>".to_string(),
        }));
        assert!(report.is_success());
        assert_eq!(report.stats.bytes_written, 9);
        assert_eq!(fs::read_to_string(&page).unwrap(), "<p>hi</p>");

        let report = deliver(
            OutputPlan::new().with_operation(DeliveryTarget::RemoveFile { path: page.clone() }),
        );
        assert!(report.is_success());
        assert!(!page.exists());
        assert!(!dir.path().join("blog/ai").exists());
        assert!(keep.exists());
    }

    #[test]
    fn test_removing_missing_file_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let report = deliver(OutputPlan::new().with_operation(DeliveryTarget::RemoveFile {
            path: dir.path().join("nope/index.html"),
        }));
        assert!(report.is_success());
    }

    #[test]
    fn test_failures_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "x").unwrap();

        let report = deliver(
            OutputPlan::new().with_operation(DeliveryTarget::CreateDirectory { path: file }),
        );
        assert_eq!(report.stats.operations_failed, 1);
        assert!(matches!(
            ensure_delivered(&report),
            Err(AppError::DeliveryFailed { failures }) if failures.len() == 1
        ));
    }
}
