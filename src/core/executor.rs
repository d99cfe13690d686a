//! Rename executor: walk the rows in order and move each source to its
//! destination according to the policy.
//!
//! ## Per-row decision tree
//!
//! 1. Pull source/target names out of the row (short row: fatal in strict mode)
//! 2. Build source and destination paths, nesting under `<target stem>/` if asked
//! 3. Missing source -> failed
//! 4. Source is not a regular file and directories are off -> failed
//! 5. Destination exists and overwrite is off -> skipped
//! 6. Create the nesting directory (existing is fine) -> failed on error
//! 7. Move, replacing any existing destination -> succeeded or failed
//!
//! Rows are processed strictly in input order. Two rows nesting into the
//! same directory rely on that order.
//!
//! Failed and skipped rows are recorded, not printed; the caller reports
//! them through `RowOutcome::notice`.

use csv::StringRecord;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::local_files::FileSystem;
use crate::output::RunReport;
use crate::policy::Policy;
use crate::rows::{self, RenameEntry};
use crate::utils::path::{display, join_under, strip_extension};

/// Source and destination computed for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPaths {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Directory to create before moving, when nesting.
    pub nest_dir: Option<PathBuf>,
}

/// Compute where an entry's source lives and where it should end up.
pub fn plan_paths(entry: &RenameEntry, policy: &Policy) -> PlannedPaths {
    let nested_base = policy
        .nest_into_target_dir
        .then(|| strip_extension(&entry.target_name));

    let source = join_under(&policy.input_dir, None, &entry.source_name);
    let destination = join_under(&policy.output_dir, nested_base.as_deref(), &entry.target_name);
    let nest_dir = nested_base.map(|base| policy.output_dir.join(base));

    PlannedPaths {
        source,
        destination,
        nest_dir,
    }
}

/// Run every row through the decision tree and return the tally.
///
/// Fails only for an invalid policy, or for a short/undecodable row when
/// `policy.strict_rows` is set. Everything else is recorded per row.
pub fn execute<I, F>(records: I, policy: &Policy, fs: &F) -> Result<RunReport>
where
    I: IntoIterator<Item = csv::Result<StringRecord>>,
    F: FileSystem + ?Sized,
{
    policy.validate()?;

    let mut report = RunReport::new(policy.dry_run);

    for (index, record) in records.into_iter().enumerate() {
        let row = index as u64 + 1;

        let entry = record
            .map_err(|e| rows::decode_error(e, row, policy))
            .and_then(|record| rows::extract(&record, row, policy));

        match entry {
            Ok(entry) => process_entry(&entry, policy, fs, &mut report),
            Err(err) if policy.strict_rows => return Err(err),
            Err(err) => report.record_failed(row, None, None, &err),
        }
    }

    log_status!("rename", "Finished.");
    Ok(report)
}

fn process_entry<F>(entry: &RenameEntry, policy: &Policy, fs: &F, report: &mut RunReport)
where
    F: FileSystem + ?Sized,
{
    log_status!(
        "rename",
        "Renaming \"{}\" => \"{}\"",
        entry.source_name,
        entry.target_name
    );

    let planned = plan_paths(entry, policy);
    let source = display(&planned.source);
    let destination = display(&planned.destination);

    if !fs.exists(&planned.source) {
        let err = Error::rename_source_missing(source.clone());
        record_failure(report, entry.row, &source, &destination, err);
        return;
    }

    if !policy.include_directories && !fs.is_file(&planned.source) {
        let err = Error::rename_source_not_file(source.clone());
        record_failure(report, entry.row, &source, &destination, err);
        return;
    }

    let overwriting = fs.exists(&planned.destination);
    if overwriting {
        let err = Error::rename_destination_exists(destination.clone());
        if !policy.overwrite_existing {
            report.record_skipped(entry.row, source, destination, &err);
            return;
        }
        log_status!("rename", "{}. Overwriting.", err);
    }

    if policy.dry_run {
        report.record_planned(entry.row, source, destination);
        return;
    }

    if let Some(dir) = &planned.nest_dir {
        if let Err(err) = fs.create_dir(dir) {
            record_failure(report, entry.row, &source, &destination, err);
            return;
        }
    }

    match fs.move_path(&planned.source, &planned.destination) {
        Ok(method) => report.record_moved(entry.row, source, destination, overwriting, method),
        Err(err) => record_failure(report, entry.row, &source, &destination, err),
    }
}

fn record_failure(report: &mut RunReport, row: u64, source: &str, destination: &str, err: Error) {
    report.record_failed(
        row,
        Some(source.to_string()),
        Some(destination.to_string()),
        &err,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_files::{local, LocalFs, MoveMethod};
    use crate::output::RowStatus;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn policy_in(dir: &Path) -> Policy {
        Policy {
            input_dir: dir.to_path_buf(),
            output_dir: dir.to_path_buf(),
            ..Policy::default()
        }
    }

    fn rows(records: &[&[&str]]) -> Vec<csv::Result<StringRecord>> {
        records
            .iter()
            .map(|fields| Ok(StringRecord::from(fields.to_vec())))
            .collect()
    }

    fn entry(source: &str, target: &str) -> RenameEntry {
        RenameEntry {
            row: 1,
            source_name: source.to_string(),
            target_name: target.to_string(),
        }
    }

    /// Local filesystem whose directory creation always fails.
    struct NoMkdirFs(LocalFs);

    impl FileSystem for NoMkdirFs {
        fn exists(&self, path: &Path) -> bool {
            self.0.exists(path)
        }
        fn is_file(&self, path: &Path) -> bool {
            self.0.is_file(path)
        }
        fn create_dir(&self, dir: &Path) -> Result<()> {
            Err(Error::rename_directory_create_failed(
                display(dir),
                "Permission denied (os error 13)",
            ))
        }
        fn move_path(&self, from: &Path, to: &Path) -> Result<MoveMethod> {
            self.0.move_path(from, to)
        }
    }

    /// Local filesystem that reports every move as a cross-device copy.
    struct CopyingFs(LocalFs);

    impl FileSystem for CopyingFs {
        fn exists(&self, path: &Path) -> bool {
            self.0.exists(path)
        }
        fn is_file(&self, path: &Path) -> bool {
            self.0.is_file(path)
        }
        fn create_dir(&self, dir: &Path) -> Result<()> {
            self.0.create_dir(dir)
        }
        fn move_path(&self, from: &Path, to: &Path) -> Result<MoveMethod> {
            self.0.move_path(from, to)?;
            Ok(MoveMethod::CopiedAcrossDevices)
        }
    }

    #[test]
    fn plan_paths_without_nesting() {
        let policy = Policy::with_dirs(Some("in"), Some("out"));
        let planned = plan_paths(&entry("a.txt", "b.txt"), &policy);
        assert_eq!(planned.source, PathBuf::from("in/a.txt"));
        assert_eq!(planned.destination, PathBuf::from("out/b.txt"));
        assert!(planned.nest_dir.is_none());
    }

    #[test]
    fn plan_paths_with_nesting_uses_target_stem() {
        let policy = Policy {
            nest_into_target_dir: true,
            ..Policy::with_dirs(Some("in"), Some("out"))
        };
        let planned = plan_paths(&entry("a.txt", "report.pdf"), &policy);
        assert_eq!(planned.destination, PathBuf::from("out/report/report.pdf"));
        assert_eq!(planned.nest_dir, Some(PathBuf::from("out/report")));
    }

    #[test]
    fn moves_file_and_counts_success() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();

        let report =
            execute(rows(&[&["a.txt", "b.txt"]]), &policy_in(dir.path()), &local()).unwrap();

        assert_eq!(report.summary.succeeded, 1);
        assert_eq!(report.summary.failed, 0);
        assert!(!dir.path().join("a.txt").exists());
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "alpha");
        assert_eq!(report.rows[0].status, RowStatus::Renamed);
    }

    #[test]
    fn equal_indices_abort_before_any_row() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        let policy = Policy {
            target_index: 0,
            ..policy_in(dir.path())
        };

        let err = execute(rows(&[&["a.txt", "b.txt"]]), &policy, &local()).unwrap_err();

        assert_eq!(err.code.as_str(), "config.index_collision");
        assert!(dir.path().join("a.txt").exists());
    }

    #[test]
    fn short_row_aborts_run_in_strict_mode() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("c.txt"), "c").unwrap();

        let input = rows(&[&["a.txt", "b.txt"], &["short"], &["c.txt", "d.txt"]]);
        let err = execute(input, &policy_in(dir.path()), &local()).unwrap_err();

        assert_eq!(err.code.as_str(), "input.malformed_row");
        assert_eq!(err.details["row"], 2);
        assert!(dir.path().join("b.txt").exists());
        assert!(dir.path().join("c.txt").exists());
        assert!(!dir.path().join("d.txt").exists());
    }

    #[test]
    fn short_row_is_counted_failure_in_lenient_mode() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("c.txt"), "c").unwrap();
        let policy = Policy {
            strict_rows: false,
            ..policy_in(dir.path())
        };

        let input = rows(&[&["short"], &["c.txt", "d.txt"]]);
        let report = execute(input, &policy, &local()).unwrap();

        assert_eq!(report.summary.rows_processed, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.succeeded, 1);
        assert!(dir.path().join("d.txt").exists());
        let error = report.rows[0].error.as_ref().unwrap();
        assert_eq!(error.code, "input.malformed_row");
    }

    #[test]
    fn existing_destination_is_skipped_without_overwrite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "new").unwrap();
        fs::write(dir.path().join("b.txt"), "old").unwrap();

        let report =
            execute(rows(&[&["a.txt", "b.txt"]]), &policy_in(dir.path()), &local()).unwrap();

        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.summary.failed, 0);
        assert_eq!(report.summary.succeeded, 0);
        assert!(report.summary.is_balanced());
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "new");
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "old");
    }

    #[test]
    fn existing_destination_is_replaced_with_overwrite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "new").unwrap();
        fs::write(dir.path().join("b.txt"), "old").unwrap();
        let policy = Policy {
            overwrite_existing: true,
            ..policy_in(dir.path())
        };

        let report = execute(rows(&[&["a.txt", "b.txt"]]), &policy, &local()).unwrap();

        assert_eq!(report.summary.succeeded, 1);
        assert_eq!(report.rows[0].status, RowStatus::Overwritten);
        assert!(!dir.path().join("a.txt").exists());
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "new");
    }

    #[test]
    fn directory_source_requires_dirs_flag() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("photos")).unwrap();

        let report =
            execute(rows(&[&["photos", "pictures"]]), &policy_in(dir.path()), &local()).unwrap();
        assert_eq!(report.summary.failed, 1);
        assert_eq!(
            report.rows[0].error.as_ref().unwrap().code,
            "rename.source_not_file"
        );
        assert!(dir.path().join("photos").is_dir());

        let policy = Policy {
            include_directories: true,
            ..policy_in(dir.path())
        };
        let report = execute(rows(&[&["photos", "pictures"]]), &policy, &local()).unwrap();
        assert_eq!(report.summary.succeeded, 1);
        assert!(dir.path().join("pictures").is_dir());
    }

    #[test]
    fn two_rows_nesting_into_same_directory_both_succeed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        let policy = Policy {
            nest_into_target_dir: true,
            ..policy_in(dir.path())
        };

        let input = rows(&[&["a.txt", "report.pdf"], &["b.txt", "report.txt"]]);
        let report = execute(input, &policy, &local()).unwrap();

        assert_eq!(report.summary.succeeded, 2);
        assert!(dir.path().join("report/report.pdf").is_file());
        assert!(dir.path().join("report/report.txt").is_file());
    }

    #[test]
    fn directory_create_failure_is_counted_and_move_not_attempted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let policy = Policy {
            nest_into_target_dir: true,
            ..policy_in(dir.path())
        };

        let report =
            execute(rows(&[&["a.txt", "report.pdf"]]), &policy, &NoMkdirFs(local())).unwrap();

        assert_eq!(report.summary.failed, 1);
        assert!(report.summary.is_balanced());
        assert!(dir.path().join("a.txt").exists());
        assert_eq!(
            report.rows[0].error.as_ref().unwrap().code,
            "rename.directory_create_failed"
        );
    }

    #[test]
    fn move_failure_is_counted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        // Destination parent does not exist and nesting is off.
        let report = execute(
            rows(&[&["a.txt", "missing-dir/b.txt"]]),
            &policy_in(dir.path()),
            &local(),
        )
        .unwrap();

        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.rows[0].error.as_ref().unwrap().code, "rename.move_failed");
        assert!(dir.path().join("a.txt").exists());
    }

    #[test]
    fn cross_device_moves_are_flagged() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let report = execute(
            rows(&[&["a.txt", "b.txt"]]),
            &policy_in(dir.path()),
            &CopyingFs(local()),
        )
        .unwrap();

        assert_eq!(report.summary.succeeded, 1);
        assert!(report.rows[0].cross_device);
    }

    #[test]
    fn dry_run_leaves_filesystem_untouched() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let policy = Policy {
            dry_run: true,
            nest_into_target_dir: true,
            ..policy_in(dir.path())
        };

        let input = rows(&[&["a.txt", "report.pdf"], &["missing.txt", "c.txt"]]);
        let report = execute(input, &policy, &local()).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.summary.succeeded, 1);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.rows[0].status, RowStatus::Planned);
        assert!(dir.path().join("a.txt").exists());
        assert!(!dir.path().join("report").exists());
    }

    #[test]
    fn decode_error_follows_row_policy() {
        let dir = tempdir().unwrap();
        let input = b"a.txt,b.txt\n\xff\xfe,c.txt\n";
        let policy = policy_in(dir.path());

        let records = rows::from_reader(&input[..], &Default::default()).into_records();
        let err = execute(records, &policy, &local()).unwrap_err();
        assert_eq!(err.code.as_str(), "input.malformed_row");

        let lenient = Policy {
            strict_rows: false,
            ..policy
        };
        let records = rows::from_reader(&input[..], &Default::default()).into_records();
        let report = execute(records, &lenient, &local()).unwrap();
        assert_eq!(report.summary.rows_processed, 2);
        assert_eq!(report.summary.failed, 2);
    }
}
