//! Managed configuration files and their backups.
use std::path::PathBuf;

use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources, process_resources_remove};
use crate::resources::backup::{BackupRestoreResource, BackupStore};
use crate::resources::file::ManagedFileResource;

/// Absolute paths of the managed files.
fn managed_paths(ctx: &Context) -> Vec<PathBuf> {
    ctx.manifest()
        .files
        .iter()
        .map(|f| ctx.home.join(&f.path))
        .collect()
}

/// Build one resource per managed file.
pub(super) fn managed_files<'a>(ctx: &Context, store: &'a BackupStore) -> Vec<ManagedFileResource<'a>> {
    ctx.manifest()
        .files
        .iter()
        .map(|f| ManagedFileResource::new(ctx.home.join(&f.path), f.content.clone(), store))
        .collect()
}

/// Write static configuration files, backing up differing originals.
#[derive(Debug)]
pub struct WriteConfigFiles;

impl Task for WriteConfigFiles {
    fn name(&self) -> &'static str {
        "Write config files"
    }

    super::task_deps![super::oh_my_zsh::InstallOhMyZsh];

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest().files.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let store = ctx.backup_store();
        process_resources(
            ctx,
            managed_files(ctx, &store),
            &ProcessOpts::apply_all("write"),
        )
    }
}

/// Put backed-up originals back in place.
///
/// Always runs, so teardown reports "nothing to restore" even when no files
/// are declared.
#[derive(Debug)]
pub struct RestoreBackups;

impl Task for RestoreBackups {
    fn name(&self) -> &'static str {
        "Restore backups"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let store = ctx.backup_store();
        let paths = managed_paths(ctx);
        let records = store.records(paths.iter().map(PathBuf::as_path));
        if records.is_empty() {
            ctx.log.info("nothing to restore");
            return Ok(TaskResult::Ok);
        }
        ctx.log.debug(&format!(
            "{} backup(s) in {}",
            records.len(),
            store.dir().display()
        ));
        process_resources_remove(
            ctx,
            records
                .into_iter()
                .map(|original| BackupRestoreResource::new(original, &store)),
            "restore",
        )
    }
}

/// Delete managed files that were not restored from a backup.
///
/// Only files whose content is still exactly what setup wrote are removed.
#[derive(Debug)]
pub struct RemoveConfigFiles;

impl Task for RemoveConfigFiles {
    fn name(&self) -> &'static str {
        "Remove config files"
    }

    super::task_deps![RestoreBackups];

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest().files.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let store = ctx.backup_store();
        // A file with a pending record is restored instead (dry run).
        let files = managed_files(ctx, &store)
            .into_iter()
            .filter(|f| !store.has_record(&f.path));
        process_resources_remove(ctx, files, "remove")
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{ManagedFile, Manifest};
    use crate::resources::test_helpers::{MockDownloader, MockExecutor};
    use crate::tasks::test_helpers::{RecordingLog, config_from, make_mock_context};

    const ZSHRC: &str = "export ZSH=\"$HOME/.oh-my-zsh\"\n";
    const ZPROFILE: &str = "eval \"$(/opt/homebrew/bin/brew shellenv)\"\n";

    fn manifest() -> Manifest {
        let mut manifest = Manifest::default();
        manifest.files = vec![
            ManagedFile {
                path: ".zshrc".to_string(),
                content: ZSHRC.to_string(),
            },
            ManagedFile {
                path: ".zprofile".to_string(),
                content: ZPROFILE.to_string(),
            },
        ];
        manifest
    }

    fn context(home: &std::path::Path) -> (Context, Arc<RecordingLog>) {
        let executor = Arc::new(MockExecutor::empty());
        let downloader = Arc::new(MockDownloader::failing());
        let (mut ctx, log) = make_mock_context(config_from(manifest()), &executor, &downloader);
        ctx.home = home.to_path_buf();
        (ctx, log)
    }

    fn read(home: &std::path::Path, name: &str) -> Option<String> {
        std::fs::read_to_string(home.join(name)).ok()
    }

    #[test]
    fn setup_then_teardown_round_trip() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(".zshrc"), "# my zshrc\n").unwrap();
        let (ctx, _log) = context(home.path());

        WriteConfigFiles.run(&ctx).unwrap();
        assert_eq!(read(home.path(), ".zshrc").as_deref(), Some(ZSHRC));
        assert_eq!(read(home.path(), ".zprofile").as_deref(), Some(ZPROFILE));
        assert_eq!(
            read(home.path(), ".macsetup_backup/.zshrc").as_deref(),
            Some("# my zshrc\n")
        );

        RestoreBackups.run(&ctx).unwrap();
        RemoveConfigFiles.run(&ctx).unwrap();

        assert_eq!(read(home.path(), ".zshrc").as_deref(), Some("# my zshrc\n"));
        assert_eq!(read(home.path(), ".zprofile"), None);
        assert!(!home.path().join(".macsetup_backup").exists());
    }

    #[test]
    fn repeated_setup_keeps_first_backup() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(".zshrc"), "# original\n").unwrap();
        let (ctx, log) = context(home.path());

        WriteConfigFiles.run(&ctx).unwrap();
        WriteConfigFiles.run(&ctx).unwrap();

        assert!(log.contains("[info] 0 changed, 2 already ok"));
        assert_eq!(
            read(home.path(), ".macsetup_backup/.zshrc").as_deref(),
            Some("# original\n")
        );
    }

    #[test]
    fn restore_reports_nothing_to_restore() {
        let home = tempfile::tempdir().unwrap();
        let (ctx, log) = context(home.path());

        assert!(matches!(RestoreBackups.run(&ctx).unwrap(), TaskResult::Ok));
        assert!(log.contains("[info] nothing to restore"));
    }

    #[test]
    fn restore_runs_without_declared_files() {
        let home = tempfile::tempdir().unwrap();
        let executor = Arc::new(MockExecutor::empty());
        let downloader = Arc::new(MockDownloader::failing());
        let (mut ctx, log) =
            make_mock_context(config_from(Manifest::default()), &executor, &downloader);
        ctx.home = home.path().to_path_buf();

        assert!(RestoreBackups.should_run(&ctx));
        assert!(matches!(RestoreBackups.run(&ctx).unwrap(), TaskResult::Ok));
        assert!(log.contains("[info] nothing to restore"));
    }

    #[test]
    fn nested_files_with_one_name_restore_separately() {
        let home = tempfile::tempdir().unwrap();
        let executor = Arc::new(MockExecutor::empty());
        let downloader = Arc::new(MockDownloader::failing());
        let mut manifest = Manifest::default();
        manifest.files = ["a", "b"]
            .into_iter()
            .map(|dir| ManagedFile {
                path: format!(".config/{dir}/config"),
                content: format!("managed {dir}\n"),
            })
            .collect();
        let (mut ctx, _log) = make_mock_context(config_from(manifest), &executor, &downloader);
        ctx.home = home.path().to_path_buf();
        for dir in ["a", "b"] {
            let path = home.path().join(format!(".config/{dir}/config"));
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, format!("original {dir}\n")).unwrap();
        }

        WriteConfigFiles.run(&ctx).unwrap();
        RestoreBackups.run(&ctx).unwrap();
        RemoveConfigFiles.run(&ctx).unwrap();

        assert_eq!(read(home.path(), ".config/a/config").as_deref(), Some("original a\n"));
        assert_eq!(read(home.path(), ".config/b/config").as_deref(), Some("original b\n"));
    }

    #[test]
    fn edited_file_is_left_in_place() {
        let home = tempfile::tempdir().unwrap();
        let (ctx, _log) = context(home.path());
        WriteConfigFiles.run(&ctx).unwrap();
        std::fs::write(home.path().join(".zprofile"), "# edited\n").unwrap();

        RemoveConfigFiles.run(&ctx).unwrap();

        assert_eq!(read(home.path(), ".zprofile").as_deref(), Some("# edited\n"));
        assert_eq!(read(home.path(), ".zshrc"), None);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(".zshrc"), "# mine\n").unwrap();
        let (mut ctx, log) = context(home.path());
        ctx.dry_run = true;

        assert!(matches!(
            WriteConfigFiles.run(&ctx).unwrap(),
            TaskResult::DryRun
        ));

        assert_eq!(read(home.path(), ".zshrc").as_deref(), Some("# mine\n"));
        assert_eq!(read(home.path(), ".zprofile"), None);
        assert!(!home.path().join(".macsetup_backup").exists());
        assert!(log.contains("(currently content differs)"));
    }

    #[test]
    fn dry_run_teardown_prefers_restore_over_remove() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(".zshrc"), "# mine\n").unwrap();
        let (mut ctx, log) = context(home.path());
        WriteConfigFiles.run(&ctx).unwrap();
        ctx.dry_run = true;

        RestoreBackups.run(&ctx).unwrap();
        RemoveConfigFiles.run(&ctx).unwrap();

        let zshrc = home.path().join(".zshrc");
        assert!(log.contains(&format!("would restore: backup of {}", zshrc.display())));
        assert!(!log.contains(&format!("would remove: {}", zshrc.display())));
        assert_eq!(read(home.path(), ".zshrc").as_deref(), Some(ZSHRC));
    }
}
