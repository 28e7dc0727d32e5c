use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use graphgen_compiler::GeneratedFiles;
use tracing::{debug, info, warn};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: usize,
    pub unchanged: usize,
}

/// `Types.h` is staged as `Types.h.tmp` next to it.
fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

fn stage(target: &Path, temp: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(temp, text)
}

fn discard<'p>(temps: impl IntoIterator<Item = &'p Path>) {
    for temp in temps {
        match fs::remove_file(temp) {
            Ok(()) => debug!(path = %temp.display(), "discarded"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(path = %temp.display(), %err, "cannot remove staged file"),
        }
    }
}

/// Writes every file under `root`, creating folders as needed. Files whose
/// contents already match are left untouched so build systems keep their
/// timestamps.
///
/// Changed files are staged next to their targets and renamed into place
/// only once every one of them was staged; a failed run leaves the previous
/// outputs as they were.
pub fn write_files(root: &Path, files: &GeneratedFiles) -> io::Result<WriteReport> {
    let mut report = WriteReport::default();
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();
    for (relative, text) in files {
        let target = root.join(relative);
        if fs::read_to_string(&target).is_ok_and(|current| current == *text) {
            debug!(path = %target.display(), "unchanged");
            report.unchanged += 1;
            continue;
        }
        let temp = staging_path(&target);
        if let Err(err) = stage(&target, &temp, text) {
            discard(staged.iter().map(|(t, _)| t.as_path()).chain([temp.as_path()]));
            return Err(err);
        }
        staged.push((temp, target));
    }

    for (i, (temp, target)) in staged.iter().enumerate() {
        if let Err(err) = fs::rename(temp, target) {
            warn!(path = %target.display(), written = i, "rename failed");
            discard(staged[i..].iter().map(|(t, _)| t.as_path()));
            return Err(err);
        }
        info!(path = %target.display(), "written");
        report.written += 1;
    }
    Ok(report)
}
