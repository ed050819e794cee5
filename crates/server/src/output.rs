//! Output file handling.
//!
//! Filled documents are written to a temporary file beside the target and
//! renamed into place, so a reader never observes a half-written file and
//! a failed fill leaves the previous output untouched.
//!
//! The renamed file carries the target's existing permissions, or the mode a
//! plain `File::create` would give it when there is no target yet.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use form::FillReport;
use tempfile::{Builder, NamedTempFile};
use uuid::Uuid;

use crate::config::{OutputMode, ServerConfig};

/// Choose the output path for one request.
pub fn output_path(config: &ServerConfig) -> PathBuf {
    match config.output_mode {
        OutputMode::Fixed => config.output_path.clone(),
        OutputMode::PerRequest => config
            .output_dir
            .join(format!("filled_form-{}.pdf", Uuid::new_v4())),
    }
}

/// Write `path` through a temporary sibling file, renaming it into place
/// only when `write` succeeds.
pub fn write_atomically<T, F>(path: &Path, write: F) -> form::Result<T>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> form::Result<T>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut tmp = temp_file_in(dir)?;
    let mut writer = BufWriter::new(tmp.as_file_mut());
    let value = write(&mut writer)?;
    writer.flush()?;
    drop(writer);

    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(value)
}

/// Temp file created with the umask-filtered 0o666 mode of a new file,
/// instead of tempfile's owner-only default.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Builder::new()
        .prefix(".filled_form")
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    Builder::new().prefix(".filled_form").tempfile_in(dir)
}

/// Fill `template` with the JSON field payload and write the result to `output`.
pub fn fill_to_path(template: &Path, payload: &[u8], output: &Path) -> form::Result<FillReport> {
    let template = BufReader::new(File::open(template)?);
    write_atomically(output, |writer| form::fill_form(template, payload, writer))
}
