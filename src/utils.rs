use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `-`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if path.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        if let Err(e) = serde_json::to_writer_pretty(&mut writer, value) {
            if e.is_io() && e.io_error_kind() == Some(io::ErrorKind::BrokenPipe) {
                return Ok(());
            }
            return Err(e).context("serialize JSON");
        }
        return match finish(&mut writer) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            result => result.context("write stdout"),
        };
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).context("serialize JSON")?;
    finish(&mut writer).with_context(|| format!("write {}", path.display()))
}

/// Trailing newline, then flush.
fn finish<W: Write>(writer: &mut W) -> io::Result<()> {
    writer.write_all(b"\n")?;
    writer.flush()
}
