//! Extended M3U output.
//!
//! ```text
//! #EXTM3U
//! #EXTINF:-1 tvg-name="<name>",<name>
//! <stream-address>
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::app::{Result, StreamlistError};
use crate::domain::ChannelRecord;

pub const HEADER: &str = "#EXTM3U";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, channels: usize },
    /// Nothing to write; no file was created
    Skipped,
}

/// Render the playlist text for `records`, in order.
pub fn render(records: &[ChannelRecord]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for record in records {
        // a double quote would end the attribute early
        let attr_name = record.name().replace('"', "'");
        out.push_str(&format!(
            "#EXTINF:-1 tvg-name=\"{}\",{}\n",
            attr_name,
            record.name()
        ));
        out.push_str(record.stream_url());
        out.push('\n');
    }

    out
}

/// Write `records` to `path`, replacing any existing file.
///
/// The text goes to a temporary file in the same directory which is then
/// renamed over `path`, so readers never see a half-written playlist.
/// An existing file keeps its permissions; a new one gets the same mode a
/// plain create would. An empty `records` writes nothing.
pub fn write_playlist(records: &[ChannelRecord], path: &Path) -> Result<WriteOutcome> {
    if records.is_empty() {
        return Ok(WriteOutcome::Skipped);
    }

    let content = render(records);
    let write_err = |source: std::io::Error| StreamlistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // masked by the umask on open, like File::create
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(dir).map_err(write_err)?;
    if let Ok(existing) = fs::metadata(path) {
        file.as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?;
    }
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());

    Ok(WriteOutcome::Written {
        path: path.to_path_buf(),
        channels: records.len(),
    })
}
