//! Capability-scoped access to the handful of files the bot touches.

use std::io;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

/// A file addressed as a name inside an opened parent directory.
pub(crate) struct FileHandle<'path> {
    pub(crate) dir: Dir,
    pub(crate) file_name: &'path str,
}

/// Opens the parent directory of `path` and returns it with the file name.
///
/// A bare file name resolves against the current directory.
pub(crate) fn open_parent(path: &Utf8Path) -> io::Result<FileHandle<'_>> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{path}' does not name a file"),
        )
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok(FileHandle { dir, file_name })
}

/// Reads the whole file at `path` as UTF-8.
pub(crate) fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let handle = open_parent(path)?;
    handle.dir.read_to_string(handle.file_name)
}
