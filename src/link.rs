//! Symlink creation and listing without going through a shell.

use std::fs;
use std::io;
use std::os::unix::fs::{FileTypeExt, PermissionsExt};
use std::path::Path;

/// Point `link` at `target`, replacing whatever file or symlink is there.
///
/// Equivalent to `ln -fs target link`, except that an existing directory at
/// `link` is refused instead of receiving the link inside it.
pub fn force_symlink(target: &Path, link: &Path) -> io::Result<()> {
    match fs::symlink_metadata(link) {
        Ok(meta) if meta.is_dir() => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a directory", link.display()),
            ));
        }
        Ok(_) => fs::remove_file(link)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    std::os::unix::fs::symlink(target, link)
}

/// One-line `ls -l` style listing of `path`, e.g.
/// `lrwxrwxrwx /dev/gps -> /dev/ttyUSB1`.
pub fn describe(path: &Path) -> io::Result<String> {
    let meta = fs::symlink_metadata(path)?;
    let mode = mode_string(&meta);

    if meta.file_type().is_symlink() {
        let target = fs::read_link(path)?;
        Ok(format!(
            "{} {} -> {}",
            mode,
            path.display(),
            target.display()
        ))
    } else {
        Ok(format!("{} {}", mode, path.display()))
    }
}

fn mode_string(meta: &fs::Metadata) -> String {
    let file_type = meta.file_type();
    let kind = if file_type.is_symlink() {
        'l'
    } else if file_type.is_dir() {
        'd'
    } else if file_type.is_char_device() {
        'c'
    } else if file_type.is_block_device() {
        'b'
    } else if file_type.is_fifo() {
        'p'
    } else if file_type.is_socket() {
        's'
    } else {
        '-'
    };

    let mode = meta.permissions().mode();
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}
