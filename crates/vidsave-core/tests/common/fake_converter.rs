//! Stand-in for ffmpeg: a shell script that copies its input to its output.

use std::fs;
use std::path::{Path, PathBuf};

/// Writes an executable script to `dir` that accepts `-y -i <in> <out>`
/// and copies `<in>` to `<out>`. Returns the script path.
#[cfg(unix)]
pub fn copying(dir: &Path) -> PathBuf {
    write_script(dir, "fake-ffmpeg", "#!/bin/sh\n[ \"$1\" = \"-y\" ] && [ \"$2\" = \"-i\" ] || exit 2\ncp \"$3\" \"$4\"\n")
}

/// Writes a converter script that always fails with exit status 1.
#[cfg(unix)]
pub fn failing(dir: &Path) -> PathBuf {
    write_script(dir, "broken-ffmpeg", "#!/bin/sh\necho 'Invalid data found when processing input' >&2\nexit 1\n")
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, contents: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
