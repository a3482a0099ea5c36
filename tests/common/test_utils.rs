#![allow(dead_code)]
use std::fs;
use std::io::Result as IoResult;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Output of a failing `sui move build`: progress lines, a warning and an
/// error for the same file (warning first), an error for a second file, a
/// diagnostic without a pointer line and the failure trailer.
pub const MIXED_BUILD_LOG: &str = "\
INCLUDING DEPENDENCY Sui
INCLUDING DEPENDENCY MoveStdlib
BUILDING unxversal
warning[W09001]: unused alias
   ┌─ sources/pool.move:10:15
   │
10 │     use sui::coin::{Self, Coin};
   │                     ^^^^ Unused 'use' of alias 'Coin'.

error[E04007]: incompatible types
   ┌─ sources/oracle.move:88:9
   │
88 │         price
   │         ^^^^^ Invalid return expression

error[E01002]: unexpected token
   ┌─ sources/pool.move:20:5
   │
20 │     let x = ;
   │             ^ Unexpected ';'

error[E99999]: internal diagnostic without location

Failed to build Move modules: Compilation error.
";

/// A temporary workspace holding captured logs and fake build scripts.
/// When dropped, the directory and its contents are removed.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> IoResult<Self> {
        Ok(TestWorkspace { temp_dir: tempdir()? })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes a captured build log and returns its path.
    pub fn write_log(&self, name: &str, contents: &str) -> IoResult<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Writes an executable shell script that prints `stdout_text` to stdout,
    /// `stderr_text` to stderr, then exits with `exit_code`.
    #[cfg(unix)]
    pub fn write_fake_build(
        &self,
        name: &str,
        stdout_text: &str,
        stderr_text: &str,
        exit_code: i32,
    ) -> IoResult<PathBuf> {
        use std::os::unix::fs::PermissionsExt;
        let out = self.write_log(&format!("{}.stdout", name), stdout_text)?;
        let err = self.write_log(&format!("{}.stderr", name), stderr_text)?;
        let script = self.path().join(name);
        fs::write(
            &script,
            format!(
                "#!/bin/sh\ncat '{}'\ncat '{}' 1>&2\nexit {}\n",
                out.display(),
                err.display(),
                exit_code
            ),
        )?;
        let mut perms = fs::metadata(&script)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms)?;
        Ok(script)
    }
}
