use std::ffi::OsString;
use std::io::{self, PipeReader};
use std::process::{Child, Command, Stdio};

/// The build invoked when no command is given on the command line.
pub const DEFAULT_PROGRAM: &str = "sui";
pub const DEFAULT_ARGS: [&str; 2] = ["move", "build"];

/// A builder that constructs the external build command.
#[derive(Debug, Clone)]
pub struct BuildCommandBuilder {
    program: OsString,
    args: Vec<OsString>,
}

impl Default for BuildCommandBuilder {
    fn default() -> Self {
        BuildCommandBuilder::new(DEFAULT_PROGRAM).with_args(DEFAULT_ARGS)
    }
}

impl BuildCommandBuilder {
    /// Creates a builder for `program` with no arguments.
    pub fn new(program: impl Into<OsString>) -> Self {
        BuildCommandBuilder {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Uses the first element as the program and the rest as its arguments.
    /// An empty list yields the default `sui move build`.
    pub fn from_command_line<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut parts = command.into_iter().map(Into::into);
        match parts.next() {
            Some(program) => BuildCommandBuilder::new(program).with_args(parts),
            None => BuildCommandBuilder::default(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// The command as a single display string, e.g. `sui move build`.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Builds the command; `program` may be replaced by a resolved path.
    pub fn build_command(&self, program: impl Into<OsString>) -> Command {
        let mut cmd = Command::new(program.into());
        cmd.args(&self.args).stdin(Stdio::null());
        cmd
    }

    /// Spawns the command with stderr and stdout sharing one pipe, so the
    /// reader sees both streams in the order the build wrote them.
    pub fn spawn_merged(&self, program: impl Into<OsString>) -> io::Result<(Child, PipeReader)> {
        let (reader, writer) = io::pipe()?;
        // The command owns the write ends; it must be dropped before reading
        // or the reader never sees end-of-file.
        let child = {
            let mut cmd = self.build_command(program);
            cmd.stdout(writer.try_clone()?).stderr(writer);
            cmd.spawn()?
        };
        Ok((child, reader))
    }
}
