use crate::e_command_builder::BuildCommandBuilder;
use crate::prelude::*;
use std::fmt;
use std::io::Read;
use std::process::ExitStatus;
use which::which;

/// Exit code used when the build program cannot be found.
pub const EXIT_TOOL_NOT_FOUND: i32 = 127;
/// Exit code used when the build program exists but cannot be started.
pub const EXIT_LAUNCH_FAILED: i32 = 126;
/// Exit code used when output could not be collected.
pub const EXIT_IO: i32 = 2;

/// Combined stdout+stderr of one build, with its exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub text: String,
    pub exit_code: i32,
}

/// Failures that prevent the build from being attempted or read at all.
#[derive(Debug)]
pub enum RunError {
    ToolNotFound { program: String },
    LaunchFailed { program: String, source: io::Error },
    Io(io::Error),
}

impl RunError {
    /// The exit code this tool terminates with for the failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::ToolNotFound { .. } => EXIT_TOOL_NOT_FOUND,
            RunError::LaunchFailed { .. } => EXIT_LAUNCH_FAILED,
            RunError::Io(_) => EXIT_IO,
        }
    }

    /// A hint telling the user how to get past the failure, if there is one.
    pub fn guidance(&self) -> Option<String> {
        match self {
            RunError::ToolNotFound { program } if program == crate::e_command_builder::DEFAULT_PROGRAM => Some(
                "Please ensure the Sui CLI is installed and in your system's PATH.".to_string(),
            ),
            RunError::ToolNotFound { program } => {
                Some(format!("Please ensure '{}' is installed and in your system's PATH.", program))
            }
            RunError::LaunchFailed { program, .. } => {
                Some(format!("Check that '{}' is executable.", program))
            }
            RunError::Io(_) => None,
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::ToolNotFound { program } => write!(f, "'{}' command not found.", program),
            RunError::LaunchFailed { program, source } => {
                write!(f, "failed to start '{}': {}", program, source)
            }
            RunError::Io(e) => write!(f, "failed to collect build output: {}", e),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RunError::LaunchFailed { source, .. } => Some(source),
            RunError::Io(e) => Some(e),
            RunError::ToolNotFound { .. } => None,
        }
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Io(e)
    }
}

/// Where the raw build output comes from.
pub trait BuildSource {
    /// Runs (or reads) the build to completion.
    fn collect(&mut self) -> Result<BuildOutput, RunError>;
}

/// Launches the build command and waits for it.
#[derive(Debug, Clone, Default)]
pub struct CommandSource {
    builder: BuildCommandBuilder,
}

impl CommandSource {
    pub fn new(builder: BuildCommandBuilder) -> Self {
        CommandSource { builder }
    }
}

impl BuildSource for CommandSource {
    fn collect(&mut self) -> Result<BuildOutput, RunError> {
        let program = self.builder.program().to_string_lossy().to_string();
        let resolved = which(self.builder.program()).map_err(|e| {
            debug!("which({}) failed: {}", program, e);
            RunError::ToolNotFound {
                program: program.clone(),
            }
        })?;
        debug!("running: {} (resolved to {})", self.builder.display(), resolved.display());

        let (mut child, mut reader) =
            self.builder
                .spawn_merged(resolved)
                .map_err(|e| match e.kind() {
                    io::ErrorKind::NotFound => RunError::ToolNotFound {
                        program: program.clone(),
                    },
                    _ => RunError::LaunchFailed {
                        program: program.clone(),
                        source: e,
                    },
                })?;

        let mut bytes = Vec::new();
        let read = reader.read_to_end(&mut bytes);
        let status = child.wait()?;
        read?;

        let exit_code = exit_code_of(status);
        debug!("{} exited with {} after {} bytes", program, exit_code, bytes.len());
        Ok(BuildOutput {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            exit_code,
        })
    }
}

/// Output captured earlier (a saved log, or stdin) with a given exit code.
#[derive(Debug, Clone)]
pub struct CapturedSource {
    input: PathBuf,
    exit_code: i32,
}

impl CapturedSource {
    /// `input` of `-` reads standard input.
    pub fn new(input: impl Into<PathBuf>, exit_code: i32) -> Self {
        CapturedSource {
            input: input.into(),
            exit_code,
        }
    }
}

impl BuildSource for CapturedSource {
    fn collect(&mut self) -> Result<BuildOutput, RunError> {
        let bytes = if self.input.as_os_str() == "-" {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        } else {
            fs::read(&self.input)?
        };
        debug!("read {} bytes from {}", bytes.len(), self.input.display());
        Ok(BuildOutput {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            exit_code: self.exit_code,
        })
    }
}

/// The exit code to pass through for a finished build.
///
/// A build killed by a signal has no code; on Unix that maps to
/// `128 + signal`, elsewhere to `1`.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
