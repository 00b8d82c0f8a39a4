#[cfg(test)]
pub(crate) mod fake;
mod system;

pub use system::System;

/// The `Executor` trait runs external programs on behalf of the volume manager.
///
/// Implementations receive the full argument vector, where `args[0]` is the program
/// to execute. On success they return the combined standard output and standard error
/// of the process.
pub trait Executor: Send + Sync {
    fn exec_combined_output(&self, args: &[String]) -> Result<String>;
}

/// Executor related errors
#[derive(Debug)]
pub enum Error {
    /// The argument vector did not name a program
    EmptyCommand,
    /// The program could not be started, or its output could not be collected
    Spawn(std::io::Error),
    /// The program ran but did not exit successfully.
    ///
    /// `code` is `None` when the process was terminated by a signal.
    Exit { code: Option<i32>, output: String },
}

impl Error {
    /// The combined output captured before the failure, if any.
    pub fn output(&self) -> &str {
        match self {
            Error::Exit { output, .. } => output,
            _ => "",
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::EmptyCommand => write!(f, "no program to execute"),
            Error::Spawn(e) => write!(f, "failed to run command: {}", e),
            Error::Exit {
                code: Some(code), ..
            } => write!(f, "exit status {}", code),
            Error::Exit { code: None, .. } => write!(f, "terminated by signal"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Spawn(e)
    }
}

impl From<nix::Error> for Error {
    fn from(e: nix::Error) -> Self {
        Error::Spawn(std::io::Error::from_raw_os_error(e as i32))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_exit_error_keeps_output() {
        let err = Error::Exit {
            code: Some(5),
            output: "  Failed to find logical volume \"vg0/snap2\"\n".to_string(),
        };

        assert_eq!(err.to_string(), "exit status 5");
        assert!(err.output().contains("Failed to find logical volume"));
    }

    #[test]
    fn test_signal_and_spawn_errors_have_no_output() {
        let signal = Error::Exit {
            code: None,
            output: String::new(),
        };
        assert_eq!(signal.to_string(), "terminated by signal");

        let spawn = Error::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(spawn.output(), "");
        assert!(spawn.to_string().starts_with("failed to run command"));
    }
}
