use std::fs::File;
use std::io::Read;
use std::os::unix::io::FromRawFd;
use std::process::{Command, Stdio};

use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::unistd::pipe2;

use super::{Error, Executor, Result};

/// `System` runs commands as child processes of the current process.
#[derive(Debug, Default)]
pub struct System;

impl System {
    pub fn new() -> System {
        Self
    }
}

impl Executor for System {
    /// Spawn `args[0]` and wait for it to exit.
    ///
    /// Standard output and standard error share a single pipe, so the returned text
    /// keeps the order in which the program wrote it.
    fn exec_combined_output(&self, args: &[String]) -> Result<String> {
        let (program, arguments) = args.split_first().ok_or(Error::EmptyCommand)?;

        log::debug!("running `{}`", args.join(" "));

        let (read_fd, write_fd) = pipe2(OFlag::O_CLOEXEC)?;
        // SAFETY: `read_fd` was just returned by pipe2 and nothing else owns it.
        let mut reader = unsafe { File::from_raw_fd(read_fd) };
        let stderr_fd = match fcntl(write_fd, FcntlArg::F_DUPFD_CLOEXEC(0)) {
            Ok(fd) => fd,
            Err(e) => {
                let _ = nix::unistd::close(write_fd);
                return Err(e.into());
            }
        };

        // The command owns both write ends and closes them when dropped, which has to
        // happen before reading or the pipe never reports end of file.
        let mut child = {
            let mut cmd = Command::new(program);
            cmd.args(arguments).stdin(Stdio::null());
            // SAFETY: each descriptor is handed to exactly one `Stdio`.
            unsafe {
                cmd.stdout(Stdio::from_raw_fd(write_fd));
                cmd.stderr(Stdio::from_raw_fd(stderr_fd));
            }
            cmd.spawn()?
        };

        let mut raw = Vec::new();
        let read = reader.read_to_end(&mut raw);
        let status = child.wait()?;
        read?;

        let output = String::from_utf8_lossy(&raw).into_owned();
        if !status.success() {
            log::debug!("`{}` exited with {}", program, status);
            return Err(Error::Exit {
                code: status.code(),
                output,
            });
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::System;
    use crate::executor::fake::argv;
    use crate::executor::{Error, Executor};

    #[test]
    fn test_combined_output_contains_both_streams() {
        let output = System::new()
            .exec_combined_output(&argv(&["sh", "-c", "echo out; echo err >&2"]))
            .unwrap();

        assert_eq!(output, "out\nerr\n");
    }

    #[test]
    fn test_non_zero_exit_returns_output() {
        let err = System::new()
            .exec_combined_output(&argv(&["sh", "-c", "echo volume not found >&2; exit 5"]))
            .unwrap_err();

        match err {
            Error::Exit { code, output } => {
                assert_eq!(code, Some(5));
                assert_eq!(output, "volume not found\n");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_fails_to_spawn() {
        let err = System::new()
            .exec_combined_output(&argv(&["thinsnap-no-such-program"]))
            .unwrap_err();

        assert!(matches!(err, Error::Spawn(_)));
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let err = System::new().exec_combined_output(&[]).unwrap_err();

        assert!(matches!(err, Error::EmptyCommand));
    }
}
