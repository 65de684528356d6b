//! # Kernel build invoker
//!
//! Drives the NAIF `mkspk` utility: checks the output path, deals with an already
//! existing kernel, runs the tool and looks for the kernel it should have produced.
//!
//! ## Steps
//! -----------------
//! 1. The output path must end in `.bsp`, otherwise [`MkspkError::InvalidKernelExtension`]
//!    is returned before anything touches the filesystem.
//! 2. If the output already exists, the [`OverwritePolicy`] decides: a refusal returns
//!    [`BuildOutcome::Declined`] and leaves the file as it is; an acceptance removes it.
//! 3. `mkspk -setup <setup> -input <input> -output <output>` is run and waited for,
//!    optionally bounded by a timeout. Its own diagnostics go to the inherited
//!    stdout/stderr and its exit status is only logged.
//! 4. The kernel file existing afterwards is the only success signal; otherwise
//!    [`MkspkError::KernelNotProduced`] is returned.
//!
//! Nothing is retried. Two builds targeting the same output must be serialized by the caller.
//!
//! ## Example
//! ```rust, no_run
//! use camino::Utf8Path;
//! use mkspk_setup::invoker::{BuildOutcome, MkspkInvoker, OverwritePolicy};
//!
//! let mut invoker = MkspkInvoker::from_env().with_overwrite(OverwritePolicy::Abort);
//! let outcome = invoker
//!     .build(
//!         Utf8Path::new("halo_setup.txt"),
//!         Utf8Path::new("halo_input.txt"),
//!         Utf8Path::new("halo.bsp"),
//!     )
//!     .unwrap();
//! assert!(matches!(outcome, BuildOutcome::Built(_) | BuildOutcome::Declined(_)));
//! ```
use std::{
    io::{self, BufRead, Write},
    process::{Child, Command, ExitStatus, Stdio},
    time::{Duration, Instant},
};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info, warn};

use crate::{
    constants::{MKSPK_EXECUTABLE, MKSPK_EXE_ENV, SPK_EXTENSION},
    mkspk_errors::MkspkError,
};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// What to do when the output kernel already exists.
///
/// Variants
/// -----------------
/// * `Overwrite` – Remove the existing kernel for the next build only, then behave as `Abort`.
/// * `Abort` – Keep the existing kernel and report [`BuildOutcome::Declined`].
/// * `AlwaysOverwrite` – Remove the existing kernel on every build.
/// * `Ask` – Ask on the terminal, `n` declines and anything else (including an empty answer) accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    Overwrite,
    Abort,
    #[default]
    AlwaysOverwrite,
    Ask,
}

/// Result of a build that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The kernel now exists at this path
    Built(Utf8PathBuf),
    /// The kernel already existed and overwriting it was refused
    Declined(Utf8PathBuf),
}

/// Check that `path` names an SPK kernel (`.bsp`).
pub fn check_kernel_extension(path: &Utf8Path) -> Result<(), MkspkError> {
    match path.extension() {
        Some(SPK_EXTENSION) => Ok(()),
        _ => Err(MkspkError::InvalidKernelExtension(path.to_path_buf())),
    }
}

/// Ask whether `path` may be removed.
///
/// Arguments
/// -----------------
/// * `input` – Where the answer is read from.
/// * `output` – Where the question is written.
/// * `path` – The existing kernel.
///
/// Return
/// ----------
/// * `false` only for the answer `n`; an empty answer accepts.
pub fn prompt_overwrite<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    path: &Utf8Path,
) -> io::Result<bool> {
    write!(
        output,
        "{path} already exists; would you like to remove? (y/n) [y]: "
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim() != "n")
}

/// Runs `mkspk` according to its configuration.
#[derive(Debug, Clone)]
pub struct MkspkInvoker {
    program: String,
    prefix_args: Vec<String>,
    overwrite: OverwritePolicy,
    timeout: Option<Duration>,
}

impl Default for MkspkInvoker {
    fn default() -> Self {
        MkspkInvoker::new(MKSPK_EXECUTABLE)
    }
}

impl MkspkInvoker {
    /// Invoker for `program`, overwriting existing kernels and without timeout.
    pub fn new(program: impl Into<String>) -> Self {
        MkspkInvoker {
            program: program.into(),
            prefix_args: Vec::new(),
            overwrite: OverwritePolicy::default(),
            timeout: None,
        }
    }

    /// Invoker for the program named by `MKSPK_EXE`, or `mkspk` from `PATH`.
    pub fn from_env() -> Self {
        let program = std::env::var(MKSPK_EXE_ENV).unwrap_or_else(|_| MKSPK_EXECUTABLE.into());
        MkspkInvoker::new(program)
    }

    /// Arguments placed before the `-setup` flag, for tools run through a launcher.
    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    /// Kill `mkspk` and fail if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite
    }

    /// Build the kernel `output_path` from a setup file and a trajectory input file.
    ///
    /// Arguments
    /// -----------------
    /// * `setup_path` – Setup file, see [`crate::setup::writer`].
    /// * `input_path` – Trajectory file, see [`crate::trajectory_file`].
    /// * `output_path` – Kernel to produce, must end in `.bsp`.
    ///
    /// Return
    /// ----------
    /// * [`BuildOutcome::Built`] when the kernel exists after `mkspk` returned.
    /// * [`BuildOutcome::Declined`] when the kernel existed and the policy refused to remove it.
    /// * [`MkspkError::InvalidKernelExtension`], [`MkspkError::Io`], [`MkspkError::SpawnFailed`],
    ///   [`MkspkError::Timeout`] or [`MkspkError::KernelNotProduced`] otherwise.
    pub fn build(
        &mut self,
        setup_path: &Utf8Path,
        input_path: &Utf8Path,
        output_path: &Utf8Path,
    ) -> Result<BuildOutcome, MkspkError> {
        check_kernel_extension(output_path)?;

        if output_path.exists() {
            if !self.confirm_overwrite(output_path)? {
                info!(path = %output_path, "Kernel already exists, build declined");
                return Ok(BuildOutcome::Declined(output_path.to_path_buf()));
            }
            std::fs::remove_file(output_path)
                .map_err(|e| MkspkError::io("remove existing kernel", output_path, e))?;
            debug!(path = %output_path, "Removed existing kernel");
        }

        let status = self.run(setup_path, input_path, output_path)?;
        if !status.success() {
            warn!(program = %self.program, %status, "mkspk exited with a failure status");
        }

        if output_path.exists() {
            info!(path = %output_path, "Successfully generated kernel");
            Ok(BuildOutcome::Built(output_path.to_path_buf()))
        } else {
            warn!(path = %output_path, "mkspk did not produce the kernel");
            Err(MkspkError::KernelNotProduced(output_path.to_path_buf()))
        }
    }

    fn confirm_overwrite(&mut self, path: &Utf8Path) -> Result<bool, MkspkError> {
        match self.overwrite {
            OverwritePolicy::Overwrite => {
                self.overwrite = OverwritePolicy::Abort;
                Ok(true)
            }
            OverwritePolicy::Abort => Ok(false),
            OverwritePolicy::AlwaysOverwrite => Ok(true),
            OverwritePolicy::Ask => {
                let stdin = io::stdin();
                prompt_overwrite(stdin.lock(), io::stdout(), path)
                    .map_err(|e| MkspkError::io("ask about overwriting", path, e))
            }
        }
    }

    fn run(
        &self,
        setup_path: &Utf8Path,
        input_path: &Utf8Path,
        output_path: &Utf8Path,
    ) -> Result<ExitStatus, MkspkError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.prefix_args)
            .arg("-setup")
            .arg(setup_path)
            .arg("-input")
            .arg(input_path)
            .arg("-output")
            .arg(output_path)
            .stdin(Stdio::null());
        debug!(?command, "Running mkspk");

        let mut child = command.spawn().map_err(|source| MkspkError::SpawnFailed {
            program: self.program.clone(),
            source,
        })?;

        match self.timeout {
            None => child
                .wait()
                .map_err(|e| MkspkError::io("wait for mkspk building", output_path, e)),
            Some(timeout) => self.wait_with_timeout(&mut child, timeout, output_path),
        }
    }

    fn wait_with_timeout(
        &self,
        child: &mut Child,
        timeout: Duration,
        output_path: &Utf8Path,
    ) -> Result<ExitStatus, MkspkError> {
        let deadline = Instant::now() + timeout;
        loop {
            let polled = child
                .try_wait()
                .map_err(|e| MkspkError::io("wait for mkspk building", output_path, e))?;
            if let Some(status) = polled {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                if let Err(e) = child.kill() {
                    warn!(program = %self.program, pid = child.id(), error = %e, "Unable to kill mkspk");
                }
                if let Err(e) = child.wait() {
                    warn!(program = %self.program, pid = child.id(), error = %e, "Unable to reap mkspk");
                }
                warn!(program = %self.program, ?timeout, "mkspk killed after timeout");
                return Err(MkspkError::Timeout {
                    program: self.program.clone(),
                    timeout,
                });
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}
