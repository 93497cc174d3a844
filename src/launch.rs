use std::{
    io::Write,
    os::unix::process::ExitStatusExt as _,
    process::{Command, ExitStatus},
};

use crate::{args::Argv, Outcome};

#[derive(thiserror::Error, Debug)]
pub enum LaunchError {
    #[error("empty command")]
    Empty,
    #[error("{program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("waiting on {program} failed: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
}

/// How a child reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
}

impl From<ExitStatus> for Termination {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Self::Exited(code),
            (None, Some(signal)) => Self::Signaled(signal),
            // wait only reports exited or killed children
            (None, None) => Self::Exited(-1),
        }
    }
}

/// Run an external program and block until it terminates.
///
/// The child's status never changes control flow, every launch continues the loop.
pub fn launch(argv: &Argv<'_>, stderr: &mut dyn Write) -> Outcome {
    match run(argv) {
        Ok(Termination::Exited(code)) => log::debug!("child exited with {}", code),
        Ok(Termination::Signaled(signal)) => log::debug!("child killed by signal {}", signal),
        Err(err) => {
            log::debug!("launch failed: {:?}", err);
            let _ = writeln!(stderr, "soshell: {}", err);
        }
    }

    Outcome::Continue
}

/// Spawn `argv[0]` from `PATH` and reap it.
///
/// `Child::wait` does not ask for stopped children, so it only returns once the
/// child has exited or was killed by a signal.
pub fn run(argv: &Argv<'_>) -> Result<Termination, LaunchError> {
    let Some(program) = argv.command() else {
        return Err(LaunchError::Empty);
    };
    let rest = argv.args();

    let mut child = Command::new(program)
        .args(rest)
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            program: program.to_string(),
            source,
        })?;

    log::debug!("spawned {} as pid {}", program, child.id());

    match child.wait() {
        Ok(status) => Ok(status.into()),
        Err(source) => {
            // do not leave a zombie behind
            let _ = child.kill();
            let _ = child.wait();
            Err(LaunchError::Wait {
                program: program.to_string(),
                source,
            })
        }
    }
}
