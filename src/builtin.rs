use std::io::Write;

use crate::{args::Argv, Outcome};

#[derive(thiserror::Error, Debug)]
pub enum Errors {
    #[error("expected argument to \"{0}\"")]
    MissingArgument(&'static str),
    #[error("{command}: {path}: {source}")]
    Path {
        command: &'static str,
        path: String,
        source: std::io::Error,
    },
    #[error("Io Error <{0}>")]
    IoError(#[from] std::io::Error),
}

/// Commands that run inside the interpreter without spawning a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Help,
    Exit,
    Ls,
    Rm,
}

impl Builtin {
    /// Run the builtin and report any failure to `stderr`.
    pub fn execute(
        self,
        registry: &Registry,
        argv: &Argv<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Outcome {
        let res = match self {
            Builtin::Cd => cd::run(argv.args()),
            Builtin::Help => help::run(registry, stdout),
            Builtin::Exit => return Outcome::Terminate,
            Builtin::Ls => ls::run(argv.args(), stdout),
            Builtin::Rm => rm::run(argv.args()),
        };

        if let Err(err) = res {
            log::debug!("builtin {:?} failed: {:?}", self, err);
            // nowhere left to report a failing stderr
            let _ = writeln!(stderr, "soshell: {}", err);
        }

        Outcome::Continue
    }
}

/// Immutable name to builtin table, built once before the loop starts.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<(&'static str, Builtin)>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entries: vec![
                ("cd", Builtin::Cd),
                ("help", Builtin::Help),
                ("exit", Builtin::Exit),
                ("ls", Builtin::Ls),
                ("rm", Builtin::Rm),
            ],
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<Builtin> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, builtin)| *builtin)
    }

    /// Registered names in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }
}

mod cd {
    use super::Errors;

    pub fn run(rest: &[&str]) -> Result<(), Errors> {
        let Some(dir) = rest.first() else {
            return Err(Errors::MissingArgument("cd"));
        };

        std::env::set_current_dir(dir).map_err(|source| Errors::Path {
            command: "cd",
            path: dir.to_string(),
            source,
        })?;

        log::debug!("working directory is now {}", dir);
        Ok(())
    }
}

mod help {
    use std::io::Write;

    use super::{Errors, Registry};

    pub fn run(registry: &Registry, stdout: &mut dyn Write) -> Result<(), Errors> {
        writeln!(stdout, "soshell")?;
        writeln!(stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(stdout, "The following are built in:")?;
        for name in registry.names() {
            writeln!(stdout, "  {}", name)?;
        }
        writeln!(stdout, "Use the man command for information on other programs.")?;
        Ok(())
    }
}

mod ls {
    use std::io::Write;

    use itertools::Itertools as _;

    use super::Errors;

    pub fn run(rest: &[&str], stdout: &mut dyn Write) -> Result<(), Errors> {
        let dir = rest.first().copied().unwrap_or(".");

        let path_err = |source| Errors::Path {
            command: "ls",
            path: dir.to_string(),
            source,
        };

        let names: Vec<String> = std::fs::read_dir(dir)
            .map_err(path_err)?
            .map_ok(|e| e.file_name().to_string_lossy().into_owned())
            .collect::<Result<_, _>>()
            .map_err(path_err)?;

        for name in names.into_iter().sorted() {
            writeln!(stdout, "{}", name)?;
        }
        Ok(())
    }
}

mod rm {
    use super::Errors;

    pub fn run(rest: &[&str]) -> Result<(), Errors> {
        let Some(file) = rest.first() else {
            return Err(Errors::MissingArgument("rm"));
        };

        std::fs::remove_file(file).map_err(|source| Errors::Path {
            command: "rm",
            path: file.to_string(),
            source,
        })
    }
}
