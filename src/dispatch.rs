use std::io::Write;

use crate::{args::Argv, builtin::Registry, launch, Outcome};

/// Routes an argument vector to a builtin or to an external program.
pub struct Dispatcher<'r> {
    registry: &'r Registry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn dispatch(
        &self,
        argv: &Argv<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Outcome {
        let Some(command) = argv.command() else {
            return Outcome::Continue;
        };

        match self.registry.lookup(command) {
            Some(builtin) => {
                log::debug!("{} is a builtin", command);
                builtin.execute(self.registry, argv, stdout, stderr)
            }
            None => {
                log::debug!("{} is an external command", command);
                // children write straight to the inherited streams
                if let Err(err) = stdout.flush() {
                    log::debug!("flushing stdout before launch failed: {}", err);
                }
                launch::launch(argv, stderr)
            }
        }
    }
}
