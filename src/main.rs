mod args;
mod builtin;
mod completion;
mod config;
mod dispatch;
mod launch;
mod logger;
mod prompt;
mod repl;
mod terminal;

use anyhow::Context as _;
use crossterm::tty::IsTty as _;

use crate::{
    builtin::Registry, config::Config, dispatch::Dispatcher, prompt::Prompt, repl::Piped,
    terminal::Editor,
};

/// Whether the read-eval loop keeps going after a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Terminate,
}

fn main() -> anyhow::Result<()> {
    let config: Config = argh::from_env();

    logger::init(config.log_level).context("unable to install the logger")?;
    log::debug!("starting with {:?}", config);

    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);
    let prompt = Prompt::for_this_host(config.plain)?;

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    let stdin = std::io::stdin();
    if stdin.is_tty() && !config.no_edit {
        let mut editor = Editor::new(dispatcher.registry());
        repl::repl(&mut editor, &prompt, &dispatcher, &mut stdout, &mut stderr)
    } else {
        let mut input = Piped::new(stdin.lock(), std::io::stdout());
        repl::repl(&mut input, &prompt, &dispatcher, &mut stdout, &mut stderr)
    }
}
