use argh::FromArgs;
use log::LevelFilter;

/// soshell, a small interactive command interpreter.
#[derive(FromArgs, Debug)]
pub struct Config {
    /// do not colour the prompt
    #[argh(switch)]
    pub plain: bool,

    /// read plain lines even when stdin is a terminal
    #[argh(switch)]
    pub no_edit: bool,

    /// log verbosity: off, error, warn, info, debug or trace
    #[argh(option, default = "LevelFilter::Warn")]
    pub log_level: LevelFilter,
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_args(&["soshell"], &[]).unwrap();
        assert!(!config.plain);
        assert!(!config.no_edit);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn flags() {
        let config = Config::from_args(
            &["soshell"],
            &["--plain", "--no-edit", "--log-level", "debug"],
        )
        .unwrap();
        assert!(config.plain);
        assert!(config.no_edit);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(Config::from_args(&["soshell"], &["--log-level", "loud"]).is_err());
    }
}
