/// Characters that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\u{07}'];

/// Starting capacity of the token vector, it grows past this on demand.
const TOKEN_CAPACITY: usize = 64;

/// The tokenized form of one input line.
///
/// Tokens borrow from the line they were split from and are never empty. An
/// argument vector without tokens is the empty command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argv<'line> {
    tokens: Vec<&'line str>,
}

impl<'line> Argv<'line> {
    /// The command name, `None` for the empty command.
    pub fn command(&self) -> Option<&'line str> {
        self.tokens.first().copied()
    }

    /// Positional arguments following the command name.
    pub fn args(&self) -> &[&'line str] {
        self.tokens.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[&'line str] {
        &self.tokens
    }
}

/// Split `line` on [`DELIMITERS`].
///
/// Adjacent delimiters never produce empty tokens. There is no quoting or escaping.
pub fn tokenize(line: &str) -> Argv<'_> {
    let mut tokens = Vec::with_capacity(TOKEN_CAPACITY);
    tokens.extend(line.split(DELIMITERS).filter(|t| !t.is_empty()));

    log::trace!("tokens {:?}", tokens);

    Argv { tokens }
}

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn simple() {
        let argv = tokenize("foo");
        assert_eq!(argv.as_slice(), &["foo"]);
        assert_eq!(argv.command(), Some("foo"));
        assert!(argv.args().is_empty());
    }

    #[test]
    fn simple_multiple() {
        let argv = tokenize("foo XX");
        assert_eq!(argv.as_slice(), &["foo", "XX"]);
        assert_eq!(argv.args(), &["XX"]);
    }

    #[test]
    fn empty_line() {
        let argv = tokenize("");
        assert!(argv.as_slice().is_empty());
        assert_eq!(argv.command(), None);
    }

    #[test]
    fn only_delimiters() {
        let argv = tokenize(" \t\r\n\u{07}  \n");
        assert!(argv.as_slice().is_empty());
        assert_eq!(argv.command(), None);
        assert!(argv.args().is_empty());
    }

    #[test]
    fn mixed_delimiters_collapse() {
        let argv = tokenize("\tls \u{07}-l\r\n  /tmp  ");
        assert_eq!(argv.as_slice(), &["ls", "-l", "/tmp"]);
    }

    #[test]
    fn command_is_text_before_first_delimiter() {
        let line = "grep\tpattern file";
        let argv = tokenize(line);
        let first = line.split(DELIMITERS).next().unwrap_or_default();
        assert_eq!(argv.command(), Some(first));
    }

    #[test]
    fn quotes_are_not_special() {
        let argv = tokenize(r#"echo "a b" 'c'"#);
        assert_eq!(argv.as_slice(), &["echo", "\"a", "b\"", "'c'"]);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let words: Vec<String> = (0..TOKEN_CAPACITY * 3).map(|i| format!("w{i}")).collect();
        let line = words.join(" ");
        let argv = tokenize(&line);
        assert_eq!(argv.as_slice().len(), words.len());
        for (exp, got) in words.iter().zip(argv.as_slice()) {
            assert_eq!(exp, got);
        }
    }
}
