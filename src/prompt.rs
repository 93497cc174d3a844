use anyhow::Context as _;
use crossterm::style::Stylize as _;

/// `<hostname> $ `, optionally coloured.
#[derive(Debug, Clone)]
pub struct Prompt {
    text: String,
    width: u16,
}

impl Prompt {
    pub fn new(host: &str, plain: bool) -> Self {
        let text = if plain {
            format!("{} $ ", host)
        } else {
            format!("{} {} ", host.green().bold(), "$".bold())
        };

        // the styled text carries escape codes, the cursor only cares about glyphs
        let width = (host.chars().count() + 3).try_into().unwrap_or(u16::MAX);

        Self { text, width }
    }

    pub fn for_this_host(plain: bool) -> anyhow::Result<Self> {
        let host = nix::unistd::gethostname().context("unable to read the hostname")?;
        Ok(Self::new(&host.to_string_lossy(), plain))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Visible width in terminal columns.
    pub fn width(&self) -> u16 {
        self.width
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::{assert_eq, assert_str_eq};

    use super::*;

    #[test]
    fn plain_prompt() {
        let p = Prompt::new("box", true);
        assert_str_eq!(p.text(), "box $ ");
        assert_eq!(p.width(), 6);
    }

    #[test]
    fn styled_prompt_keeps_visible_width() {
        let p = Prompt::new("box", false);
        assert!(p.text().contains("box"));
        assert!(p.text().len() > "box $ ".len());
        assert_eq!(p.width(), 6);
    }
}
