//! ANSI styles for prompt, listings and errors.

/// Style codes, fixed for the whole session. The plain theme has every code
/// empty, so rendered text carries no escape sequences at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub prompt: &'static str,
    pub path: &'static str,
    pub stats: &'static str,
    pub group: &'static str,
    pub attribute: &'static str,
    pub dataset: &'static str,
    pub datatype: &'static str,
    pub error: &'static str,
    pub reset: &'static str,
}

impl Theme {
    #[must_use]
    pub const fn ansi() -> Self {
        Self {
            prompt: "\x1b[22;32m",
            path: "\x1b[1;32m",
            stats: "\x1b[1;33m",
            group: "\x1b[1;34m",
            attribute: "\x1b[1;36m",
            dataset: "\x1b[0;37m",
            datatype: "\x1b[1;35m",
            error: "\x1b[31m",
            reset: "\x1b[m",
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            prompt: "",
            path: "",
            stats: "",
            group: "",
            attribute: "",
            dataset: "",
            datatype: "",
            error: "",
            reset: "",
        }
    }

    #[must_use]
    pub const fn new(colour: bool) -> Self {
        if colour {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    /// Wraps `text` in `style`, closed with the reset code.
    #[must_use]
    pub fn paint(&self, style: &str, text: &str) -> String {
        format!("{style}{text}{}", self.reset)
    }

    /// Fills a prompt template: `{file}`, `{cwd}` and the style
    /// placeholders `{prompt}`, `{path}`, `{reset}`.
    #[must_use]
    pub fn render_prompt(&self, template: &str, file: &str, cwd: &str) -> String {
        template
            .replace("{file}", file)
            .replace("{cwd}", cwd)
            .replace("{prompt}", self.prompt)
            .replace("{path}", self.path)
            .replace("{reset}", self.reset)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ansi()
    }
}
