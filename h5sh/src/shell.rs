//! Shell session state and command dispatch

use crate::complete::completions;
use crate::error::{H5shError, H5shResult};
use crate::help::{format_help, format_help_list, get_help, wants_help};
use crate::listing;
use crate::path::{split_container, unquote, Location};
use crate::pattern::Pattern;
use crate::theme::Theme;
use h5sh_sdk::StoreProvider;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

/// Store handle shared between the shell and the line editor.
pub type SharedStore = Arc<dyn StoreProvider + Send + Sync>;

/// A command handler: receives the shell, the raw argument text and the
/// output sink.
pub type CommandFn = fn(&mut Shell, &str, &mut dyn Write) -> H5shResult<()>;

pub struct Shell {
    store: SharedStore,
    file_name: String,
    cwd: Location,
    theme: Theme,
    commands: HashMap<&'static str, CommandFn>,
}

impl Shell {
    pub fn new(store: SharedStore, file_name: &str) -> Self {
        ShellBuilder::new(store).file_name(file_name).build()
    }

    pub fn cwd(&self) -> &Location {
        &self.cwd
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Registered verbs, sorted.
    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Prompt from a template, see [`Theme::render_prompt`].
    pub fn prompt(&self, template: &str) -> String {
        self.theme
            .render_prompt(template, &self.file_name, self.cwd.as_str())
    }

    /// Group-name completions for a partially typed path.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        completions(self.store.as_ref(), &self.cwd, partial)
    }

    /// User-facing, styled form of an error.
    pub fn error_message(&self, err: &H5shError) -> String {
        self.theme
            .paint(self.theme.error, &format!("h5sh: {err}"))
    }

    /// Runs one command line, writing its output to `out`.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> H5shResult<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let handler = *self
            .commands
            .get(verb)
            .ok_or_else(|| H5shError::CommandNotFound(verb.to_string()))?;

        if wants_help(arg) {
            let topic = if verb == "?" { "help" } else { verb };
            if let Some(help) = get_help(topic) {
                out.write_all(format_help(help).as_bytes())?;
                return Ok(());
            }
        }

        tracing::debug!(verb, arg, "Executing command");
        handler(self, arg, out)
    }

    /// Runs one command line and returns what it printed.
    pub fn execute_capture(&mut self, line: &str) -> H5shResult<String> {
        let mut buf = Vec::new();
        self.execute(line, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn cmd_cd(&mut self, arg: &str, _out: &mut dyn Write) -> H5shResult<()> {
        let arg = unquote(arg);
        let expr = format!("{}/", arg.trim_end_matches('/'));
        let target = Location::from_resolved(&self.cwd.resolve(&expr));

        if !self.store.is_group(target.as_str()) {
            return Err(H5shError::InvalidGroupPath(target.to_string()));
        }
        tracing::debug!(from = %self.cwd, to = %target, "Changed group");
        self.cwd = target;
        Ok(())
    }

    fn cmd_ls(&mut self, arg: &str, out: &mut dyn Write) -> H5shResult<()> {
        let resolved = self.cwd.resolve(unquote(arg));
        let (container, fragment) = split_container(&resolved);

        if !self.store.is_group(container.as_str()) {
            return Err(H5shError::InvalidGroupPath(container.to_string()));
        }

        let pattern = Pattern::compile(fragment)?;
        for line in listing::list(self.store.as_ref(), &container, &pattern, &self.theme)? {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    fn cmd_pwd(&mut self, _arg: &str, out: &mut dyn Write) -> H5shResult<()> {
        writeln!(out, "{}", self.cwd)?;
        Ok(())
    }

    fn cmd_help(&mut self, arg: &str, out: &mut dyn Write) -> H5shResult<()> {
        if arg.is_empty() {
            out.write_all(format_help_list().as_bytes())?;
            return Ok(());
        }
        let help = get_help(arg)
            .ok_or_else(|| H5shError::InvalidArgument(format!("no help on '{arg}'")))?;
        out.write_all(format_help(help).as_bytes())?;
        Ok(())
    }

    fn cmd_quit(&mut self, _arg: &str, _out: &mut dyn Write) -> H5shResult<()> {
        Err(H5shError::Exit(0))
    }
}

/// Builds a [`Shell`] with the standard command table.
pub struct ShellBuilder {
    store: SharedStore,
    file_name: String,
    theme: Theme,
    commands: HashMap<&'static str, CommandFn>,
}

impl ShellBuilder {
    pub fn new(store: SharedStore) -> Self {
        let mut commands: HashMap<&'static str, CommandFn> = HashMap::new();
        commands.insert("cd", Shell::cmd_cd);
        commands.insert("ls", Shell::cmd_ls);
        commands.insert("pwd", Shell::cmd_pwd);
        commands.insert("help", Shell::cmd_help);
        commands.insert("?", Shell::cmd_help);
        commands.insert("quit", Shell::cmd_quit);
        commands.insert("exit", Shell::cmd_quit);

        Self {
            store,
            file_name: String::new(),
            theme: Theme::plain(),
            commands,
        }
    }

    /// Name shown in the prompt.
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Registers or replaces a command.
    pub fn command(mut self, name: &'static str, handler: CommandFn) -> Self {
        self.commands.insert(name, handler);
        self
    }

    pub fn build(self) -> Shell {
        Shell {
            store: self.store,
            file_name: self.file_name,
            cwd: Location::root(),
            theme: self.theme,
            commands: self.commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h5sh_core::MemoryStore;
    use h5sh_sdk::{AttributeInfo, DatasetInfo, ElementType, Shape};

    fn shell() -> Shell {
        let mut store = MemoryStore::new();
        store
            .set_attribute("/", "version", AttributeInfo::scalar(ElementType::parse("int64"), "5"))
            .unwrap();
        store.add_group("/alpha").unwrap();
        store.add_group("/alpha/inner").unwrap();
        store
            .add_dataset(
                "/alpha/data",
                DatasetInfo {
                    shape: Shape::new(vec![10, 3]),
                    element_type: ElementType::parse("float32"),
                },
            )
            .unwrap();
        store.add_group("/beta").unwrap();
        store.add_group("/my group").unwrap();
        Shell::new(Arc::new(store), "sample.h5")
    }

    #[test]
    fn shell_starts_at_root() {
        let shell = shell();
        assert!(shell.cwd().is_root());
        assert_eq!(shell.file_name(), "sample.h5");
    }

    #[test]
    fn cd_into_group_and_back() {
        let mut shell = shell();
        shell.execute_capture("cd alpha").unwrap();
        assert_eq!(shell.cwd().as_str(), "/alpha");

        shell.execute_capture("cd inner/").unwrap();
        assert_eq!(shell.cwd().as_str(), "/alpha/inner");

        shell.execute_capture("cd ../..").unwrap();
        assert!(shell.cwd().is_root());

        shell.execute_capture("cd /alpha//inner").unwrap();
        shell.execute_capture("cd").unwrap();
        assert!(shell.cwd().is_root());
    }

    #[test]
    fn cd_to_missing_path_keeps_location() {
        let mut shell = shell();
        shell.execute_capture("cd alpha").unwrap();

        let err = shell.execute_capture("cd nowhere").unwrap_err();
        assert!(matches!(err, H5shError::InvalidGroupPath(ref p) if p == "/alpha/nowhere"));
        assert_eq!(shell.cwd().as_str(), "/alpha");

        let err = shell.execute_capture("cd data").unwrap_err();
        assert!(matches!(err, H5shError::InvalidGroupPath(_)));
        assert_eq!(shell.cwd().as_str(), "/alpha");
    }

    #[test]
    fn cd_accepts_quoted_names() {
        let mut shell = shell();
        shell.execute_capture("cd \"my group\"").unwrap();
        assert_eq!(shell.cwd().as_str(), "/my group");
        shell.execute_capture("cd ..").unwrap();
        shell.execute_capture("cd my group").unwrap();
        assert_eq!(shell.cwd().as_str(), "/my group");
    }

    #[test]
    fn ls_current_group() {
        let mut shell = shell();
        let out = shell.execute_capture("ls").unwrap();
        assert_eq!(
            out,
            "@version ------------------------------- =5           (int64)   \n\
             alpha/\nbeta/\nmy group/\n"
        );
    }

    #[test]
    fn ls_with_pattern_and_path() {
        let mut shell = shell();
        assert_eq!(shell.execute_capture("ls a*").unwrap(), "alpha/\n");
        assert_eq!(shell.execute_capture("ls ?eta").unwrap(), "beta/\n");
        assert_eq!(
            shell.execute_capture("ls alpha/").unwrap(),
            "inner/\ndata -----------------------------------    10x3    (float32)  \n"
        );
        shell.execute_capture("cd alpha/inner").unwrap();
        assert_eq!(shell.execute_capture("ls ../d*").unwrap().lines().count(), 1);
        assert_eq!(shell.execute_capture("ls ../..").unwrap().lines().count(), 4);
    }

    #[test]
    fn ls_without_matches_prints_nothing() {
        let mut shell = shell();
        assert_eq!(shell.execute_capture("ls zzz*").unwrap(), "");
    }

    #[test]
    fn ls_on_dataset_container_is_an_error() {
        let mut shell = shell();
        let err = shell.execute_capture("ls alpha/data/").unwrap_err();
        assert!(matches!(err, H5shError::InvalidGroupPath(ref p) if p == "/alpha/data"));

        let err = shell.execute_capture("ls missing/x").unwrap_err();
        assert!(matches!(err, H5shError::InvalidGroupPath(_)));
    }

    #[test]
    fn pwd_prints_location() {
        let mut shell = shell();
        shell.execute_capture("cd beta").unwrap();
        assert_eq!(shell.execute_capture("pwd").unwrap(), "/beta\n");
    }

    #[test]
    fn help_and_unknown_commands() {
        let mut shell = shell();
        assert!(shell.execute_capture("help").unwrap().contains("Available commands"));
        assert!(shell.execute_capture("?").unwrap().contains("Available commands"));
        assert!(shell.execute_capture("help ls").unwrap().starts_with("ls - "));
        assert!(shell.execute_capture("ls --help").unwrap().starts_with("ls - "));
        assert!(matches!(
            shell.execute_capture("help rm").unwrap_err(),
            H5shError::InvalidArgument(_)
        ));
        assert!(matches!(
            shell.execute_capture("rm -rf /").unwrap_err(),
            H5shError::CommandNotFound(ref v) if v == "rm"
        ));
    }

    #[test]
    fn help_flag_only_intercepts_long_form() {
        let mut store = MemoryStore::new();
        store.add_group("/-h").unwrap();
        store.add_group("/--help").unwrap();
        let mut shell = Shell::new(Arc::new(store), "flags.h5");

        assert_eq!(shell.execute_capture("ls -h").unwrap(), "-h/\n");
        shell.execute_capture("cd -h").unwrap();
        assert_eq!(shell.cwd().as_str(), "/-h");

        assert!(shell.execute_capture("cd --help").unwrap().starts_with("cd - "));
        assert_eq!(shell.cwd().as_str(), "/-h");
        shell.execute_capture("cd ../--help").unwrap();
        assert_eq!(shell.cwd().as_str(), "/--help");

        assert!(shell.execute_capture("? --help").unwrap().starts_with("help - "));
    }

    #[test]
    fn quit_requests_exit() {
        let mut shell = shell();
        assert!(matches!(shell.execute_capture("quit").unwrap_err(), H5shError::Exit(0)));
        assert!(matches!(shell.execute_capture("exit").unwrap_err(), H5shError::Exit(0)));
    }

    #[test]
    fn empty_line_is_a_noop() {
        let mut shell = shell();
        assert_eq!(shell.execute_capture("   ").unwrap(), "");
    }

    #[test]
    fn prompt_shows_file_and_location() {
        let mut shell = shell();
        shell.execute_capture("cd alpha").unwrap();
        assert_eq!(shell.prompt("{file}:{cwd}> "), "sample.h5:/alpha> ");
    }

    #[test]
    fn completions_follow_location() {
        let mut shell = shell();
        assert_eq!(shell.completions("a"), vec!["alpha"]);
        shell.execute_capture("cd alpha").unwrap();
        assert_eq!(shell.completions("i"), vec!["inner"]);
        assert!(shell.completions("d").is_empty());
    }

    #[test]
    fn builder_registers_extra_commands() {
        fn hello(_shell: &mut Shell, arg: &str, out: &mut dyn Write) -> H5shResult<()> {
            writeln!(out, "hello {arg}")?;
            Ok(())
        }
        let mut shell = ShellBuilder::new(Arc::new(MemoryStore::new()))
            .command("hello", hello)
            .build();
        assert_eq!(shell.execute_capture("hello world").unwrap(), "hello world\n");
        assert!(shell.command_names().contains(&"hello"));
    }

    #[test]
    fn errors_render_with_theme() {
        let shell = ShellBuilder::new(Arc::new(MemoryStore::new()))
            .theme(Theme::ansi())
            .build();
        let msg = shell.error_message(&H5shError::InvalidGroupPath("/x".to_string()));
        assert_eq!(msg, "\x1b[31mh5sh: Path '/x' is not a group\x1b[m");
    }
}
