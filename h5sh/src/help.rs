pub struct CommandHelp {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub details: &'static str,
}

pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: "cd",
        summary: "Change the current group",
        usage: "cd [GROUP]",
        details: "Changes the current group to GROUP, or to '/' if GROUP is absent.\n\
                  Relative paths, '..' and '.' are accepted.",
    },
    CommandHelp {
        name: "exit",
        summary: "Exit the shell",
        usage: "exit",
        details: "",
    },
    CommandHelp {
        name: "help",
        summary: "Display help for commands",
        usage: "help [COMMAND]",
        details: "",
    },
    CommandHelp {
        name: "ls",
        summary: "List contents of a group",
        usage: "ls [PATH]",
        details: "Lists the current group or PATH. The last path segment may use the\n\
                  wildcards '*' (any run of characters) and '?' (exactly one), so\n\
                  'ls /foo*' lists every object in the root group whose name starts\n\
                  with 'foo' and 'ls ?bar' lists 4-character names ending in 'bar'.\n\
                  \n\
                  Each line describes one object:\n\
                  \n\
                  \x20 group_name/                        a group\n\
                  \x20 +datatype_name                     a named datatype\n\
                  \x20 @attr_name ------- =VALUE (DTYPE)  a single-valued attribute\n\
                  \x20 @attr_name ------- SHAPE  (DTYPE)  an array attribute\n\
                  \x20 dataset_name ----- SHAPE  (DTYPE)  a dataset\n\
                  \n\
                  Attributes of the group come first, then its members.",
    },
    CommandHelp {
        name: "pwd",
        summary: "Print the current group",
        usage: "pwd",
        details: "",
    },
    CommandHelp {
        name: "quit",
        summary: "Exit the shell (EOF also works)",
        usage: "quit",
        details: "",
    },
];

pub fn get_help(name: &str) -> Option<&'static CommandHelp> {
    COMMANDS.iter().find(|c| c.name == name)
}

pub fn format_help(cmd: &CommandHelp) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} - {}\n\n", cmd.name, cmd.summary));
    out.push_str(&format!("Usage: {}\n", cmd.usage));
    if !cmd.details.is_empty() {
        out.push('\n');
        out.push_str(cmd.details);
        out.push('\n');
    }
    out
}

pub fn format_help_list() -> String {
    let mut out = String::new();
    out.push_str("h5sh - Shell Commands\n\n");
    out.push_str("Available commands:\n\n");

    for cmd in COMMANDS {
        out.push_str(&format!("  {:12} {}\n", cmd.name, cmd.summary));
    }

    out.push_str("\nUse 'help COMMAND' or 'COMMAND --help' for more information.\n");
    out
}

/// `--help` after a verb asks for its help text. Short `-h` is left alone
/// so it can name an object; an object called `--help` is reached as
/// `./--help`.
pub fn wants_help(arg: &str) -> bool {
    arg == "--help"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_has_help() {
        for name in ["cd", "ls", "pwd", "help", "quit", "exit"] {
            assert!(get_help(name).is_some(), "missing help for {name}");
        }
        assert!(get_help("rm").is_none());
    }

    #[test]
    fn ls_help_describes_conventions() {
        let text = format_help(get_help("ls").unwrap());
        assert!(text.starts_with("ls - List contents of a group\n\nUsage: ls [PATH]\n"));
        assert!(text.contains("group_name/"));
        assert!(text.contains("+datatype_name"));
        assert!(text.contains("@attr_name"));
    }

    #[test]
    fn help_list_names_every_command() {
        let text = format_help_list();
        for cmd in COMMANDS {
            assert!(text.contains(cmd.name));
        }
    }

    #[test]
    fn help_flags() {
        assert!(wants_help("--help"));
        assert!(!wants_help("-h"));
        assert!(!wants_help("h"));
    }
}
