use crate::shell::command::Command;

// 按第一个空白把输入拆成 (命令, 剩余部分)
fn split_head(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (input, ""),
    }
}

fn required(arg: &str) -> Option<String> {
    let arg = arg.trim();
    (!arg.is_empty()).then(|| arg.to_string())
}

pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let (cmd, rest) = split_head(input);

    match cmd {
        "help" => Some(Command::Help),
        "ls" | "list" => Some(Command::Ls),
        // create <name> [content...]，内容原样保留（含空格）
        "create" | "touch" => {
            let (name, content) = split_head(rest);
            let name = required(name)?;
            let content = (!content.is_empty()).then(|| content.to_string());
            Some(Command::Create(name, content))
        }
        "view" | "cat" | "read" => required(rest).map(Command::View),
        "stat" => required(rest).map(Command::Stat),
        "rm" | "delete" => required(rest).map(Command::Rm),
        "reset" | "format" => Some(Command::Reset),
        "export" => {
            let (name, dest) = split_head(rest);
            Some(Command::Export(required(name)?, required(dest)))
        }
        "import" => required(rest).map(Command::Import),
        "df" => Some(Command::Df),
        "check" => Some(Command::Check),
        "exit" | "quit" => Some(Command::Exit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_commands() {
        assert!(matches!(parse_command("help"), Some(Command::Help)));
        assert!(matches!(parse_command("  ls  "), Some(Command::Ls)));
        assert!(matches!(parse_command("list"), Some(Command::Ls)));
        assert!(matches!(parse_command("df"), Some(Command::Df)));
        assert!(matches!(parse_command("check"), Some(Command::Check)));
        assert!(matches!(parse_command("reset"), Some(Command::Reset)));
        assert!(matches!(parse_command("quit"), Some(Command::Exit)));
    }

    #[test]
    fn create_keeps_content_verbatim() {
        match parse_command("create note.txt hello   world") {
            Some(Command::Create(name, Some(content))) => {
                assert_eq!(name, "note.txt");
                assert_eq!(content, "hello   world");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn create_without_content_prompts_later() {
        assert!(matches!(
            parse_command("create note.txt"),
            Some(Command::Create(name, None)) if name == "note.txt"
        ));
        assert!(parse_command("create").is_none());
    }

    #[test]
    fn name_arguments() {
        assert!(matches!(parse_command("cat a.txt"), Some(Command::View(n)) if n == "a.txt"));
        assert!(matches!(parse_command("rm a.txt"), Some(Command::Rm(n)) if n == "a.txt"));
        assert!(matches!(parse_command("stat a.txt"), Some(Command::Stat(n)) if n == "a.txt"));
        assert!(parse_command("view").is_none());
        assert!(parse_command("delete   ").is_none());
    }

    #[test]
    fn export_with_optional_destination() {
        assert!(matches!(
            parse_command("export a.txt"),
            Some(Command::Export(n, None)) if n == "a.txt"
        ));
        assert!(matches!(
            parse_command("export a.txt out/copy.txt"),
            Some(Command::Export(n, Some(d))) if n == "a.txt" && d == "out/copy.txt"
        ));
    }

    #[test]
    fn import_takes_whole_path() {
        assert!(matches!(
            parse_command("import docs/my file.txt"),
            Some(Command::Import(p)) if p == "docs/my file.txt"
        ));
    }

    #[test]
    fn completion_list_matches_parser_and_help() {
        use crate::shell::{command::HELP_TEXT, COMMANDS};

        for cmd in COMMANDS {
            assert!(
                parse_command(&format!("{} a.txt", cmd)).is_some(),
                "completion offers '{}' but the parser rejects it",
                cmd
            );
            assert!(HELP_TEXT.contains(cmd), "help does not mention '{}'", cmd);
        }
    }

    #[test]
    fn unknown_or_empty() {
        assert!(parse_command("").is_none());
        assert!(parse_command("mkdir x").is_none());
    }
}
