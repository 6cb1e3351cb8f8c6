pub mod command;
pub mod parse;

use crate::{
    disk::init::{perform_disk_initialization, BootConfig, BootProgress, Session},
    shell::{command::execute_command, parse::parse_command},
};
use colored::*;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use reedline::{
    default_emacs_keybindings, ColumnarMenu, DefaultCompleter, DefaultPrompt,
    DefaultPromptSegment, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal,
};
use std::{
    error::Error,
    io::stdout,
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
};
use tracing::warn;

// 与 parse_command 接受的命令（含别名）保持一致
pub const COMMANDS: [&str; 19] = [
    "help", "ls", "list", "create", "touch", "view", "cat", "read", "stat", "rm", "delete",
    "reset", "format", "export", "import", "df", "check", "exit", "quit",
];

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub boot: BootConfig,
    pub history_path: PathBuf,
    pub animation: bool,
}

pub fn start_shell(config: ShellConfig) -> Result<(), Box<dyn Error>> {
    let mut session = boot(config.boot.clone(), config.animation)?;

    let username = whoami::username();
    let hostname = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());

    println!(
        "{}",
        "Type 'help' for available commands. Use ↑↓ for history, Tab for auto-completion.\n"
            .bright_black()
    );

    let mut line_editor = build_line_editor(&config.history_path);

    loop {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(format!(
                "{}@{}",
                username.green().bold(),
                hostname.cyan().bold()
            )),
            DefaultPromptSegment::Basic("VDisk".bright_blue().bold().to_string()),
        );

        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(buffer)) => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_command(trimmed) {
                    Some(cmd) => {
                        if let Err(e) = execute_command(&cmd, &mut session) {
                            println!("{} {}", "❌ Error:".red().bold(), e);
                        }
                        if matches!(cmd, command::Command::Exit) {
                            break;
                        }
                    }
                    None => println!(
                        "{}",
                        "⚠️  Unknown command or missing argument. Type 'help' for command list."
                            .yellow()
                    ),
                }
            }
            Ok(Signal::CtrlC) => {
                println!();
                continue;
            }
            Ok(Signal::CtrlD) => {
                println!("{}", "Exiting VDisk...".yellow());
                break;
            }
            Err(e) => {
                println!("Error reading line: {}", e);
                break;
            }
        }
    }

    println!("{}", "GoodBye!".bright_yellow());
    Ok(())
}

fn build_line_editor(history_path: &Path) -> Reedline {
    let mut line_editor = Reedline::create();

    // 历史文件打不开时退回到无历史模式
    match FileBackedHistory::with_file(100, history_path.to_path_buf()) {
        Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
        Err(e) => warn!(path = %history_path.display(), error = %e, "history disabled"),
    }

    // 命令补全
    let commands = COMMANDS.iter().map(|c| c.to_string()).collect();
    let completer = DefaultCompleter::new_with_wordlen(commands, 2);
    let completion_menu = ColumnarMenu::default().with_name("completion_menu");

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );

    line_editor
        .with_completer(Box::new(completer))
        .with_menu(ReedlineMenu::EngineCompleter(Box::new(completion_menu)))
        .with_edit_mode(Box::new(Emacs::new(keybindings)))
}

/// 在后台线程初始化磁盘，前台根据进度消息驱动进度条
fn boot(config: BootConfig, animation: bool) -> Result<Session, Box<dyn Error>> {
    if animation {
        let mut stdout = stdout();
        execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        println!("{}", "[VDisk Booting...]".bright_yellow().bold());
    }

    let (tx, rx) = mpsc::channel();
    let worker = thread::spawn(move || perform_disk_initialization(tx, config));

    let pb = if animation {
        ProgressBar::new(100)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .map(|style| style.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut session = None;
    for message in rx {
        match message {
            BootProgress::Step(step) => pb.set_message(step),
            BootProgress::Progress(pos) => pb.set_position(pos),
            BootProgress::Finished(result) => {
                session = Some(result);
                break;
            }
        }
    }

    if worker.join().is_err() {
        return Err("disk initialization thread panicked".into());
    }

    let session = match session {
        Some(Ok(session)) => session,
        Some(Err(e)) => {
            pb.abandon_with_message("❌ Boot failed");
            return Err(e.into());
        }
        None => return Err("disk initialization ended without a result".into()),
    };
    pb.finish_with_message("✅ Ready!");

    if animation {
        let mut stdout = stdout();
        execute!(
            stdout,
            Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Cyan),
            Print(format!("Welcome to VDisk v{}\n", crate::VERSION)),
            ResetColor
        )?;
    }

    Ok(session)
}
