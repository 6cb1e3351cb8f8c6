use colored::*;
use dialoguer::{Confirm, Input};
use std::{error::Error, path::Path};

use crate::{
    disk::init::Session,
    utils::{format_timestamp, human_size},
};

#[derive(Debug)]
pub enum Command {
    Help,
    Ls,
    Create(String, Option<String>),
    View(String),
    Stat(String),
    Rm(String),
    Reset,
    Export(String, Option<String>),
    Import(String),
    Df,
    Check,
    Exit,
}

pub fn execute_command(cmd: &Command, session: &mut Session) -> Result<(), Box<dyn Error>> {
    match cmd {
        Command::Help => print_help(),
        Command::Ls => {
            let files = session.fs.list();
            if files.is_empty() {
                println!("{}", "No files found.".bright_black());
            }
            for (name, size) in files {
                println!("📄  {:<32} {:>10}", name, format!("{} bytes", size).bright_black());
            }
        }
        Command::Create(name, content) => {
            let content = match content {
                Some(content) => content.clone(),
                None => Input::<String>::new()
                    .with_prompt("Enter file content")
                    .allow_empty(true)
                    .interact_text()?,
            };
            let record = session.fs.create(name, content.as_bytes())?;
            println!(
                "📝 Created file: {} ({} bytes at offset {})",
                name.green(),
                record.size,
                record.start_address
            );
        }
        Command::View(name) => {
            let bytes = session.fs.read(name)?;
            println!("📖 File content of {}:", name.cyan());
            println!("{}", String::from_utf8_lossy(&bytes));
        }
        Command::Stat(name) => {
            let record = session.fs.stat(name)?;
            let blocks = session.fs.plan().blocks_for(record.size);
            println!(
                "{}\n{}: {}\n{}: {}\n{}: {} bytes\n{}: {}\n",
                "📊 File Info".bright_yellow().bold(),
                "Name".blue(),
                record.name,
                "Offset".blue(),
                record.start_address,
                "Size".blue(),
                record.size,
                "Blocks".blue(),
                blocks
            );
        }
        Command::Rm(name) => {
            session.fs.delete(name)?;
            println!("❌ Deleted file: {}", name.red());
        }
        Command::Reset => {
            let confirmed = Confirm::new()
                .with_prompt("Delete all files and reset the system?")
                .default(false)
                .interact()?;
            if !confirmed {
                println!("{}", "Reset cancelled.".bright_black());
                return Ok(());
            }
            session.fs.reset();
            session.header = session.metadata.stamp(*session.fs.plan())?;
            println!("{}", "💾 All files deleted, system has been reset!".green());
            println!(
                "{} {}",
                "Metadata restamped:".bright_black(),
                session.metadata.path().display()
            );
        }
        Command::Export(name, dest) => {
            let dest = dest.as_deref().unwrap_or(name.as_str());
            let written = session.fs.export(name, &session.host, Path::new(dest))?;
            println!(
                "📤 Exported {} to {} ({} bytes)",
                name.cyan(),
                session.host.root().join(dest).display().to_string().green(),
                written
            );
        }
        Command::Import(path) => {
            let record = session.fs.import(&session.host, Path::new(path))?;
            println!(
                "📥 Imported {} as {} ({} bytes)",
                path.cyan(),
                record.name.green(),
                record.size
            );
        }
        Command::Df => {
            let usage = session.fs.usage();
            println!(
                "{}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n",
                "💽 Disk Usage".bright_yellow().bold(),
                "Volume".blue(),
                session.header.volume_id,
                "Metadata".blue(),
                session.metadata.path().display(),
                "Formatted".blue(),
                format_timestamp(session.header.formatted_at),
                "Capacity".blue(),
                human_size(usage.capacity),
                "Used".blue(),
                human_size(usage.used),
                "Free".blue(),
                human_size(usage.free),
                "Largest free run".blue(),
                human_size(usage.largest_free_run)
            );
            println!("{}: {}", "Files".blue(), usage.files);
        }
        Command::Check => {
            session.fs.verify()?;
            println!("{}", "✅ Directory and occupancy map are consistent.".green());
        }
        Command::Exit => println!("{}", "👋 Exiting VDisk shell...".yellow().bold()),
    }

    Ok(())
}

pub const HELP_TEXT: &str = "
  ls | list                     List files
  create | touch <file> [text]  Create file (prompts for content if omitted)
  view | cat | read <file>      Show file content
  stat <file>                   Show file info
  rm | delete <file>            Delete file
  reset | format                Delete all files and reset the system
  export <file> [dest]          Copy file from virtual disk to host
  import <path>                 Copy file from host to virtual disk
  df                            Show disk usage
  check                         Verify directory/occupancy consistency
  help                          Show this help message
  exit | quit                   Quit the shell
";

fn print_help() {
    println!("{}", "📘 VDisk Commands".bright_cyan().bold());
    println!("{}", HELP_TEXT.bright_black());
}
