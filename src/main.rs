use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use vdisk::{
    disk::init::BootConfig,
    fs::config::METADATA_FILE_NAME,
    shell::{start_shell, ShellConfig},
};

/// VDisk 虚拟磁盘 shell
#[derive(Parser, Debug)]
#[command(name = "vdisk")]
#[command(about = "Interactive shell over a fixed-size in-memory virtual disk")]
#[command(version)]
struct Args {
    /// Host directory used by import/export
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Metadata file path
    #[arg(short, long, default_value = METADATA_FILE_NAME)]
    metadata: PathBuf,

    /// Shell history file (defaults to ~/.vdisk_history)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Log filter, overridden by RUST_LOG
    #[arg(short, long, default_value = "warn")]
    log: String,

    /// Skip the boot animation
    #[arg(long)]
    no_animation: bool,
}

fn main() {
    let args = Args::parse();

    // 日志输出到 stderr，避免和 shell 输出混在一起
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let history_path = args.history.unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vdisk_history")
    });

    let config = ShellConfig {
        boot: BootConfig {
            host_root: args.root,
            metadata_path: args.metadata,
        },
        history_path,
        animation: !args.no_animation,
    };

    if let Err(e) = start_shell(config) {
        tracing::error!("shell exited with error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
