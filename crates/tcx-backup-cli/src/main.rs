//! # tcx-backup CLI
//!
//! Command-line entry point for snapshotting and restoring the domain
//! sections of TCX model documents.

use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tcx_backup_cli::{Engine, FileStore};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "backup" => {
            if args.len() < 3 {
                eprintln!("Usage: tcx-backup backup <file.tcx>");
                std::process::exit(1);
            }
            let (engine, name) = engine_for(&args[2])?;
            engine.create(&name, "created")?;
        }
        "restore" => {
            if args.len() < 3 {
                eprintln!("Usage: tcx-backup restore <file.tcx> [--force]");
                std::process::exit(1);
            }
            let force = args.iter().skip(3).any(|a| a == "--force");
            let (engine, name) = engine_for(&args[2])?;
            engine.restore(&name, !force)?;
        }
        "help" | "--help" | "-h" => {
            print_help();
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn engine_for(path_arg: &str) -> Result<(Engine, String)> {
    let path = Path::new(path_arg);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("no file name in '{path_arg}'"))?
        .to_string_lossy()
        .into_owned();
    Ok((Engine::new(FileStore::new(dir)), name))
}

fn print_help() {
    println!(
        r"tcx-backup

USAGE:
    tcx-backup <COMMAND> [OPTIONS]

COMMANDS:
    backup <file.tcx>             Snapshot the document's domain sections
                                  into <file>_backup.json, replacing any
                                  existing backup
    restore <file.tcx> [--force]  Reconcile the backup against the current
                                  document and rewrite it; --force skips
                                  the backup-exists check
    help                          Show this help message

EXAMPLES:
    tcx-backup backup project.tcx
    tcx-backup restore project.tcx
    tcx-backup restore project.tcx --force
"
    );
}
