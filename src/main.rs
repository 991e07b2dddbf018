//! gitvfs command-line interface
//!
//! Browse a repository through the virtual filesystem: list directories,
//! stat resources, and print file contents by path.

use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

use gitvfs::{open_fs, GitVfs};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let mut location = String::from(".");
    let mut json = false;
    let mut verbose = false;
    let mut command: Option<String> = None;
    let mut path = String::from("/");
    let mut saw_path = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-R" | "--repo" => {
                i += 1;
                if i < args.len() {
                    location = args[i].clone();
                }
            }
            "-j" | "--json" => {
                json = true;
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "--version" => {
                println!("gitvfs v0.1.0");
                return ExitCode::SUCCESS;
            }
            arg => {
                if arg.starts_with('-') {
                    eprintln!("Unknown option: {}", arg);
                    return ExitCode::FAILURE;
                } else if command.is_none() {
                    command = Some(arg.to_string());
                } else {
                    path = arg.to_string();
                    saw_path = true;
                }
            }
        }
        i += 1;
    }

    init_tracing(verbose);

    let command = match command {
        Some(command) => command,
        None => {
            print_help();
            return ExitCode::FAILURE;
        }
    };

    let vfs = match open_location(&location) {
        Ok(vfs) => vfs,
        Err(err) => {
            eprintln!("gitvfs: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let result = match command.as_str() {
        "ls" => cmd_ls(&vfs, &path, json),
        "stat" => cmd_stat(&vfs, &path, json),
        "cat" => {
            if !saw_path {
                eprintln!("gitvfs: cat requires a path");
                return ExitCode::FAILURE;
            }
            cmd_cat(&vfs, &path)
        }
        other => {
            eprintln!("gitvfs: unknown command '{}'", other);
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gitvfs: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// open either a plain repository path or a `scheme://` url
fn open_location(location: &str) -> Result<GitVfs, Box<dyn Error>> {
    if location.contains("://") {
        Ok(open_fs(location)?)
    } else {
        Ok(GitVfs::open(location)?)
    }
}

fn cmd_ls(vfs: &GitVfs, path: &str, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        let infos = vfs.scandir(path, None)?;
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else {
        for name in vfs.listdir(path)? {
            println!("{}", name);
        }
    }
    Ok(())
}

fn cmd_stat(vfs: &GitVfs, path: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let info = vfs.getinfo(path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        let name = if info.name().is_empty() { "/" } else { info.name() };
        println!("name: {}", name);
        println!("kind: {}", if info.is_dir() { "directory" } else { "file" });
        println!("size: {}", info.size());
        println!(
            "mode: {:o} ({})",
            info.permissions().mode(),
            info.permissions()
        );
    }
    Ok(())
}

fn cmd_cat(vfs: &GitVfs, path: &str) -> Result<(), Box<dyn Error>> {
    let mut stream = vfs.openbin(path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    io::copy(&mut stream, &mut out)?;
    out.flush()?;
    Ok(())
}

fn print_help() {
    println!("gitvfs - browse a Git repository as a read-only filesystem");
    println!();
    println!("Usage: gitvfs [options] <command> [path]");
    println!();
    println!("Commands:");
    println!("  ls [path]      List a directory (default /)");
    println!("  stat [path]    Show resource information");
    println!("  cat <path>     Print a file's contents");
    println!();
    println!("Options:");
    println!("  -R, --repo <path>   Repository location or git:// url (default .)");
    println!("  -j, --json          Emit JSON output for ls and stat");
    println!("  -v, --verbose       Enable debug logging");
    println!("  -h, --help          Show this help");
    println!("  --version           Show version");
    println!();
    println!("Paths:");
    println!("  /head/...                    tree of the current HEAD commit");
    println!("  /tags/<tag>/...              tree at a tag's commit");
    println!("  /branches/<branch>/...       tree at a branch's commit");
    println!("  /remotes/<remote>/<ref>/...  tree at a remote ref's commit");
}
