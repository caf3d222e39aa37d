use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{Level, debug};

use plate::Config;

#[derive(Parser)]
#[command(name = "plate")]
#[command(about = "Convert between plate markdown and its node tree")]
struct Cli {
    /// Config file (defaults to the bundled config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a markdown file and print its node tree as JSON
    Parse {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Turn a JSON node tree back into markdown
    Serialize {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse and re-serialize a markdown file
    Normalize {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a JSON editor message
    Validate { input: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Ok(Config::compiled_default()),
    };
    let config = config.unwrap_or_else(|e| fail(e));
    debug!(version = %config.protocol.version, "config loaded");

    match cli.command {
        Command::Parse { input, output } => {
            let text = read(&input);
            let nodes = plate::parse(&text);
            let json = plate::nodes_to_json(&nodes).unwrap_or_else(|e| fail(e));
            write(output.as_deref(), &json);
        }
        Command::Serialize { input, output } => {
            let json = read(&input);
            let nodes = plate::nodes_from_json(&json).unwrap_or_else(|e| fail(e));
            let markdown = plate::serialize_with(&nodes, &config.serialize.options())
                .unwrap_or_else(|e| fail(e));
            write(output.as_deref(), &markdown);
        }
        Command::Normalize { input, output } => {
            let text = read(&input);
            let markdown = plate::normalize(&text).unwrap_or_else(|e| fail(e));
            write(output.as_deref(), &markdown);
        }
        Command::Validate { input } => {
            let json = read(&input);
            match plate::decode(&json) {
                Ok(message) => println!("valid {}", message.message_type()),
                Err(e) => {
                    println!("invalid: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn read(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn write(path: Option<&Path>, content: &str) {
    let Some(path) = path else {
        println!("{}", content);
        return;
    };
    if let Err(e) = fs::write(path, content) {
        eprintln!("Error writing {}: {}", path.display(), e);
        std::process::exit(1);
    }
    debug!(path = %path.display(), "wrote output");
}

fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", error);
    std::process::exit(1);
}
