use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use answerview::Style;

#[derive(Parser)]
#[command(name = "answerview")]
#[command(about = "Structure and render answer text from the QA backend")]
struct Cli {
    /// Input text file
    input: PathBuf,

    /// Render inline markup to an HTML fragment instead of classifying
    #[arg(long)]
    markup: bool,

    /// Style TOML file overriding the emitted class names
    #[arg(long)]
    style: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        init_logging();
    }

    // Read input file
    let text = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.input.display(), e);
            process::exit(1);
        }
    };

    let rendered = if cli.markup {
        let style = match &cli.style {
            Some(path) => Style::load(path),
            None => Style::default(),
        };
        answerview::render_with_style(&text, &style)
    } else {
        let answer = answerview::classify(&text);
        match serde_json::to_string_pretty(&answer) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, rendered) {
                eprintln!("Error writing {}: {}", path.display(), e);
                process::exit(1);
            }
        }
        None => println!("{rendered}"),
    }
}

fn init_logging() {
    let result = fern::Dispatch::new()
        .level(log::LevelFilter::Debug)
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .chain(std::io::stderr())
        .apply();
    if result.is_err() {
        eprintln!("Warning: logger already initialized");
    }
}
