use clap::{Parser, Subcommand};
use std::path::Path;
use stylight_compiler::{SeedSpec, StyleSheet};
use stylight_descriptor::StyleDescriptor;

#[derive(Parser)]
#[command(name = "stylight")]
#[command(about = "stylight — compiles nested style descriptors into flat stylesheets")]
#[command(version)]
struct Cli {
    /// Log compilation details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON style descriptor to CSS
    Build {
        /// Input .json descriptor
        path: String,

        /// Seed prefix applied to rule names
        #[arg(long, env = "STYLIGHT_SEED")]
        seed: Option<String>,

        /// Output file (defaults to <input>.css next to the source)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the scope tree built for a descriptor as JSON
    Explain {
        /// Input .json descriptor
        path: String,

        /// Seed prefix applied to rule names
        #[arg(long, env = "STYLIGHT_SEED")]
        seed: Option<String>,
    },

    /// Check a descriptor for errors without writing output
    Check {
        /// Input .json descriptor
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Build { path, seed, output } => cmd_build(&path, seed, output.as_deref()),
        Command::Explain { path, seed } => cmd_explain(&path, seed),
        Command::Check { path } => cmd_check(&path),
    }
}

fn read_descriptor(path: &str) -> StyleDescriptor {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    let source = match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    };
    match serde_json::from_str(&source) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            eprintln!("Invalid descriptor in {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_build(path: &str, seed: Option<String>, output: Option<&str>) {
    let sheet = StyleSheet::new(read_descriptor(path), SeedSpec::from(seed));

    let css = match sheet.render() {
        Ok(css) => css,
        Err(e) => {
            eprintln!("Compile error: {e}");
            std::process::exit(1);
        }
    };

    let css_path = match output {
        Some(out) => Path::new(out).to_path_buf(),
        None => Path::new(path).with_extension("css"),
    };

    if let Err(e) = std::fs::write(&css_path, &css) {
        eprintln!("Error writing {}: {e}", css_path.display());
        std::process::exit(1);
    }

    log::info!("wrote {} bytes", css.len());
    eprintln!("Built: {}", css_path.display());
}

fn cmd_explain(path: &str, seed: Option<String>) {
    let sheet = StyleSheet::new(read_descriptor(path), SeedSpec::from(seed));

    let plan = match sheet.explain() {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Compile error: {e}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&plan.view()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing plan: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_check(path: &str) {
    let sheet = StyleSheet::new(read_descriptor(path), SeedSpec::Identity);

    if let Err(e) = sheet.explain() {
        eprintln!("Compile error: {e}");
        std::process::exit(1);
    }

    eprintln!("OK: {path}");
}
