use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use filtercrate::scaffold;

/// Create a new filter definition file from the bundled template.
#[derive(Parser)]
#[command(name = "make-filter", version, about)]
struct Cli {
    /// Filter path, e.g. `PostFilter` or `blog::PostFilter`
    filter: String,

    /// Directory the filter tree is rooted at
    #[arg(long, default_value = "src/filters")]
    dir: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match scaffold::generate(&cli.filter, &cli.dir) {
        Ok(path) => {
            println!("Filter {} created at {}", cli.filter, path.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
