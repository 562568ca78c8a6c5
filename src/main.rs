use clap::Parser;
use exportflat::{convert_file, Outcome, Profile, EXIT_NO_DATA};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "exportflat")]
#[command(about = "Flatten key/value export dumps into CSV", long_about = None)]
struct Args {
    /// Input export file (JSON array of records)
    input: PathBuf,

    /// Expand per-record characteristics into numbered column groups
    #[arg(long)]
    characteristics: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let profile = if args.characteristics {
        Profile::Characteristics
    } else {
        Profile::Standard
    };

    match convert_file(&args.input, profile) {
        Ok(Outcome::Written(path)) => {
            println!("Results written to: {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::NoData) => {
            println!("No data extracted.");
            ExitCode::from(EXIT_NO_DATA)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
