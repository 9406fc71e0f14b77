//! chordline — render a chord notation score to a WAV file.
//!
//! ```text
//! $ echo "4eefg gfed ccde 4.e8d2d" > ode_to_joy.mus
//! $ chordline ode_to_joy.mus ode_to_joy.wav
//! ```

use std::path::PathBuf;

use clap::Parser;

use chordline::{Error, RenderConfig};

#[derive(Debug, Parser)]
#[command(name = "chordline", version, about = "Render chord notation into a WAV file")]
struct Cli {
    /// Score to read: one track per line, `//` starts a comment line.
    source: PathBuf,

    /// WAV file to write.
    output: PathBuf,

    /// More logging (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Seed for the guitar's noise excitation.
    #[arg(long)]
    seed: Option<u64>,

    /// Config file (defaults to ~/.chordline/render.yaml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the interpreted song before rendering.
    #[arg(long)]
    dump_events: bool,
}

fn run(cli: &Cli) -> Result<(), Error> {
    let mut config = RenderConfig::resolve(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    chordline::render_file(&cli.source, &cli.output, &config, |song| {
        if cli.dump_events {
            println!("{song:#?}");
        }
    })?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("failed to start logger: {e}");
    }

    if let Err(e) = run(&cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
