use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use crossword_solver::{Crossword, LetterGrid, PsResult, Solver, SolverOptions};
use log::{error, info, warn, LevelFilter};

/// Fill a crossword structure with words from a word list.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The crossword structure. Each line is a row of the grid; `_` marks
    /// an open cell and any other character a blocked one.
    #[clap(verbatim_doc_comment)]
    structure: PathBuf,

    /// The word list, one word per line.
    words: PathBuf,

    /// Also write the filled grid to this file, as the same plain text
    /// printed to the terminal.
    #[clap(verbatim_doc_comment)]
    output: Option<PathBuf>,

    /// Skip arc consistency and go straight to search.
    #[arg(long)]
    no_arc_consistency: bool,

    /// Try words in lexicographic order rather than least constraining
    /// first.
    #[arg(long)]
    no_value_ordering: bool,

    /// Log propagation and search progress; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn configure_logging(verbose: u8) {
    let level_filter = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "{}", record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    configure_logging(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> PsResult<()> {
    let crossword = Crossword::open(&args.structure, &args.words)?;
    info!(
        "read a {}x{} crossword from {}",
        crossword.width(),
        crossword.height(),
        args.structure.display()
    );

    let options = SolverOptions {
        arc_consistency: !args.no_arc_consistency,
        least_constraining_value: !args.no_value_ordering,
    };
    let mut solver = Solver::with_options(&crossword, options);

    match solver.solve() {
        None => println!("No solution."),
        Some(solution) => {
            let grid = LetterGrid::from_solution(&crossword, &solution);
            print!("{}", grid);
            if let Some(output) = args.output {
                if is_image_path(&output) {
                    warn!(
                        "{} names an image, but the grid is written as plain text",
                        output.display()
                    );
                }
                fs::write(&output, grid.to_string())?;
                info!("wrote the grid to {}", output.display());
            }
        }
    }

    Ok(())
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .map_or(false, |ext| {
            matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp" | "svg")
        })
}
