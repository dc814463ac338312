//! srmc: convert coordinates between two spatial reference frames
//!
//! Reads whitespace separated triples, one coordinate per line, and writes the
//! converted triples followed by their validity region. Angular components
//! are read and written in degrees.
//!
//! ```sh
//! echo 12 55 0 | srmc "cd orm=wgs84" "utm zone=32"
//! ```
use clap::Parser;
use log::{debug, trace};
use srm::prelude::*;
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "srmc")]
#[clap(author, version, about = "Convert coordinates between SRFs", long_about = None)]
struct Cli {
    /// Definition of the source SRF, e.g. "cd orm=ed50"
    source: String,

    /// Definition of the destination SRF, e.g. "utm zone=32 orm=wgs84"
    destination: String,

    /// Number of decimals in the output
    #[clap(short = 'd', long, default_value_t = 6)]
    decimals: usize,

    /// Echo input to output
    #[clap(short, long)]
    echo: bool,

    /// Omit the validity region from the output
    #[clap(short, long)]
    quiet: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The files to operate on, stdin if none are given
    files: Vec<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("This is srmc");
    debug!("{options:#?}");

    let source = Srf::from_definition(&options.source)?;
    let destination = Srf::from_definition(&options.destination)?;

    if options.files.is_empty() {
        let stdin = std::io::stdin();
        convert_lines(&options, &source, &destination, stdin.lock())?;
    }
    for path in &options.files {
        let file = std::fs::File::open(path)?;
        convert_lines(&options, &source, &destination, std::io::BufReader::new(file))?;
    }
    Ok(())
}

fn convert_lines(
    options: &Cli,
    source: &Srf,
    destination: &Srf,
    reader: impl BufRead,
) -> Result<(), anyhow::Error> {
    let from_degrees = source.template().angular_components();
    let to_degrees = destination.template().angular_components();

    for line in reader.lines() {
        let line = line?;
        // Strip comments and skip blank lines
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let mut values = [0.; 3];
        let mut count = 0;
        for (i, item) in content.split_whitespace().take(3).enumerate() {
            let v: f64 = item.parse()?;
            values[i] = if from_degrees[i] { v.to_radians() } else { v };
            count = i + 1;
        }
        if count < 2 {
            anyhow::bail!("expected at least two components, got: '{content}'");
        }

        let coordinate = Coordinate::new(source, values);
        let (result, validity) = destination.change_coordinate_srf(&coordinate)?;
        let mut result = result.values();
        for (i, angular) in to_degrees.iter().enumerate() {
            if *angular {
                result[i] = result[i].to_degrees();
            }
        }

        let decimals = options.decimals;
        if options.echo {
            print!("{content}  =>  ");
        }
        print!(
            "{:.decimals$} {:.decimals$} {:.decimals$}",
            result[0], result[1], result[2]
        );
        if options.quiet {
            println!();
        } else {
            println!("  {validity:?}");
        }
    }
    Ok(())
}
