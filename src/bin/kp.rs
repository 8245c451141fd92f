/*! Koordinatprocessering !*/
use anyhow::Context;
use clap::{Parser, ValueEnum};
use geotrans::prelude::*;
use log::{debug, trace, warn};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// KP: The Geotrans Coordinate Processing program. Reads coordinates,
/// one point per line, from the files given (or stdin), and transforms
/// them from the source CRS to the target CRS.
///
/// With `--geodesic inverse`, lines of `lon1 lat1 lon2 lat2` give the
/// distance and azimuths between two points. With `--geodesic direct`,
/// lines of `lon lat azimuth distance` give the destination and the
/// azimuth there. Points are in the coordinates of the source CRS.
#[derive(Parser, Debug)]
#[command(name = "kp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Definition of the source CRS
    #[arg(long, default_value = "latlong")]
    src: String,

    /// Definition of the target CRS
    #[arg(long, default_value = "latlong")]
    dest: String,

    /// Angular coordinates are in radians, rather than degrees
    #[arg(long)]
    radians: bool,

    /// Geographic coordinates are given (and returned) in latitude,
    /// longitude order
    #[arg(long)]
    swap: bool,

    /// Solve geodesic problems, rather than transforming coordinates
    #[arg(long, value_enum)]
    geodesic: Option<Geodesic>,

    /// Number of decimals in the output
    #[arg(short = 'd', long)]
    decimals: Option<usize>,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The files to operate on
    args: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Geodesic {
    Inverse,
    Direct,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("This is KP");
    debug!("{options:#?}");

    let registry = Registry::new();
    let src = registry.crs(&options.src)?;

    // Geodesics are computed in the source CRS only
    let pipeline = match options.geodesic {
        None => Some(Pipeline::plan(&src, &registry.crs(&options.dest)?)?),
        Some(_) => None,
    };

    let mut output = io::stdout().lock();
    if options.args.is_empty() {
        process(io::stdin().lock(), &mut output, &options, &src, pipeline.as_ref())?;
        return Ok(());
    }
    for path in &options.args {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Cannot open '{}'", path.display()))?;
        process(BufReader::new(file), &mut output, &options, &src, pipeline.as_ref())?;
    }
    Ok(())
}

// ----- P R O C E S S I N G -----------------------------------------------------------

fn process(
    input: impl BufRead,
    output: &mut impl io::Write,
    options: &Cli,
    src: &Crs,
    pipeline: Option<&Pipeline>,
) -> Result<(), anyhow::Error> {
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        // Strip comments, and skip blank lines
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let values = match parse(line) {
            Ok(values) => values,
            Err(e) => {
                warn!("Line {}: {e}", index + 1);
                continue;
            }
        };

        let result = match (options.geodesic, pipeline) {
            (Some(problem), _) => geodesic(problem, &values, options, src),
            (None, Some(pipeline)) => transformed(&values, options, pipeline),
            (None, None) => Err(Error::General("no pipeline")),
        };
        match result {
            Ok(result) => writeln!(output, "{result}")?,
            Err(e) => warn!("Line {}: {e}", index + 1),
        }
    }
    Ok(())
}

fn parse(line: &str) -> Result<Vec<f64>, anyhow::Error> {
    line.split_whitespace()
        .map(|item| {
            item.parse::<f64>()
                .with_context(|| format!("Cannot parse '{item}' as a number"))
        })
        .collect()
}

fn transformed(values: &[f64], options: &Cli, pipeline: &Pipeline) -> Result<String, Error> {
    let mut point = CoordinateBatch::from_point(values)?;
    if options.swap && pipeline.source().is_latlong() {
        geotrans::units::swap_axes(&mut point);
    }
    pipeline.apply(&mut point, options.radians)?;
    if options.swap && pipeline.target().is_latlong() {
        geotrans::units::swap_axes(&mut point);
    }

    let angular = pipeline.target().is_latlong();
    let decimals = decimals(options, angular);
    let mut items = Vec::new();
    for (i, value) in point.values().iter().enumerate() {
        // Heights are linear, even in geographic CRS
        let d = if i < 2 { decimals } else { decimals.min(5) };
        items.push(format!("{value:.d$}"));
    }
    Ok(items.join(" "))
}

fn geodesic(
    problem: Geodesic,
    values: &[f64],
    options: &Cli,
    src: &Crs,
) -> Result<String, Error> {
    if values.len() != 4 {
        return Err(Error::Shape {
            expected: "4 columns",
            found: values.len(),
        });
    }
    let angular = src.is_latlong();
    let d = decimals(options, angular);
    let p1 = Coor2D::raw(values[0], values[1]);

    if problem == Geodesic::Inverse {
        let p2 = Coor2D::raw(values[2], values[3]);
        let inverse = geodesic_inverse(src, &p1, &p2, options.radians)?;
        return Ok(format!(
            "{:.5} {:.10} {:.10}",
            inverse.distance, inverse.azimuth1, inverse.azimuth2
        ));
    }

    let direct = geodesic_direct(src, &p1, values[2], values[3], options.radians)?;
    let destination = direct.destination;
    Ok(format!(
        "{:.d$} {:.d$} {:.10}",
        destination[0], destination[1], direct.azimuth
    ))
}

// Angular coordinates get enough decimals for sub-millimeter resolution
fn decimals(options: &Cli, angular: bool) -> usize {
    if let Some(decimals) = options.decimals {
        return decimals;
    }
    match (angular, options.radians) {
        (true, true) => 12,
        (true, false) => 10,
        (false, _) => 5,
    }
}
