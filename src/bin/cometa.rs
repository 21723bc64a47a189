//! Command-line front end of the cometary estimators.
//!
//! Subcommands:
//! - `sublimation`: equilibrium temperature and sublimating species
//! - `mass`: photometric mass estimate
//! - `nucleus`: nucleus diameter from H and albedo
//! - `curve`: model Afρ / light curves, optionally exported as CSV
//! - `species`: print the volatile species table
//! - `request`: answer a JSON calculation request
//! - `params`: inspect a `KEY = value` parameter file

use std::{
    fs,
    io::{self, Read},
    process::ExitCode,
};

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use cometa::{
    curves::{generate, CurveInputs, CurveKind, CurveParams},
    display::{render_species_table, render_verdicts},
    nucleus::{estimate_nucleus, NucleusInput},
    param_file::ParamFile,
    photometry::{estimate_mass, MassInput, MassParams},
    points::PointSet,
    request::RequestHandler,
    CometaError, EstimatorParams, SpeciesTable, SublimationEstimator, SublimationInput,
};
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "cometa")]
#[command(about = "Sublimation, mass and nucleus estimates for comets")]
#[command(version)]
struct Args {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the body temperature and the sublimating species
    Sublimation {
        /// Heliocentric distance (au)
        #[arg(long)]
        r_sun: String,

        /// Geocentric distance, km unless suffixed with R, R⊕ or Re (Earth radii)
        #[arg(long)]
        r_earth: String,

        /// Imposed temperature (K); derived from the distances when absent
        #[arg(short, long)]
        temperature: Option<String>,

        /// JSON species table replacing the built-in one
        #[arg(long)]
        table: Option<Utf8PathBuf>,

        /// Print the per-species verdicts
        #[arg(long)]
        details: bool,
    },

    /// Estimate the mass released by the comet
    Mass {
        /// Comet magnitude m_k
        #[arg(long, allow_hyphen_values = true)]
        m_k: f64,

        /// Geocentric distance (au)
        #[arg(long)]
        delta: f64,

        /// Heliocentric distance (au)
        #[arg(long)]
        r: f64,
    },

    /// Estimate the nucleus diameter
    Nucleus {
        /// Absolute magnitude H
        #[arg(long, allow_hyphen_values = true)]
        h: f64,

        /// Geometric albedo, in (0, 1]
        #[arg(long)]
        pv: f64,

        /// Measured angular size (arcsec)
        #[arg(long)]
        angular_size: Option<f64>,

        /// Distance used for the linear size (au)
        #[arg(long)]
        distance: Option<f64>,
    },

    /// Sample a model Afρ or light curve
    Curve {
        /// afrho-distance, magnitude-distance, afrho-time or magnitude-time
        #[arg(short, long)]
        kind: CurveKind,

        #[arg(long, default_value_t = 1000.0)]
        afrho0: f64,

        #[arg(long, default_value_t = 1.0)]
        r0: f64,

        #[arg(long, default_value_t = 2.0)]
        k: f64,

        #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
        h: f64,

        #[arg(long, default_value_t = 4.0)]
        n: f64,

        #[arg(long, default_value_t = 1.0)]
        delta: f64,

        /// Read the curve inputs from a parameter file instead
        #[arg(long)]
        params: Option<Utf8PathBuf>,

        /// Observed points to report alongside the curve
        #[arg(long)]
        points: Option<Utf8PathBuf>,

        /// Write the samples to a CSV file
        #[arg(long)]
        csv: Option<Utf8PathBuf>,
    },

    /// Print the volatile species table
    Species {
        /// JSON species table replacing the built-in one
        #[arg(long)]
        table: Option<Utf8PathBuf>,

        /// Dump the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer a JSON calculation request read from a file or stdin
    Request {
        file: Option<Utf8PathBuf>,
    },

    /// Show a parameter file and run the calculations it supports
    Params {
        file: Utf8PathBuf,
    },
}

fn load_table(path: Option<&Utf8PathBuf>) -> Result<SpeciesTable, CometaError> {
    match path {
        Some(p) => SpeciesTable::from_path(p),
        None => Ok(SpeciesTable::builtin()),
    }
}

fn run(args: Args) -> Result<(), CometaError> {
    match args.command {
        Command::Sublimation {
            r_sun,
            r_earth,
            temperature,
            table,
            details,
        } => {
            let estimator =
                SublimationEstimator::new(load_table(table.as_ref())?, EstimatorParams::default());
            let input =
                SublimationInput::from_text(Some(&r_sun), Some(&r_earth), temperature.as_deref())?;
            let result = estimator.estimate(&input)?;
            println!("{result}");
            if details {
                println!();
                println!("{}", render_verdicts(&result));
            }
        }
        Command::Mass { m_k, delta, r } => {
            let input = MassInput {
                magnitude: m_k,
                delta_au: delta,
                r_au: r,
            };
            println!("{}", estimate_mass(&input, &MassParams::default())?);
        }
        Command::Nucleus {
            h,
            pv,
            angular_size,
            distance,
        } => {
            let input = NucleusInput {
                abs_magnitude: h,
                albedo: pv,
                angular_size_arcsec: angular_size,
                distance_au: distance,
            };
            println!("{}", estimate_nucleus(&input)?);
        }
        Command::Curve {
            kind,
            afrho0,
            r0,
            k,
            h,
            n,
            delta,
            params,
            points,
            csv,
        } => {
            let inputs = match params {
                Some(path) => ParamFile::from_path(&path)?.curve_inputs()?,
                None => CurveInputs {
                    afrho0,
                    r0,
                    k,
                    abs_magnitude: h,
                    slope_n: n,
                    delta,
                },
            };
            let series = generate(kind, &inputs, &CurveParams::default())?;
            println!("{series}");
            if let Some(path) = points {
                let observed = PointSet::from_file(&path)?;
                println!("Observed points ({}):", observed.len());
                for (x, y) in observed.iter() {
                    println!("  {x:>10.4} {y:>12.4}");
                }
            }
            if let Some(path) = csv {
                series.save_csv(&path)?;
                info!("curve written to {path}");
            }
        }
        Command::Species { table, json } => {
            let table = load_table(table.as_ref())?;
            if json {
                println!("{}", table.to_json()?);
            } else {
                println!("{}", render_species_table(&table));
            }
        }
        Command::Request { file } => {
            let body = match file {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let response = RequestHandler::default().handle_json(&body);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Params { file } => {
            let params = ParamFile::from_path(&file)?;
            println!("{params}");
            if params.contains("r0") && params.contains("r_earth") {
                let result = SublimationEstimator::default().estimate(&params.sublimation_input()?)?;
                println!();
                println!("{result}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::new();
    logger.filter_level(LevelFilter::Warn).parse_default_env();
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
