//! Command line front-end for the `skysf` crate
//!
//! The positional arguments follow the historical tool:
//! `<PIXEL_LIST> <N_POINTS> <BIN_START> <N_BINS> <BIN_SIZE> <OUTPUT>`

use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::{Parser, ValueEnum, builder::PossibleValue};
use log::info;
use skysf::{
    AngularDistance, DomainPolicy, Error, HistogramConfig, LoadOptions, Report, RuntimeSpec,
    compute_structure_function, read_points, write_structure_function,
};

/// The separation metric, as selected on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricArg(pub AngularDistance);

impl Display for MetricArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.name())
    }
}

impl ValueEnum for MetricArg {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            MetricArg(AngularDistance::HaversineLog10),
            MetricArg(AngularDistance::SphericalCosine),
            MetricArg(AngularDistance::SphericalCosineLog10),
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.0.name()))
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Computes the angular structure function of sky measurements",
    allow_negative_numbers = true
)]
pub struct Args {
    /// whitespace separated records: `<RA> <Dec> <value> <error>`
    #[arg(value_name = "PIXEL_LIST")]
    pub pixel_list: PathBuf,
    /// the number of records to read
    #[arg(value_name = "N_POINTS")]
    pub n_points: usize,
    /// the lower edge of the first bin (in the units of the metric)
    #[arg(value_name = "BIN_START")]
    pub bin_start: f64,
    #[arg(value_name = "N_BINS")]
    pub n_bins: usize,
    #[arg(value_name = "BIN_SIZE")]
    pub bin_size: f64,
    /// where the binned values get written
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
    #[arg(long, default_value_t = MetricArg(AngularDistance::HaversineLog10))]
    pub metric: MetricArg,
    /// skip separations outside of [BIN_START, BIN_START + N_BINS*BIN_SIZE]
    #[arg(long)]
    pub bounded_domain: bool,
    /// added to every RA while reading (e.g. 360 for WSRT data)
    #[arg(long, default_value_t = 0.0)]
    pub ra_offset: f64,
    /// the number of teams that split up the pairs
    #[arg(long, default_value_t = NonZeroU32::MIN)]
    pub teams: NonZeroU32,
    /// run every team on a separate thread
    #[arg(long)]
    pub threaded: bool,
}

impl Args {
    fn histogram_config(&self) -> Result<HistogramConfig, Error> {
        let domain = if self.bounded_domain {
            DomainPolicy::Bounded
        } else {
            DomainPolicy::Legacy
        };
        HistogramConfig::new(self.bin_start, self.n_bins, self.bin_size, domain)
    }
}

/// Read the input, compute the structure function and write the output.
///
/// Nothing is written when an error occurs before the output stage.
pub fn run(args: &Args) -> Result<Report, Error> {
    let config = args.histogram_config()?;
    let table = read_points(
        &args.pixel_list,
        args.n_points,
        &LoadOptions {
            ra_offset: args.ra_offset,
        },
    )?;
    info!(
        "loaded {} points from {}",
        table.n_points(),
        args.pixel_list.display()
    );

    let report = compute_structure_function(
        &table.sky_points()?,
        args.metric.0,
        &config,
        &RuntimeSpec::new(args.teams, args.threaded),
    )?;

    write_structure_function(&args.output, &report.structure_function)?;
    info!(
        "wrote {} bins to {}",
        report.structure_function.n_bins(),
        args.output.display()
    );
    Ok(report)
}
