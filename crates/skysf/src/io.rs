//! Reading measurements from and writing results to flat text files
//!
//! The input holds one record per line: `<RA> <Dec> <value> <error>`
//! (whitespace separated, angles in degrees). The output holds one line per
//! bin: `<bin center> <mean sq diff> <mean var sum> <count>`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, warn};
use ndarray::Array2;
use skysf_nostd_internal::SkyPoints;

use crate::{BinRow, Error, StructureFunction};

/// Adjustments applied while loading records
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoadOptions {
    /// added to every right ascension (some surveys expect `360.0`)
    pub ra_offset: f64,
}

/// Owns the measurements that [`SkyPoints`] views
#[derive(Clone, Debug)]
pub struct PointTable {
    // shape is (2, n_points)
    positions: Array2<f64>,
    values: Vec<f64>,
    errors: Vec<f64>,
}

impl PointTable {
    /// Build a table from separate columns (angles in degrees)
    pub fn new(
        longitudes: &[f64],
        latitudes: &[f64],
        values: Vec<f64>,
        errors: Vec<f64>,
    ) -> Result<Self, Error> {
        let n_points = values.len();
        if longitudes.len() != n_points
            || latitudes.len() != n_points
            || errors.len() != n_points
        {
            return Err(Error::internal_legacy_adhoc(
                "every column must hold the same number of points",
            ));
        }
        let positions = Array2::from_shape_fn((2, n_points), |(axis, i)| {
            if axis == 0 { longitudes[i] } else { latitudes[i] }
        });
        Ok(Self {
            positions,
            values,
            errors,
        })
    }

    pub fn n_points(&self) -> usize {
        self.values.len()
    }

    pub fn sky_points(&self) -> Result<SkyPoints<'_>, Error> {
        SkyPoints::new(self.positions.view(), &self.values, &self.errors)
            .map_err(Error::internal_legacy_adhoc)
    }
}

/// Read the first `n_points` records from the file at `path`
pub fn read_points(
    path: &Path,
    n_points: usize,
    options: &LoadOptions,
) -> Result<PointTable, Error> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::input_unavailable(path.to_path_buf(), e))?;
    let table = parse_points(&text, n_points, options)?;
    debug!("read {} records from {}", table.n_points(), path.display());
    Ok(table)
}

/// Parse the first `n_points` records from `text`.
///
/// Blank lines are skipped. Every other line must hold exactly 4 floating
/// point values. Lines following the last requested record are ignored.
pub fn parse_points(
    text: &str,
    n_points: usize,
    options: &LoadOptions,
) -> Result<PointTable, Error> {
    // the requested count may far exceed what the input holds
    let capacity = n_points.min(text.lines().count());
    let mut longitudes = Vec::with_capacity(capacity);
    let mut latitudes = Vec::with_capacity(capacity);
    let mut values = Vec::with_capacity(capacity);
    let mut errors = Vec::with_capacity(capacity);

    let mut n_ignored = 0;
    for (line_index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        } else if values.len() == n_points {
            n_ignored += 1;
            continue;
        }
        let [ra, dec, value, error] = parse_record(line)
            .map_err(|what| Error::malformed_record(line_index + 1, line.to_string(), what))?;
        longitudes.push(ra + options.ra_offset);
        latitudes.push(dec);
        values.push(value);
        errors.push(error);
    }

    if values.len() < n_points {
        return Err(Error::record_count(n_points, values.len()));
    } else if n_ignored > 0 {
        warn!("ignored {n_ignored} record(s) after the first {n_points}");
    }
    PointTable::new(&longitudes, &latitudes, values, errors)
}

fn parse_record(line: &str) -> Result<[f64; 4], String> {
    let mut out = [0.0; 4];
    let mut fields = line.split_whitespace();
    for (i, slot) in out.iter_mut().enumerate() {
        let field = fields
            .next()
            .ok_or_else(|| format!("expected 4 fields, found {i}"))?;
        *slot = field
            .parse::<f64>()
            .map_err(|_| format!("unable to parse {field:?} as a float"))?;
    }
    let n_extra = fields.count();
    if n_extra > 0 {
        Err(format!("expected 4 fields, found {}", 4 + n_extra))
    } else {
        Ok(out)
    }
}

/// Mimics the `%lf` conversion of C's `printf` (6 decimal places)
fn c_float(value: f64) -> String {
    if value.is_nan() {
        String::from("nan")
    } else if value.is_infinite() {
        String::from(if value > 0.0 { "inf" } else { "-inf" })
    } else {
        format!("{value:.6}")
    }
}

/// Format a single output line (without the trailing newline)
pub fn format_row(row: &BinRow) -> String {
    format!(
        "{} {} {} {}",
        c_float(row.center),
        c_float(row.mean_sq_diff),
        c_float(row.mean_var_sum),
        row.count
    )
}

/// Write one line per bin to `writer`
pub fn write_rows<W: Write>(
    mut writer: W,
    structure_function: &StructureFunction,
) -> std::io::Result<()> {
    for row in structure_function.rows() {
        writeln!(writer, "{}", format_row(row))?;
    }
    writer.flush()
}

/// Write one line per bin to the file at `path` (replacing any existing
/// file)
pub fn write_structure_function(
    path: &Path,
    structure_function: &StructureFunction,
) -> Result<(), Error> {
    File::create(path)
        .and_then(|file| write_rows(BufWriter::new(file), structure_function))
        .map_err(|e| Error::output_write(path.to_path_buf(), e))
}
