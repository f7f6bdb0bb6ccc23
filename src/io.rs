//! Point sources: load equal-dimension vectors from delimited text or `.npy`.

use crate::error::{KMeansError, Result};
use crate::vector::{points_from_array, Vector};
use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use ndarray_npy::ReadNpyExt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read points from a headerless, comma-delimited file (one point per row)
pub fn read_points_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Vector>> {
    let file = File::open(path)?;
    read_points_csv_from_reader(BufReader::new(file))
}

/// Read points from any CSV source. Every row must have the same width.
pub fn read_points_csv_from_reader<R: Read>(reader: R) -> Result<Vec<Vector>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut points = Vec::new();
    let mut n_features = None;

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let values = record
            .iter()
            .map(|field| {
                field.parse::<f64>().map_err(|e| {
                    KMeansError::ParseFloat(format!("row {}: {:?}: {}", row + 1, field, e))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        match n_features {
            None => n_features = Some(values.len()),
            Some(expected) if expected != values.len() => {
                return Err(KMeansError::InvalidDimensions(format!(
                    "row {} has {} features, expected {}",
                    row + 1,
                    values.len(),
                    expected
                )));
            }
            Some(_) => {}
        }

        points.push(Vector::new(values));
    }

    Ok(points)
}

/// Read points from a 2D `f64` `.npy` file of shape (n_samples, n_features)
pub fn read_points_npy<P: AsRef<Path>>(path: P) -> Result<Vec<Vector>> {
    let file = File::open(path)?;
    read_points_npy_from_reader(BufReader::new(file))
}

pub fn read_points_npy_from_reader<R: Read>(reader: R) -> Result<Vec<Vector>> {
    let data = Array2::<f64>::read_npy(reader)?;
    Ok(points_from_array(&data.view()))
}

/// Read points choosing the format from the file extension (`.npy` or CSV)
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<Vec<Vector>> {
    let path = path.as_ref();
    let is_npy = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("npy"))
        .unwrap_or(false);

    if is_npy {
        read_points_npy(path)
    } else {
        read_points_csv(path)
    }
}
