//! Cluster a point file and report quality scores and timings
//!
//! Reads points from a headerless CSV file or a 2D `f64` `.npy` file, runs
//! median k-means and prints the clusters together with the Dunn and
//! Davies-Bouldin indices.
//!
//! Usage: `cluster-points <input.csv|input.npy> <k> [seed] [max_iters]`
//!
//! A `max_iters` of zero or below runs until convergence.

use env_logger::Env;
use medkmeans::io::read_points;
use medkmeans::{run, DaviesBouldinIndex, DunnIndex, KMeansConfig, QualityIndex};
use std::env;
use std::num::ParseIntError;
use std::time::Instant;

/// Parse an iteration cap; zero or negative values mean unbounded (`0`)
fn parse_max_iters(arg: &str) -> Result<usize, ParseIntError> {
    let cap: i64 = arg.trim().parse()?;
    Ok(usize::try_from(cap).unwrap_or(0))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(Env::default().filter_or("RUST_LOG", "info"));

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 || args.len() > 5 {
        eprintln!(
            "Usage: {} <input.csv|input.npy> <k> [seed] [max_iters]",
            args.first().map_or("cluster-points", String::as_str)
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let k: usize = args[2].parse()?;
    let seed: Option<u64> = args.get(3).map(|s| s.parse()).transpose()?;
    let max_iters = args
        .get(4)
        .map(|s| parse_max_iters(s))
        .transpose()?
        .unwrap_or(0);

    let start = Instant::now();
    let points = read_points(input_path)?;
    log::info!(
        "Loaded {} points from {} in {:?}",
        points.len(),
        input_path,
        start.elapsed()
    );

    let mut config = KMeansConfig::new(k).with_max_iters(max_iters);
    config.seed = seed;

    let start = Instant::now();
    let result = run(&points, &config)?;
    log::info!(
        "Run took {:?}: {} iterations, stop reason {:?}, seed {:?}",
        start.elapsed(),
        result.n_iterations,
        result.stop_reason,
        result.seed
    );

    for cluster in &result.clusters {
        println!(
            "Cluster {}: {} points, centroid {}",
            cluster.id,
            cluster.len(),
            cluster.centroid
        );
    }

    let indices: [&dyn QualityIndex; 2] = [&DunnIndex, &DaviesBouldinIndex];
    for index in indices {
        let start = Instant::now();
        let score = index.score(&result.clusters);
        println!("{} Score: {:.6}", index.name(), score);
        log::info!("{} took {:?}", index.name(), start.elapsed());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_iters() {
        assert_eq!(parse_max_iters("25").unwrap(), 25);
        assert_eq!(parse_max_iters("0").unwrap(), 0);
        assert_eq!(parse_max_iters("-1").unwrap(), 0);
        assert_eq!(parse_max_iters(" -100 ").unwrap(), 0);
        assert!(parse_max_iters("ten").is_err());
    }
}
