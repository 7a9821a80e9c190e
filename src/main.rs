use std::io;

use smatrix::{build, BuildConfig, Direction, DuplicatePolicy, SparseError, TripletMatrix};
use tracing::{error, info};

fn labels(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix}{i}")).collect()
}

fn run() -> smatrix::Result<()> {
    // Create a labeled example matrix
    let triplet = TripletMatrix::from_parts(
        vec![1, 1, 2, 3, 3],
        vec![1, 3, 1, 1, 3],
        vec![1.0, 1.0, 2.0, 3.0, 2.0],
        4,
        4,
        Some(labels("row", 4)),
        Some(labels("col", 4)),
    )?;
    info!(nnz = triplet.nnz(), shape = ?triplet.shape(), "assembled triplet matrix");

    let csr = build(&triplet, Direction::RowMajor);
    println!("\nCSR:");
    println!("{:?}", csr);

    let csc = csr.to_csc();
    println!("\nCSC:");
    println!("{:?}", csc);

    println!("\nTranspose:");
    println!("{:?}", csr.transpose());

    let picked = csr.select_rows(&[3, 2, 0])?;
    println!("\nRows [3, 2, 0]:");
    println!("{:?}", picked);

    let picked = csc.select_columns(&[3, 3])?;
    println!("\nColumns [3, 3]:");
    println!("{:?}", picked);

    // Repeated coordinates under the strict policy
    let repeated = TripletMatrix::new(vec![0, 0], vec![1, 1], vec![1.0, 2.0], 2, 2)?;
    let config = BuildConfig::default().with_duplicates(DuplicatePolicy::Reject);
    match smatrix::build_with(&repeated, &config) {
        Err(SparseError::DuplicateEntry { row, col }) => {
            info!(row, col, "duplicate entry rejected as configured");
        }
        other => {
            println!("\nUnexpected build result: {:?}", other);
        }
    }

    Ok(())
}

fn main() {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    info!("smatrix v{}", smatrix::VERSION);

    if let Err(err) = run() {
        error!(%err, "demo failed");
        std::process::exit(1);
    }
}
