//! Reading, writing and generating matrix text files.

use std::path::Path;

use matrix_mul::{Matrix, TimingRecord, TimingSink};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info, warn};

use crate::Error;

const GENERATION_LABEL: &str = "Matrix generation";
const MAX_VALUE: i64 = 100;

/// File-backed source of matrices.
///
/// Matrices are stored as text, one row per line, with elements separated
/// by whitespace. Random generation uses the store's own RNG so that
/// callers control seeding.
///
/// # Example
///
/// ```no_run
/// use matrix_mul::TracingSink;
/// use matrix_store::MatrixStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut store = MatrixStore::new();
///
///     store.generate_random("matrix_a.txt", 100, &TracingSink).await?;
///     let a = store.load("matrix_a.txt").await?;
///     assert_eq!(a.len(), 100);
///
///     Ok(())
/// }
/// ```
pub struct MatrixStore {
    rng: StdRng,
}

impl MatrixStore {
    /// Creates a store whose RNG is seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a store with a fixed RNG seed for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Writes a `size × size` matrix of values in `[0, 100)` to `path`.
    ///
    /// The elapsed time is reported to `sink`; a sink failure is logged
    /// and otherwise ignored.
    pub async fn generate_random<S: TimingSink + ?Sized>(
        &mut self,
        path: impl AsRef<Path>,
        size: usize,
        sink: &S,
    ) -> Result<TimingRecord, Error> {
        let path = path.as_ref();
        let stopwatch = TimingRecord::start(GENERATION_LABEL);

        let mut writer = create(path).await?;
        let mut row = vec![0; size];
        for _ in 0..size {
            for value in row.iter_mut() {
                *value = self.rng.gen_range(0..MAX_VALUE);
            }
            write_row(&mut writer, &row).await?;
        }
        writer.flush().await?;

        let record = stopwatch.stop();
        info!(path = %path.display(), size, duration = ?record.duration, "matrix generated");
        if let Err(e) = sink.record(&record) {
            warn!(error = %e, "failed to report generation timing");
        }
        Ok(record)
    }

    /// Reads a matrix from `path`. Blank lines are skipped.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Matrix, Error> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        let mut lines = BufReader::new(file).lines();

        let mut matrix = Vec::new();
        let mut line_no = 0;
        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(str::parse::<i64>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| Error::Parse {
                    line: line_no,
                    source,
                })?;
            matrix.push(row);
        }

        debug!(path = %path.display(), rows = matrix.len(), "matrix loaded");
        Ok(matrix)
    }

    /// Like [`MatrixStore::load`], but logs failures and returns `None`.
    pub async fn load_or_none(&self, path: impl AsRef<Path>) -> Option<Matrix> {
        let path = path.as_ref();
        match self.load(path).await {
            Ok(matrix) => Some(matrix),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load matrix");
                None
            }
        }
    }

    /// Writes `matrix` to `path` in the format [`MatrixStore::load`] reads.
    pub async fn save(&self, path: impl AsRef<Path>, matrix: &[Vec<i64>]) -> Result<(), Error> {
        let path = path.as_ref();
        let mut writer = create(path).await?;
        for row in matrix {
            write_row(&mut writer, row).await?;
        }
        writer.flush().await?;
        debug!(path = %path.display(), rows = matrix.len(), "matrix saved");
        Ok(())
    }
}

impl Default for MatrixStore {
    fn default() -> Self {
        Self::new()
    }
}

async fn create(path: &Path) -> Result<BufWriter<File>, Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    Ok(BufWriter::new(File::create(path).await?))
}

async fn write_row(writer: &mut BufWriter<File>, row: &[i64]) -> Result<(), Error> {
    let mut line = row
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    Ok(())
}
