mod config;

use std::env;
use std::path::PathBuf;
use std::thread;

use matrix_mul::{FileSink, Matrix, MatrixMul, TimingSink, TracingSink};
use matrix_store::{MatrixSize, MatrixStore};
use tracing::{info, warn};

use config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).cloned().unwrap_or_else(|| "help".to_string());
    let config = Config::from_env();

    match mode.as_str() {
        "generate" => {
            let size: MatrixSize = args.get(2).map_or("small", String::as_str).parse()?;
            let path = args
                .get(3)
                .map(PathBuf::from)
                .unwrap_or_else(|| config.resource("matrix.txt"));

            let sink = open_sink(config.generate_time_log());
            MatrixStore::new()
                .generate_random(&path, size.edge(), &sink)
                .await?;
            println!("Generated {} matrix at {}", size, path.display());
        }
        "calculate" => {
            let (Some(a_path), Some(b_path)) = (args.get(2), args.get(3)) else {
                usage(&args);
            };
            let workers = parse_workers(args.get(4))?;

            let store = MatrixStore::new();
            let a = store.load_or_none(a_path).await;
            let b = store.load_or_none(b_path).await;
            let result = calculate(&config, a, b, workers).await?;

            if let Some(out) = args.get(5) {
                store.save(out, &result).await?;
                println!("Result written to {}", out);
            }
        }
        "run" => {
            let size_a: MatrixSize = args.get(2).map_or("small", String::as_str).parse()?;
            let size_b: MatrixSize = args.get(3).map_or("small", String::as_str).parse()?;
            let workers = parse_workers(args.get(4))?;

            let a_path = config.resource("matrix_a.txt");
            let b_path = config.resource("matrix_b.txt");

            let sink = open_sink(config.generate_time_log());
            let mut store = MatrixStore::new();
            println!("Generating {} matrix A and {} matrix B", size_a, size_b);
            store.generate_random(&a_path, size_a.edge(), &sink).await?;
            store.generate_random(&b_path, size_b.edge(), &sink).await?;

            let a = store.load_or_none(&a_path).await;
            let b = store.load_or_none(&b_path).await;
            calculate(&config, a, b, workers).await?;
        }
        _ => usage(&args),
    }

    Ok(())
}

/// Multiplies on the blocking pool so the runtime stays responsive.
async fn calculate(
    config: &Config,
    a: Option<Matrix>,
    b: Option<Matrix>,
    workers: isize,
) -> Result<Matrix, BoxError> {
    let sink = open_sink(config.calc_time_log());
    info!(workers, "starting matrix multiplication");

    let result = tokio::task::spawn_blocking(move || {
        MatrixMul::with_sink(sink).try_multiply(a.as_deref(), b.as_deref(), workers)
    })
    .await??;

    let (m, p) = matrix_mul::shape(&result);
    println!("Matrix multiplication succeeded: result is {}x{}", m, p);
    Ok(result)
}

/// Opens the timing log at `path`, or falls back to `tracing` output.
fn open_sink(path: PathBuf) -> Box<dyn TimingSink + Send> {
    match FileSink::create(&path) {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot open timing log, reporting via tracing");
            Box::new(TracingSink)
        }
    }
}

fn parse_workers(arg: Option<&String>) -> Result<isize, BoxError> {
    match arg {
        Some(s) => Ok(s.trim().parse()?),
        None => Ok(thread::available_parallelism().map_or(1, |n| n.get() as isize)),
    }
}

fn usage(args: &[String]) -> ! {
    let program = args.first().map_or("matmul", String::as_str);
    eprintln!("Usage: {} <mode> [args...]", program);
    eprintln!("Modes:");
    eprintln!("  generate <size> [path]                     - Write a random size×size matrix");
    eprintln!("  calculate <a-path> <b-path> [workers] [out] - Multiply two matrix files");
    eprintln!("  run <size-a> <size-b> [workers]            - Generate, load and multiply");
    eprintln!("Sizes: small (1000), middle (5000), big (10000) or an explicit edge length");
    std::process::exit(1);
}
