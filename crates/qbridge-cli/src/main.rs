//! QBridge command-line interface.
//!
//! Builds and executes quantum circuits across the registered backends,
//! compares their measurement distributions, and benchmarks circuit
//! families. All command output is JSON, suitable for piping into `jq`.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{backends, bench, multi, qasm, run, templates};

#[derive(Parser)]
#[command(name = "qbridge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered backends and their availability
    Backends,

    /// Execute a QASM 2.0 circuit on one backend
    Run {
        /// Input file (QASM 2.0)
        input: String,

        /// Backend name
        #[arg(short, long, default_value = "statevector")]
        backend: String,

        /// Number of measurement shots
        #[arg(short, long, default_value = "1024")]
        shots: u64,
    },

    /// Execute a QASM 2.0 circuit on several backends and compare results
    Multi {
        /// Input file (QASM 2.0)
        input: String,

        /// Backend to include (repeatable; defaults to all registered)
        #[arg(short, long = "backend")]
        backends: Vec<String>,

        /// Number of measurement shots
        #[arg(short, long, default_value = "1024")]
        shots: u64,
    },

    /// Parse a QASM 2.0 circuit, report its structure, and re-emit it
    Qasm {
        /// Input file (QASM 2.0)
        input: String,
    },

    /// Prepare and measure a Bell pair
    Bell {
        /// Backend name
        #[arg(short, long, default_value = "statevector")]
        backend: String,

        /// Number of measurement shots
        #[arg(short, long, default_value = "1024")]
        shots: u64,
    },

    /// Prepare and measure a GHZ state
    Ghz {
        /// Number of qubits
        #[arg(short = 'n', long, default_value = "3")]
        qubits: u32,

        /// Backend name
        #[arg(short, long, default_value = "statevector")]
        backend: String,

        /// Number of measurement shots
        #[arg(short, long, default_value = "1024")]
        shots: u64,
    },

    /// Run the three-qubit teleportation demonstration
    Teleport {
        /// Backend name
        #[arg(short, long, default_value = "statevector")]
        backend: String,

        /// Number of measurement shots
        #[arg(short, long, default_value = "1024")]
        shots: u64,
    },

    /// Benchmark a circuit family across backends
    Bench {
        /// Circuit family (bell, ghz, random)
        #[arg(short, long, default_value = "bell")]
        family: String,

        /// Number of qubits
        #[arg(short = 'n', long, default_value = "3")]
        qubits: u32,

        /// Number of measurement shots per run
        #[arg(short, long, default_value = "1024")]
        shots: u64,

        /// Timed repetitions per backend
        #[arg(short, long, default_value = "1")]
        repeats: u32,

        /// RNG seed for the random family (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Backend to include (repeatable; defaults to all registered)
        #[arg(short, long = "backend")]
        backends: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Backends => backends::execute().await,

        Commands::Run {
            input,
            backend,
            shots,
        } => run::execute(&input, &backend, shots).await,

        Commands::Multi {
            input,
            backends,
            shots,
        } => multi::execute(&input, &backends, shots).await,

        Commands::Qasm { input } => qasm::execute(&input),

        Commands::Bell { backend, shots } => templates::execute_bell(&backend, shots).await,

        Commands::Ghz {
            qubits,
            backend,
            shots,
        } => templates::execute_ghz(qubits, &backend, shots).await,

        Commands::Teleport { backend, shots } => {
            templates::execute_teleport(&backend, shots).await
        }

        Commands::Bench {
            family,
            qubits,
            shots,
            repeats,
            seed,
            backends,
        } => bench::execute(&family, qubits, shots, repeats, seed, &backends).await,
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
