//! zeroshot: run a zero-shot agent over a benchmark dataset
//! =========================================================
//!
//! ```text
//! # Launch llama-server for the model and run the diagnosis benchmark
//! $ zeroshot --bench-name classification_public --dataset rows.jsonl --output-path preds.csv
//!
//! # Reuse a server that is already running, first 10 rows only
//! $ zeroshot --bench-name sql_generation_public --dataset rows.jsonl \
//!       --server-url http://127.0.0.1:8080 --debug
//! ```
//!
//! The benchmark name picks the agent by prefix: `classification*` or `sql_generation*`.

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use zeroshot_client::{
    benchmark::dataset::load_rows,
    logging::{LoggingConfigTrait, DEFAULT_LOG_DIR},
    *,
};
use zeroshot_interface::{LlamaServer, LlamaServerLauncher, ServerArgs};

#[derive(Debug, Parser)]
#[command(name = "zeroshot", version)]
struct Cli {
    /// Benchmark name; must start with `classification` or `sql_generation`
    #[arg(long)]
    bench_name: String,

    /// Hugging Face GGUF repository, optionally with a `:quant` suffix
    #[arg(long, default_value = zeroshot_interface::DEFAULT_HF_REPO)]
    model_name: String,

    /// cpu, cuda, cuda:<n> or metal
    #[arg(long, default_value = "cuda:0")]
    device: String,

    /// Only the first 10 rows, with DEBUG logging
    #[arg(long)]
    debug: bool,

    /// Load 8-bit weights instead of 16-bit
    #[arg(long)]
    use_8bit: bool,

    /// CSV file for `id,prediction` rows
    #[arg(long, value_name = "PATH")]
    output_path: Option<PathBuf>,

    /// Write per-row records and the run summary as JSONL in the log directory
    #[arg(long)]
    telemetry: bool,

    /// JSONL benchmark rows
    #[arg(long, value_name = "PATH")]
    dataset: PathBuf,

    /// Use a running server instead of launching one
    #[arg(long, value_name = "URL")]
    server_url: Option<String>,

    /// llama-server executable
    #[arg(long, value_name = "PATH")]
    server_bin: Option<PathBuf>,

    #[arg(long, default_value_t = 600)]
    load_budget_secs: u64,

    #[arg(long, value_name = "DIR", default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let llm_config = LlmConfig::new(&cli.bench_name, &cli.model_name, &cli.device, cli.use_8bit)?;
    let bench_config = BenchConfig {
        bench_name: cli.bench_name.clone(),
        output_path: cli.output_path.clone(),
    };

    let mut logging = LoggingConfig::new().logger_name("zeroshot").log_dir(&cli.log_dir);
    if cli.debug {
        logging = logging.log_level_debug();
    }
    logging.load_logger()?;
    tracing::info!("{llm_config}");
    tracing::info!("{bench_config}");

    let device = llm_config.parsed_device()?;
    let server = match &cli.server_url {
        Some(url) => LlamaServer::attach(url, &llm_config.model_name)?,
        None => {
            let server_args = ServerArgs::builder()
                .hf_repo(llm_config.model_name.clone())
                .precision(llm_config.precision())
                .device(device)
                .build();
            LlamaServerLauncher::builder()
                .maybe_server_bin(cli.server_bin.clone())
                .server_args(server_args)
                .load_budget(Duration::from_secs(cli.load_budget_secs))
                .build()
                .load()?
        }
    };
    let server = Arc::new(server);

    let rows = load_rows(&cli.dataset, llm_config.task()?)?;
    let telemetry_path = cli
        .telemetry
        .then(|| cli.log_dir.join(format!("{}.jsonl", llm_config.exp_name.replace('/', "_"))));

    let agent = BenchmarkAgent::new(server.clone(), llm_config)?;
    let mut runner = BenchmarkRunner::new(agent, bench_config)
        .debug(cli.debug)
        .telemetry_path(telemetry_path);
    let result = runner.run(&rows);

    if let Err(e) = server.stop() {
        tracing::error!("Failed to stop server: {e}");
    }
    result.context("benchmark run failed")?;
    Ok(())
}
