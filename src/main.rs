use anyhow::Context;
use clap::Parser;
use linesample::cli::Cli;
use linesample::config::Config;
use linesample::core::SampleReport;
use linesample::runner;
use std::io::{BufWriter, Write};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 加载配置
    let env = match Config::from_env() {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    // 初始化日志，标准输出只留给样本
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level(&env))
        .init();

    let config = match cli.sampler_config(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try 'sample --help' for usage.");
            return ExitCode::from(e.exit_code() as u8);
        }
    };
    info!("Configuration: {:?}", config);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match runner::run_to_writer(&config, &cli.file, &mut out) {
        Ok(report) => {
            if cli.report {
                if let Err(e) = print_report(&report) {
                    error!("{:#}", e);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn print_report(report: &SampleReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("serializing run report")?;
    let mut stderr = std::io::stderr().lock();
    writeln!(stderr, "{}", json).context("writing run report")?;
    Ok(())
}
