use clap::{CommandFactory, Parser};
use pokedex_update::cli::CliArgs;
use pokedex_update::core::processor;
use pokedex_update::error::{AppError, AppResult};
use pokedex_update::logging::{log, setup_logging, LogLevel};
use pokedex_update::testing;
use std::process::ExitCode;
use tokio::runtime::Builder;

fn main() -> ExitCode {
    setup_logging();

    let cli_args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    let cfg = match cli_args.to_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            log(LogLevel::Error, &e.to_string());
            let _ = CliArgs::command().print_help();
            return ExitCode::from(2);
        }
    };

    let runtime = match Builder::new_multi_thread()
        .enable_all()
        .thread_name("dex-worker")
        .worker_threads(num_cpus::get().min(cfg.concurrency.max(2)))
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log(
                LogLevel::Error,
                &format!("FATAL: Failed to build Tokio runtime: {}", e),
            );
            return ExitCode::FAILURE;
        }
    };

    let main_result: AppResult<i32> = runtime.block_on(async {
        if let Some((pokemon_path, species_path)) = cli_args.get_test_files() {
            let output_path = cli_args.get_test_output_file();
            match testing::test_record_transform(&pokemon_path, &species_path, output_path, &cfg)
                .await
            {
                Ok(_) => Ok(0),
                Err(AppError::Argument(msg)) => Err(AppError::Argument(msg)),
                Err(e) => {
                    log(LogLevel::Error, &format!("Test mode failed: {:?}", e));
                    Ok(1)
                }
            }
        } else {
            processor::run(cfg.clone()).await
        }
    });

    match main_result {
        Ok(exit_code) => ExitCode::from(exit_code as u8),
        Err(AppError::Argument(msg)) => {
            log(LogLevel::Error, &msg);
            ExitCode::from(2)
        }
        Err(e) => {
            log(LogLevel::Error, &format!("FATAL: {}", e));
            ExitCode::FAILURE
        }
    }
}
