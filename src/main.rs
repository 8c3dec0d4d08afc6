// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;

mod cli;
use cli::run::{run_build, run_inspect, run_query, run_verify, BuildArgs};
use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Build {
            input,
            output,
            mode,
            threshold,
            truncate,
            config,
            no_reserve,
            sort,
        } => run_build(BuildArgs {
            input,
            output,
            mode,
            threshold,
            truncate,
            config,
            no_reserve,
            sort,
        }),
        Commands::Query {
            index,
            queries,
            file,
            json,
            limit,
        } => run_query(&index, queries, file.as_deref(), json, limit),
        Commands::Inspect { index } => run_inspect(&index),
        Commands::Verify { index, file } => match run_verify(&index, &file) {
            Ok(true) => Ok(()),
            Ok(false) => {
                eprintln!("❌ index disagrees with a linear scan");
                std::process::exit(1);
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = outcome {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
