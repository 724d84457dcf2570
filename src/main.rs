//! cfn-tool: CloudFormation deployment front end
//!
//! Entry point for the cfn-tool application.

use cfn_tool::config::{Catalog, Resolution, Resolver};
use cfn_tool::env::EnvStore;
use cfn_tool::shell::BashExecutor;
use std::process::ExitCode;

mod app;

use app::{exit_code, exit_message, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let log_level = setup_tracing();

    let argv: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let resolver = Resolver::new(
        Catalog::standard(),
        argv,
        EnvStore::from_process(),
        BashExecutor::new(),
    );

    match resolver.run_with(|options| log_level.set(options.log_level())) {
        Ok(Resolution::Resolved { options, env }) => {
            tracing::info!(
                "Resolved options for {} ({} environment variables)",
                options.template,
                env.len()
            );
            exit_code::SUCCESS
        }
        Ok(Resolution::Exit(request)) => {
            println!("{}", exit_message(request));
            exit_code::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            exit_code::FAILURE
        }
    }
}
