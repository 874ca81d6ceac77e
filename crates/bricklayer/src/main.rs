use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;

use commands::{generate, init, smoke};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "bricklayer")]
#[command(version = VERSION)]
#[command(about = "CI/CD artifact generator and post-deploy smoke check for analytics pipelines")]
struct Cli {
    /// Dry-run: show what would happen without writing.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the pipeline artifacts from a spec
    Generate(generate::GenerateArgs),
    /// Validate that the deployed table exists and has rows
    Smoke(smoke::SmokeArgs),
    /// Write a starter pipeline spec
    Init(init::InitArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        dry_run: cli.dry_run,
    };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    bricklayer_core::output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_clamp_to_u8_range() {
        assert_eq!(exit_code_to_u8(-1), 0);
        assert_eq!(exit_code_to_u8(0), 0);
        assert_eq!(exit_code_to_u8(1), 1);
        assert_eq!(exit_code_to_u8(300), 255);
    }
}
