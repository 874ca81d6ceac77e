use clap::Args;

use bricklayer_core::smoke::{self, SmokeOutput};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct SmokeArgs {}

/// The table existence and non-emptiness validator. Reads everything from
/// the environment; exit 0 only when the table exists with at least one row.
pub fn run(_args: SmokeArgs, _global: &GlobalArgs) -> CmdResult<SmokeOutput> {
    smoke::run()
}
