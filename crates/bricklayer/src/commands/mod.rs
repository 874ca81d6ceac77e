pub type CmdResult<T> = bricklayer_core::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub(crate) dry_run: bool,
}

pub mod generate;
pub mod init;
pub mod smoke;

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (
    bricklayer_core::Result<bricklayer_core::output::CmdSuccess>,
    i32,
) {
    match command {
        crate::Commands::Generate(args) => {
            bricklayer_core::output::map_cmd_result_to_json(generate::run(args, global))
        }
        crate::Commands::Smoke(args) => bricklayer_core::output::map_cmd_result_to_json(
            smoke::run(args, global).map(|(data, exit_code)| (data, vec![], exit_code)),
        ),
        crate::Commands::Init(args) => bricklayer_core::output::map_cmd_result_to_json(
            init::run(args, global).map(|(data, exit_code)| (data, vec![], exit_code)),
        ),
    }
}
