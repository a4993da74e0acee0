mod commands;
mod terminal;

use commands::{CommandLine, Commands, check};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    match commands.command {
        Commands::Check(args) => {
            let cfg = args.to_config();
            logging::init_logging(&cfg)?;
            check::check(args, cfg).await
        }
    }
}
