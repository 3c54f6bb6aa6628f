use anyhow::Result;

use super::args::{Cli, Commands};
use super::context::ExecutionContext;
use super::handlers;
use super::logging;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    match cli.command {
        Commands::Table { table, format } => {
            let ctx = ExecutionContext::load(cli.config.as_deref())?;
            handlers::table::handle(&ctx, &table, format)
        }

        Commands::Tui { table } => {
            let ctx = ExecutionContext::load(cli.config.as_deref())?;
            handlers::tui::handle(&ctx, &table)
        }

        Commands::Columns { format } => handlers::columns::handle(format),
    }
}
