//! Mapping from CLI subcommands to list views

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::view;
use seernav_core::error::Result;
use seernav_core::view::ViewKind;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let (kind, args) = match self {
            Commands::Sessions(args) => (ViewKind::Sessions, args),
            Commands::Session { session, view } => (
                ViewKind::Session {
                    session: session.clone(),
                },
                view,
            ),
            Commands::Task {
                session,
                task,
                view,
            } => (
                ViewKind::Task {
                    session: session.clone(),
                    task: task.clone(),
                },
                view,
            ),
            Commands::Tasks(args) => (ViewKind::Tasks, args),
            Commands::TaskSessions { task, view } => {
                (ViewKind::TaskSessions { task: task.clone() }, view)
            }
        };
        view::execute(ctx, kind, args)
    }
}
