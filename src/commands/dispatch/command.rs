//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use seernav_core::config::NavigatorConfig;
use seernav_core::error::Result;
use seernav_core::tree::ResultTree;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// Open the sessions root and load the configuration that applies to it
    pub fn open_tree(&self) -> Result<(ResultTree, NavigatorConfig)> {
        let tree = ResultTree::open(self.root)?;
        let config = NavigatorConfig::load(tree.root())?;
        Ok((tree, config))
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("seernav {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Browse SEER session, task and step results.");
        println!();
        println!("Run `seernav --help` for usage information.");
        Ok(())
    }
}
