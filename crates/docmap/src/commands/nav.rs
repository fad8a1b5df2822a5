//! `docmap nav` command implementation.

use clap::Args;

use super::{SiteArgs, warm_up};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl NavArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.site.load_config(None)?;
        let state = warm_up(&config)?;

        Output::new().data(&serde_json::to_string_pretty(state.navigation())?)?;
        Ok(())
    }
}
