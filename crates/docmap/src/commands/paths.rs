//! `docmap paths` command implementation.

use clap::Args;

use super::{SiteArgs, warm_up};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the paths command.
#[derive(Args)]
pub(crate) struct PathsArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl PathsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.site.load_config(None)?;
        let state = warm_up(&config)?;

        let segments: Vec<Vec<String>> = state
            .static_paths()
            .into_iter()
            .map(|path| path.segments)
            .collect();

        Output::new().data(&serde_json::to_string_pretty(&segments)?)?;
        Ok(())
    }
}
