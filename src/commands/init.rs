use crate::args::InitArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its `.secrets` subdirectory and an initial `config.json` that
/// points at the backend.
///
/// # Arguments
/// - `hfin_home` - The directory that will be the root of data directory, e.g. `$HOME/hfin`
/// - `args` - The backend's base URL and optional session and paging preferences.
///
/// # Errors
/// - Returns an error if the URL is not http(s) or if any file operations fail.
pub async fn init(hfin_home: &Path, args: InitArgs) -> Result<Out<()>> {
    let mut config = Config::create(hfin_home, args.base_url())
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    config
        .set_preferences(args.session_days(), args.page_size())
        .await
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the hfin directory and config at {}",
        config.root().display()
    )
    .into())
}
