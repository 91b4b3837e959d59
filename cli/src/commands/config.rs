//! `collector-installer config`: show the resolved configuration.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn run(app: &AppContext) -> Result<()> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path();
    app.renderer().render_config(&config, path.as_deref())
}
