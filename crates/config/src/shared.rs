// Process-wide settings
//
// One document per process, installed at startup. Racing initializers
// converge on a single instance; a failed initializer leaves the slot empty
// so a later call can try again.

use once_cell::sync::OnceCell;

use crate::error::Result;
use crate::settings::SettingsDocument;

static SETTINGS: OnceCell<SettingsDocument> = OnceCell::new();

/// Install the shared settings, or return the ones already installed.
/// `init` runs at most once per successful installation.
pub fn init_with<F>(init: F) -> Result<&'static SettingsDocument>
where
    F: FnOnce() -> Result<SettingsDocument>,
{
    SETTINGS.get_or_try_init(|| {
        let settings = init()?;
        log::info!(
            "Settings installed: {} {} (build {})",
            settings.app_name(),
            settings.version(),
            settings.build()
        );
        Ok(settings)
    })
}

/// Install the user settings file, or the bundled definition
pub fn init_default() -> Result<&'static SettingsDocument> {
    init_with(SettingsDocument::load_default)
}

pub fn get() -> Option<&'static SettingsDocument> {
    SETTINGS.get()
}
