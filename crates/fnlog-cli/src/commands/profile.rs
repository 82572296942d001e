//! Host logging profile commands.

use std::io;

use anyhow::{Context, Result};

use fnlog_cli::output::{print_json, write_profile_table, OutputFormat};
use fnlog_lib::HostProfile;

/// Print one profile as `host.json`, or as app settings.
pub fn handle_profile(name: &str, app_settings: bool, format: OutputFormat) -> Result<()> {
    let profile: HostProfile = name.parse()?;
    let config = profile.host_config();

    if app_settings {
        let settings = config
            .app_settings()
            .with_context(|| format!("failed to flatten profile '{}'", profile))?;
        print_json(&settings, format)
    } else {
        print_json(&config, format)
    }
}

pub fn handle_list_profiles() -> Result<()> {
    write_profile_table(&mut io::stdout().lock())?;
    Ok(())
}
