//! Init command implementation.

use crate::app::RuntimeConfig;
use crate::app::commands::init;
use crate::domain::AppError;

pub fn run_init(config: &RuntimeConfig) -> Result<(), AppError> {
    println!("Initializing ngcli configuration");

    let outcome = init::execute(config)?;

    for name in &outcome.installed {
        println!("  Created template: {}", name);
    }
    for name in &outcome.skipped {
        println!("  Kept existing template: {}", name);
    }
    if let Some(path) = &outcome.settings_written {
        println!("  Created settings file: {}", path.display());
    }

    if !outcome.permission_warnings.is_empty() {
        for warning in &outcome.permission_warnings {
            println!("⚠️  Warning: {}", warning);
        }
        println!("Administrative privileges may be required for nginx configuration operations");
    }

    println!("✅ ngcli initialization completed successfully");
    println!("Template directory: {}", outcome.template_dir.display());
    println!("Use 'ngcli generate' to create nginx configurations");
    Ok(())
}
