//! Init command: working directories and a starter manifest

use crate::commands::GlobalOptions;
use crate::config::MANIFEST_FILE;
use crate::error::Result;

/// Run init command
pub fn run(globals: &GlobalOptions) -> Result<()> {
    let workspace = globals.open_workspace()?;

    let created = workspace.ensure_directories()?;
    let wrote_manifest = workspace.manifest.write_if_absent(&workspace.root)?;

    if globals.quiet {
        return Ok(());
    }
    for dir in &created {
        println!("Created {}", dir.display());
    }
    if wrote_manifest {
        println!("Wrote {}", workspace.root.join(MANIFEST_FILE).display());
    } else {
        println!("{MANIFEST_FILE} already exists, left unchanged");
    }
    Ok(())
}
