//! Version command implementation

use crate::config::{MANIFEST_FILE, Manifest};
use crate::error::Result;
use crate::workspace::launcher_script::LAUNCHER_FILE;

/// Run version command
pub fn run() -> Result<()> {
    print!("{}", version_text());
    Ok(())
}

/// Version, build and built-in default settings
fn version_text() -> String {
    let defaults = Manifest::default();
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    let tiers: Vec<&str> = defaults.tiers.iter().map(|t| t.name.as_str()).collect();

    format!(
        "envstrap {version}\n\n\
         Build info:\n  \
         Rust version: {rust}\n  \
         Profile: {profile}\n  \
         Platform: {os}-{arch}\n\n\
         Defaults:\n  \
         Manifest: {MANIFEST_FILE}\n  \
         Interpreters: {interpreters}\n  \
         Built-in tiers: {tiers}\n  \
         Launcher: {LAUNCHER_FILE}\n",
        version = env!("CARGO_PKG_VERSION"),
        rust = env!("CARGO_PKG_RUST_VERSION"),
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        interpreters = defaults.interpreters.join(", "),
        tiers = tiers.join(", "),
    )
}
