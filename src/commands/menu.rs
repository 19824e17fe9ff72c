//! Interactive prompts

use std::fmt;

use inquire::Select;

use crate::environment::EnvironmentMode;
use crate::error::{EnvstrapError, Result};

struct ModeChoice(EnvironmentMode);

impl fmt::Display for ModeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<9} {}", self.0, self.0.description())
    }
}

/// Ask the operator where packages should be installed
pub fn select_mode() -> Result<EnvironmentMode> {
    let choices: Vec<ModeChoice> = EnvironmentMode::ALL.into_iter().map(ModeChoice).collect();

    let Some(choice) = Select::new("Where should dependencies be installed?", choices)
        .with_starting_cursor(0)
        .without_filtering()
        .with_help_message("↑↓ to move, ENTER to select, ESC to cancel")
        .prompt_skippable()?
    else {
        return Err(EnvstrapError::PromptFailed {
            message: "installation cancelled".to_string(),
        });
    };

    Ok(choice.0)
}
