use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    envstrap completions bash > ~/.bash_completion.d/envstrap\n\n\
                  Generate zsh completions:\n    envstrap completions zsh > ~/.zfunc/_envstrap\n\n\
                  Generate fish completions:\n    envstrap completions fish > ~/.config/fish/completions/envstrap.fish")]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
