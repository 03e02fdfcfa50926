//! glimpse CLI: render study voting contracts from a JSON study description.
//!
//! Three commands: `init` scaffolds a study directory, `check` validates a
//! study, `render` splices a study into a contract template.
//!
//! All rendering goes through [`glimpse_core::render`].

mod commands;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use glimpse_core::literal::LiteralPolicy;
use glimpse_core::{FormatOptions, FormatStrategy, PubKeyYSource, RenderOptions, SpliceMode};

#[derive(Parser)]
#[command(
    name = "glimpse",
    about = "Render study voting contracts from a JSON study description",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a study directory with a sample study and contract template
    Init {
        /// Directory to create
        dir: PathBuf,

        /// Contract name (also the template file name)
        #[arg(long, default_value = "StudyVoting")]
        contract_name: String,

        /// Layout the template is prepared for (prompted if omitted on a terminal)
        #[arg(long, value_enum, env = "GLIMPSE_STRATEGY")]
        strategy: Option<StrategyChoice>,
    },

    /// Validate a study and report the generated fragments
    Check {
        /// Path to the study JSON file
        #[arg(long, short, default_value = "study.json")]
        study: PathBuf,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Render a study into a contract template
    Render {
        /// Path to the study JSON file
        #[arg(long, short, default_value = "study.json")]
        study: PathBuf,

        /// Path to the contract template
        #[arg(long, short)]
        template: PathBuf,

        /// Write the contract here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[command(flatten)]
        format: FormatArgs,

        /// Tolerate duplicate markers, using the first START and END
        #[arg(long)]
        legacy_markers: bool,
    },
}

/// Formatting flags shared by `check` and `render`.
#[derive(Args, Clone, Debug)]
struct FormatArgs {
    /// Layout of masking keys and questions
    #[arg(long, value_enum, default_value = "incremental-push", env = "GLIMPSE_STRATEGY")]
    strategy: StrategyChoice,

    /// How study values are checked before embedding
    #[arg(long, value_enum, default_value = "strict", env = "GLIMPSE_LITERALS")]
    literals: LiteralChoice,

    /// Value used for the Y coordinate of each masking key
    #[arg(long, value_enum, default_value = "mirror-x", env = "GLIMPSE_PUB_KEY_Y")]
    pub_key_y: PubKeyYChoice,
}

impl FormatArgs {
    fn to_options(&self) -> FormatOptions {
        FormatOptions {
            strategy: self.strategy.to_strategy(),
            literals: self.literals.to_policy(),
            pub_key_y: self.pub_key_y.to_source(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StrategyChoice {
    IncrementalPush,
    InlineArray,
    Hybrid,
}

impl StrategyChoice {
    pub fn to_strategy(self) -> FormatStrategy {
        match self {
            Self::IncrementalPush => FormatStrategy::IncrementalPush,
            Self::InlineArray => FormatStrategy::InlineArray,
            Self::Hybrid => FormatStrategy::Hybrid,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LiteralChoice {
    Strict,
    Escape,
    Verbatim,
}

impl LiteralChoice {
    pub fn to_policy(self) -> LiteralPolicy {
        match self {
            Self::Strict => LiteralPolicy::Strict,
            Self::Escape => LiteralPolicy::Escape,
            Self::Verbatim => LiteralPolicy::Verbatim,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PubKeyYChoice {
    MirrorX,
    PubKeyY,
}

impl PubKeyYChoice {
    pub fn to_source(self) -> PubKeyYSource {
        match self {
            Self::MirrorX => PubKeyYSource::MirrorX,
            Self::PubKeyY => PubKeyYSource::PubKeyY,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered contracts on stdout stay clean
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init {
            dir,
            contract_name,
            strategy,
        } => {
            commands::init::run(&dir, &contract_name, strategy)?;
        }
        Commands::Check { study, format } => {
            let options = RenderOptions {
                format: format.to_options(),
                ..RenderOptions::default()
            };
            commands::check::run(&study, &options)?;
        }
        Commands::Render {
            study,
            template,
            output,
            format,
            legacy_markers,
        } => {
            let options = RenderOptions {
                format: format.to_options(),
                splice_mode: if legacy_markers {
                    SpliceMode::FirstOccurrence
                } else {
                    SpliceMode::Strict
                },
            };
            commands::render::run(&study, &template, output.as_deref(), &options)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_args_defaults() {
        let cli = Cli::try_parse_from(["glimpse", "render", "--template", "Study.sol"]).unwrap();
        match cli.command {
            Commands::Render {
                study,
                format,
                legacy_markers,
                output,
                ..
            } => {
                assert_eq!(study, PathBuf::from("study.json"));
                assert!(output.is_none());
                assert!(!legacy_markers);
                assert_eq!(format.to_options(), FormatOptions::default());
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_render_args_overrides() {
        let cli = Cli::try_parse_from([
            "glimpse",
            "render",
            "-t",
            "Study.sol",
            "--strategy",
            "inline-array",
            "--literals",
            "escape",
            "--pub-key-y",
            "pub-key-y",
        ])
        .unwrap();
        let Commands::Render { format, .. } = cli.command else {
            panic!("expected render");
        };
        let options = format.to_options();
        assert_eq!(options.strategy, FormatStrategy::InlineArray);
        assert_eq!(options.literals, LiteralPolicy::Escape);
        assert_eq!(options.pub_key_y, PubKeyYSource::PubKeyY);
    }
}
