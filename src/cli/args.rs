//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file instead of the default locations
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::template::MissingPolicy;
use crate::exif::OverwritePolicy;

/// folio - Page names, archive paths and metadata argfiles for scanned book series
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect configured book series
    #[command(name = "series")]
    Series {
        #[command(subcommand)]
        action: SeriesAction,
    },

    /// Resolve a series template for a (possibly partial) page identity
    #[command(
        name = "resolve",
        long_about = "Resolve a series' filename template for a page identity.\n\n\
            Give one number per specificity axis, in axis order. Use `_` for an \
            unknown position. What happens to fragments that cannot be resolved \
            depends on --policy: `glob` renders them as `*` (the default, handy for \
            searching), `absent` prints nothing and fails, `fail` reports which \
            fragment is missing.",
        after_help = "\
EXAMPLES:
    # Full name for page 7 of the journal
    folio resolve journal 7 --prop title=draft --policy fail

    # Search pattern for every subpage of plate 12
    folio resolve atlas 3 12 _ --pattern

    # Cut the name after the plate axis
    folio resolve atlas 3 12 2 --limit plate"
    )]
    Resolve {
        /// Series name
        series: String,

        /// Page numbers in axis order (`_` for unknown)
        #[arg(value_name = "NUM")]
        numbers: Vec<String>,

        /// Page property, e.g. `title=draft` (repeatable)
        #[arg(long = "prop", value_name = "KEY=VALUE")]
        props: Vec<String>,

        /// What to do with unresolvable fragments: fail, absent, glob
        #[arg(long, default_value_t = MissingPolicy::Glob)]
        policy: MissingPolicy,

        /// Treat axes after this one as unknown
        #[arg(long, value_name = "AXIS")]
        limit: Option<String>,

        /// Print an archive search pattern (root, folder and any extension)
        #[arg(long, conflicts_with = "policy")]
        pattern: bool,
    },

    /// Show the genre of a tag set
    #[command(name = "genre")]
    Genre {
        /// Tags
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Expand a tag set into keywords, social tags and a filename fragment
    #[command(name = "manifest")]
    Manifest {
        /// Tags
        #[arg(required = true)]
        tags: Vec<String>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Compose the archive path for a scanned file
    #[command(
        name = "compose",
        after_help = "\
EXAMPLES:
    # Where does this scan go?
    folio compose journal IMG_0001.jpg 7 --title draft

    # Series whose template uses the tag fragment
    folio compose herbarium scan.tif 12 --title pressed --tag oak"
    )]
    Compose {
        /// Series name
        series: String,

        /// The scanned file (its extension is kept)
        original: PathBuf,

        /// Page numbers in axis order
        #[arg(value_name = "NUM")]
        numbers: Vec<String>,

        /// Page title
        #[arg(long)]
        title: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Page property, e.g. `year=1998` (repeatable)
        #[arg(long = "prop", value_name = "KEY=VALUE")]
        props: Vec<String>,
    },

    /// Append a metadata record to an argument file for the tagging tool
    #[command(
        name = "argfile",
        long_about = "Append one metadata record to an argument file.\n\n\
            The file is created if needed and never truncated, so records for \
            many pages can be collected and applied in a single run of the \
            tagging tool (`exiftool -@ FILE`).\n\n\
            Tags are expanded into metadata keywords through the taxonomy unless \
            --raw is given. With --series, the record targets the composed \
            archive path of ORIGINAL instead of TARGET.",
        after_help = "\
EXAMPLES:
    # Tag a file directly
    folio argfile --out batch.args photo.jpg --title 'Oak leaf' --tag oak

    # Target the composed archive path
    folio argfile --out batch.args --series herbarium --number 12 \\
        scan.tif --title pressed --tag oak --overwrite original"
    )]
    Argfile {
        /// Argument file to append to
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// File the record applies to (the original scan with --series)
        target: PathBuf,

        /// Title
        #[arg(long, default_value = "")]
        title: String,

        /// Comment
        #[arg(long, default_value = "")]
        comment: String,

        /// Tag (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Write tags verbatim instead of manifested keywords
        #[arg(long)]
        raw: bool,

        /// Overwrite behaviour: none, original, in-place
        #[arg(long, default_value_t = OverwritePolicy::None)]
        overwrite: OverwritePolicy,

        /// Compose the target path for this series
        #[arg(long)]
        series: Option<String>,

        /// Page number in axis order (repeatable, with --series)
        #[arg(long = "number", value_name = "NUM", requires = "series")]
        numbers: Vec<String>,
    },

    /// Inspect or create the configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    folio completion bash > ~/.local/share/bash-completion/completions/folio

    # Zsh
    folio completion zsh > ~/.zfunc/_folio

    # Fish
    folio completion fish > ~/.config/fish/completions/folio.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Series subcommands.
#[derive(Subcommand, Debug)]
pub enum SeriesAction {
    /// List configured series
    List,

    /// Show a series' axes and template
    Show {
        /// Series name
        name: String,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the path of the loaded config file
    Path,

    /// Validate the configuration and print any warnings
    Check,

    /// Write a starter config file
    Init {
        /// Where to write it (default: ~/.folio/config.toml)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

/// Supported shells for completion generation.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
