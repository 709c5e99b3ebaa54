use crate::output::{Affixes, LineFormat};
use clap::Parser;
use std::path::PathBuf;

/// List the git repositories behind `go list -mod=readonly -m all` by
/// crawling each module path for its go-import meta tag
#[derive(Parser, Debug)]
#[command(name = "goimportgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Be more quiet: no diagnostics on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log lookup URLs and responses to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Change to <DIRECTORY> before running go list
    #[arg(short = 'C', value_name = "DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Print the module name after the repository URL
    #[arg(short = 'n')]
    pub print_name: bool,

    /// Print an internalized module name instead of the actual name
    #[arg(short = 'z')]
    pub internalize: bool,

    /// Prefix for the internalized module name
    #[arg(short = 'p', value_name = "PREFIX", default_value = "")]
    pub prefix: String,

    /// Suffix for the internalized module name
    #[arg(short = 's', value_name = "SUFFIX", default_value = "")]
    pub suffix: String,

    /// More human readable output (URL => NAME)
    #[arg(short = 'r')]
    pub readable: bool,

    /// Print results as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Read the module list from stdin instead of running go list
    #[arg(long, conflicts_with = "directory")]
    pub stdin: bool,
}

impl Cli {
    /// Text-mode line format selected by the flags
    pub fn line_format(&self) -> LineFormat {
        LineFormat {
            with_name: self.print_name,
            readable: self.readable,
            internalize: self.internalize.then(|| Affixes {
                prefix: self.prefix.clone(),
                suffix: self.suffix.clone(),
            }),
        }
    }

    /// Default log filter when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "off"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
