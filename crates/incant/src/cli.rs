//! CLI definition for incant

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "incant")]
#[command(about = "Describe the task in English, get the shell incantation back")]
#[command(version)]
#[command(after_help = "\
EXAMPLES:
    incant list files modified in the last hour
    incant \"compress every log file in this directory\"
    incant --run count lines in all rust files
    incant --no-cache --debug find the largest files on disk

SOURCES (tried in order):
    cache        previously confirmed answers in the local example store
    community    community answer service, when enough candidates agree
    model        few-shot LLM completion built from the example store

CONFIRMATION:
    A resolved command is printed and must be confirmed before it is
    remembered, copied, or run. Declining is not an error.

ENVIRONMENT:
    HUGGING_FACE_API_KEY    Authorization header value for the model service
    RUST_LOG                Log filter override (default: warn)")]
pub struct Cli {
    /// English description of the task
    #[arg(trailing_var_arg = true, required = true)]
    pub search: Vec<String>,

    /// Skip the local example cache
    #[arg(long)]
    pub no_cache: bool,

    /// Skip the community answer service
    #[arg(long)]
    pub no_community: bool,

    /// Skip the model fallback
    #[arg(long)]
    pub no_model: bool,

    /// Do not copy the confirmed command to the clipboard
    #[arg(long)]
    pub no_clipboard: bool,

    /// Run the confirmed command
    #[arg(long)]
    pub run: bool,

    /// Echo the query context and raw service traffic
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// The search words joined into one query string
    pub fn query(&self) -> String {
        self.search.join(" ")
    }
}
