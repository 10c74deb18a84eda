/// Command-line configuration.
#[derive(Debug, clap::Parser)]
#[command(name = "fred", version, about = "A small modal editor built on a piece table")]
pub struct Config {
    /// File to edit. It must already exist.
    #[arg(value_name = "PATH")]
    pub path: std::path::PathBuf,

    /// Write logs to this file. Without it nothing is logged, since the
    /// terminal belongs to the editor.
    #[arg(long, value_name = "FILE", env = "FRED_LOG_FILE")]
    pub log_file: Option<std::path::PathBuf>,
}
