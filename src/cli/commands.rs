// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   serve   — run the HTML form server
//   predict — score one form read from a JSON file
//   inspect — load a model directory and describe it

use clap::{Args, Subcommand};

use crate::application::serve_use_case::ServeConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the attrition form over HTTP
    Serve(ServeArgs),

    /// Predict attrition for a form saved as JSON
    Predict(PredictArgs),

    /// Validate a model directory and print its schema
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Directory holding model_schema.json and model.mpk
    #[arg(long, default_value = "models")]
    pub model_dir: String,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 8501)]
    pub port: u16,

    /// Number of HTTP worker threads
    #[arg(long, default_value_t = 2)]
    pub workers: usize,
}

/// The application layer never sees clap types.
impl From<ServeArgs> for ServeConfig {
    fn from(a: ServeArgs) -> Self {
        ServeConfig {
            model_dir: a.model_dir,
            host:      a.host,
            port:      a.port,
            workers:   a.workers,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// JSON object of form keys to values, e.g. {"age": 30, "gender": "Male"}
    #[arg(long)]
    pub input: String,

    #[arg(long, default_value = "models")]
    pub model_dir: String,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[arg(long, default_value = "models")]
    pub model_dir: String,
}
