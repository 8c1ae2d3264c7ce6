// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to Layer 2. Nothing here
// touches the model or the form rules directly.

pub mod commands;

use std::{path::Path, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use commands::{Commands, InspectArgs, PredictArgs};

use crate::application::predict_use_case::{load_form, Outcome, PredictUseCase};
use crate::application::serve_use_case::ServeUseCase;
use crate::domain::prediction::Verdict;
use crate::domain::schema::FeatureEncoding;
use crate::infra::model_store::ModelStore;

#[derive(Parser, Debug)]
#[command(
    name = "attrition-form",
    version,
    about = "Predict whether an employee is likely to resign or stay."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve(args)   => ServeUseCase::new(args.into()).execute(),
            Commands::Predict(args) => run_predict(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let form = load_form(Path::new(&args.input))?;

    let classifier = ModelStore::new(&args.model_dir)
        .load()
        .with_context(|| format!("Cannot load model from '{}'", args.model_dir))?;
    let use_case = PredictUseCase::new(Arc::new(classifier));

    match use_case.evaluate(&form)? {
        Outcome::Incomplete(e) => {
            let missing: Vec<_> = e.missing().iter().map(ToString::to_string).collect();
            println!("{e}");
            println!("Missing: {}", missing.join(", "));
            bail!("form is incomplete");
        }
        Outcome::Predicted(result) => {
            let icon = match result.verdict {
                Verdict::Resign => "⚠️",
                Verdict::Stay   => "✅",
            };
            println!("{icon} Employee is likely to {}", result.verdict);
            println!(
                "P(resign) = {:.4}  (threshold {})",
                result.probability,
                use_case.threshold()
            );
        }
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let store      = ModelStore::new(&args.model_dir);
    let classifier = store
        .load()
        .with_context(|| format!("Cannot load model from '{}'", args.model_dir))?;
    let schema = classifier.schema();

    println!("Model directory : {}", store.dir().display());
    println!("Schema version  : {}", schema.schema_version);
    println!("Threshold       : {}", schema.decision_threshold);
    println!("Hidden size     : {}", schema.hidden_size);
    println!("Input width     : {}", schema.input_width());
    println!("Features ({}):", schema.features.len());
    for feature in &schema.features {
        match &feature.encoding {
            FeatureEncoding::Numeric { mean, std } => {
                println!("  {:<28} numeric      mean={mean:.3} std={std:.3}", feature.name)
            }
            FeatureEncoding::Categorical { categories } => {
                println!("  {:<28} categorical  [{}]", feature.name, categories.join(", "))
            }
        }
    }
    Ok(())
}
