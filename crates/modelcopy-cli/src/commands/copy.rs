//! Copy command

use std::path::PathBuf;

use clap::Args;
use modelcopy_core::copy::PublishedValuePolicy;
use modelcopy_engine::{apply_engine_command, EngineCommand};
use uuid::Uuid;

use crate::config;
use crate::io::{self, RecordingSession};

#[derive(Debug, Args)]
pub struct CopyArgs {
    /// Snapshot JSON file to read
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Element definition to copy
    #[arg(long)]
    pub source: Uuid,

    /// Also copy the usages nested in the definition
    #[arg(long)]
    pub include_usages: bool,

    /// Reset published values of the cloned value sets
    #[arg(long)]
    pub reset_published: bool,

    /// Suffix for the copied definition's name
    #[arg(long, conflicts_with = "keep_name")]
    pub name_suffix: Option<String>,

    /// Keep the copied definition's name unchanged
    #[arg(long)]
    pub keep_name: bool,

    /// TOML file with copy options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the resulting snapshot here
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub async fn execute(args: CopyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = config::load_copy_options(args.config.as_deref())?;
    if args.include_usages {
        options.include_usages = true;
    }
    if args.reset_published {
        options.published_values = PublishedValuePolicy::Reset;
    }
    if let Some(suffix) = args.name_suffix {
        options.name_suffix = Some(suffix);
    }
    if args.keep_name {
        options.name_suffix = None;
    }

    let snapshot = io::read_snapshot(&args.snapshot)?;
    let session = RecordingSession::new(snapshot.clone());

    let cmd = EngineCommand::CopyElementDefinition {
        source: Some(args.source),
        options,
    };
    apply_engine_command(cmd, &snapshot, &session, None).await?;

    io::report(&session, args.out.as_deref())
}
