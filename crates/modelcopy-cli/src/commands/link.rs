//! Usage link command

use std::path::PathBuf;

use clap::Args;
use modelcopy_core::model::{ClassKind, EntityRef};
use modelcopy_engine::{apply_engine_command, EngineCommand};
use uuid::Uuid;

use crate::io::{self, RecordingSession};

#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Snapshot JSON file to read
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Element definition that will contain the usage
    #[arg(long)]
    pub container: Uuid,

    /// Element definition being used
    #[arg(long)]
    pub target: Uuid,

    /// Domain of expertise owning the usage
    #[arg(long)]
    pub owner: Uuid,

    /// Write the resulting snapshot here
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub async fn execute(args: LinkArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = io::read_snapshot(&args.snapshot)?;
    let session = RecordingSession::new(snapshot.clone());

    let cmd = EngineCommand::CreateElementUsage {
        container: Some(args.container),
        target: Some(args.target),
        owner: Some(EntityRef::new(args.owner, ClassKind::DomainOfExpertise)),
    };
    apply_engine_command(cmd, &snapshot, &session, None).await?;

    io::report(&session, args.out.as_deref())
}
