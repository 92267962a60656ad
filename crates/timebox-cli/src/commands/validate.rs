use clap::Args;
use std::path::PathBuf;
use timebox_core::{Snapshot, ValidationError};

#[derive(Args)]
pub struct ValidateArgs {
    /// JSON snapshot holding the item tree
    #[arg(long)]
    pub items: PathBuf,
}

pub fn run(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = Snapshot::load(&args.items)?;
    if let Some(id) = snapshot.duplicate_ids().first() {
        return Err(ValidationError::DuplicateId(id.to_string()).into());
    }

    let table = snapshot.into_table();
    table.validate()?;

    let dangling = table.dangling_references();
    for (container, missing) in &dangling {
        println!("dangling: {container} -> {missing}");
    }
    println!(
        "ok: {} items, {} dangling references",
        table.len(),
        dangling.len()
    );
    Ok(())
}
