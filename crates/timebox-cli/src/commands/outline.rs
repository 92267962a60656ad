use clap::Args;
use timebox_core::{build_outline, Config, Millis};

use super::{load_table, now_millis, print_json, root_item, TreeArgs};

#[derive(Args)]
pub struct OutlineArgs {
    #[command(flatten)]
    pub tree: TreeArgs,
    /// Instant to evaluate at (defaults to now)
    #[arg(long, value_parser = super::instant_arg, allow_hyphen_values = true)]
    pub at: Option<Millis>,
    /// Print the tree as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: OutlineArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let items = load_table(&args.tree.items)?;
    let root = root_item(&items, &args.tree.root)?;
    let now = args.at.unwrap_or_else(now_millis);

    let outline = build_outline(root, &items, now, args.tree.start, config.depth_guard());
    if args.json {
        return print_json(&outline);
    }
    print!("{}", outline.render());
    Ok(())
}
