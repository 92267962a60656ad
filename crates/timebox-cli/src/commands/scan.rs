use clap::Args;
use timebox_core::{scan_hierarchy, Config, HierarchyStatus, Millis, MAX_DEPTH_MESSAGE};

use super::{format_instant, load_table, now_millis, print_json, root_item, TreeArgs};

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub tree: TreeArgs,
    /// Instant to evaluate at (defaults to now)
    #[arg(long, value_parser = super::instant_arg, allow_hyphen_values = true)]
    pub at: Option<Millis>,
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ScanArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let items = load_table(&args.tree.items)?;
    let root = root_item(&items, &args.tree.root)?;
    let now = args.at.unwrap_or_else(now_millis);

    let status = scan_hierarchy(root, &items, now, args.tree.start, config.depth_guard());

    if args.json {
        return print_json(&serde_json::json!({
            "root_id": root.id(),
            "at": now,
            "status": status,
        }));
    }

    println!("{} ({})", root.name(), root.id());
    print_status(&status);
    Ok(())
}

fn print_status(status: &HierarchyStatus<'_>) {
    println!(
        "  progress: {}/{} ({:.0}%)",
        status.completed_children,
        status.total_children,
        status.progress() * 100.0
    );
    match &status.active_basic_descendant {
        Some(leaf) => println!(
            "  running: {} ({}) since {}, {}ms left",
            leaf.item.name(),
            leaf.item.id(),
            format_instant(leaf.absolute_start_time),
            leaf.time_remaining
        ),
        None => println!("  running: nothing"),
    }
    if let Some(next) = &status.next_basic_descendant {
        println!(
            "  next: {} ({}) at {} in {}ms",
            next.item.name(),
            next.item.id(),
            format_instant(next.absolute_start_time),
            next.time_until_start
        );
    }
    if status.depth_limit_reached {
        println!("  {MAX_DEPTH_MESSAGE}");
    }
}
