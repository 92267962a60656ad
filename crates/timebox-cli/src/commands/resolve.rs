use clap::Args;
use timebox_core::{format_countdown, resolve_execution_state, ExecutionState, Millis};

use super::{format_instant, load_table, now_millis, print_json, root_item, TreeArgs};

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub tree: TreeArgs,
    /// Instant to evaluate at (defaults to now)
    #[arg(long, value_parser = super::instant_arg, allow_hyphen_values = true)]
    pub at: Option<Millis>,
    /// Print the state as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let items = load_table(&args.tree.items)?;
    let root = root_item(&items, &args.tree.root)?;
    let now = args.at.unwrap_or_else(now_millis);

    let state = resolve_execution_state(root, &items, now, args.tree.start);
    let countdown = format_countdown(state.next_child.as_ref(), state.current_phase);

    if args.json {
        return print_json(&serde_json::json!({
            "root_id": root.id(),
            "at": now,
            "state": state,
            "countdown": countdown,
        }));
    }

    println!("{} ({})", root.name(), root.id());
    print_state(&state);
    println!("{countdown}");
    Ok(())
}

fn print_state(state: &ExecutionState<'_>) {
    println!("  phase: {}", state.current_phase);
    if let Some(active) = state.active_child {
        match state.active_child_index {
            Some(index) => println!("  active: {} ({}) #{index}", active.name(), active.id()),
            None => println!("  active: {} ({})", active.name(), active.id()),
        }
    }
    if let Some(remaining) = state.active_child_remaining {
        println!("  active remaining: {remaining}ms");
    }
    if let Some(next) = &state.next_child {
        println!(
            "  next: {} ({}) at {} in {}ms",
            next.item.name(),
            next.item.id(),
            format_instant(next.absolute_start_time),
            next.time_until_start
        );
    }
    if let Some(remaining) = state.time_remaining {
        println!("  container remaining: {remaining}ms");
    }
}
