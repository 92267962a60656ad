use clap::Args;
use log::info;
use std::time::Duration;
use timebox_core::{build_outline, Config, ExecutionMonitor, ExecutionPhase, MonitorEvent};

use super::{format_instant, load_table, now_millis, TreeArgs};

#[derive(Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub tree: TreeArgs,
    /// Stop after this many ticks (default: run until the root completes)
    #[arg(long)]
    pub ticks: Option<u64>,
    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: WatchArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let items = load_table(&args.tree.items)?;
    let mut monitor =
        ExecutionMonitor::new(items, args.tree.root, args.tree.start, config.depth_guard())?;
    let interval = Duration::from_millis(config.display.tick_interval_ms);

    info!(
        "event=watch_start module=cli root_id={} start={} interval_ms={}",
        monitor.root_id(),
        monitor.root_start(),
        config.display.tick_interval_ms
    );

    let mut ticks = 0u64;
    loop {
        let now = now_millis();
        let events = monitor.tick(now);
        ticks += 1;

        let leaf_started = events
            .iter()
            .any(|e| matches!(e, MonitorEvent::LeafStarted { .. }));
        for event in &events {
            if args.json {
                println!("{}", serde_json::to_string(event)?);
            } else {
                println!("{}", describe(event));
            }
        }

        let snapshot = monitor.snapshot(now);
        if !args.json {
            if leaf_started && config.display.show_outline {
                if let Some(root) = monitor.items().get(monitor.root_id()) {
                    let outline = build_outline(
                        root,
                        monitor.items(),
                        now,
                        monitor.root_start(),
                        config.depth_guard(),
                    );
                    print!("{}", outline.render());
                }
            }
            match &snapshot.active_leaf {
                Some(leaf) => println!(
                    "[{}] {} ({}s left) | {}",
                    snapshot.phase,
                    leaf.name,
                    leaf.remaining_ms / 1000,
                    snapshot.countdown
                ),
                None => println!("[{}] {}", snapshot.phase, snapshot.countdown),
            }
        }

        let done = snapshot.phase == ExecutionPhase::Complete;
        if done || args.ticks.is_some_and(|limit| ticks >= limit) {
            break;
        }
        std::thread::sleep(interval);
    }

    info!(
        "event=watch_stop module=cli root_id={} ticks={}",
        monitor.root_id(),
        ticks
    );
    Ok(())
}

fn describe(event: &MonitorEvent) -> String {
    let at = format_instant(event.at());
    match event {
        MonitorEvent::PhaseChanged { from: None, to, .. } => format!("{at} phase {to}"),
        MonitorEvent::PhaseChanged {
            from: Some(from),
            to,
            ..
        } => format!("{at} phase {from} -> {to}"),
        MonitorEvent::LeafStarted { item_id, name, .. } => {
            format!("{at} started {name} ({item_id})")
        }
        MonitorEvent::LeafFinished { item_id, .. } => format!("{at} finished {item_id}"),
        MonitorEvent::AllComplete { .. } => format!("{at} all complete"),
    }
}
