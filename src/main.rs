//! Colony Alert - interactive demo
//!
//! Spawns a few colonists with in-memory policy managers and lets you switch
//! policies, raise and clear the alert, and dump the save data.

use colony_alert::core::error::Result;
use colony_alert::ecs::world::World;
use colony_alert::entity::tasks::{Task, TaskPriority};
use colony_alert::{AlertConfig, AlertLevelId, AlertSession, ManagerSet, PolicyHandle, PolicyId};
use colony_alert::ResourceCategory;

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Emergency policy demo for a small colony
#[derive(Parser, Debug)]
#[command(name = "colony-alert")]
#[command(about = "Toggle emergency policies on a simulated colony")]
struct Args {
    /// TOML config with [content] and [behaviour] tables
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Number of colonists to spawn
    #[arg(long, default_value_t = 3)]
    colonists: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AlertConfig::load(path)?,
        None => AlertConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(config.behaviour.log_filter.as_str())
        .init();

    tracing::info!("Colony Alert starting...");

    let mut world = World::new();
    for i in 0..args.colonists {
        world.spawn_colonist(format!("Colonist {}", i + 1));
    }
    world.spawn_guest("Wandering trader");

    let mut session = AlertSession::new(ManagerSet::in_memory(), &config);
    let mut next_policy = 1;

    println!("\n=== COLONY ALERT ===");
    println!("Commands:");
    println!("  alert / a               - Toggle the emergency alert");
    println!("  status / s              - Show stored and live policies");
    println!("  set <category> <label>  - Make a new live policy for a category");
    println!("  work <label>            - Give every free colonist a task");
    println!("  save                    - Print the save data");
    println!("  quit / q                - Exit");
    println!();

    loop {
        print!("[{}] > ", if session.on_alert() { "ALERT" } else { "normal" });
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "alert" || input == "a" {
            match session.toggle(world.free_colonists_mut()) {
                Some(transition) => {
                    println!("Alert level {} -> {}", transition.from, transition.to);
                    if let Some(report) = transition.interrupted {
                        println!(
                            "Interrupted {} colonists ({} tasks ended)",
                            report.actors, report.tasks_ended
                        );
                    }
                }
                None => println!("Alert level unchanged"),
            }
            continue;
        }

        if input == "status" || input == "s" {
            display_status(&mut session, &world)?;
            continue;
        }

        if input == "save" {
            println!("{}", session.save_data().to_json()?);
            continue;
        }

        if let Some(label) = input.strip_prefix("work ") {
            let tick = world.tick();
            for colonist in world.free_colonists_mut() {
                colonist.assign(Task::new(label, TaskPriority::Normal, tick));
            }
            println!("Assigned '{}' to every free colonist", label);
            continue;
        }

        if let Some(rest) = input.strip_prefix("set ") {
            let Some((name, label)) = rest.split_once(' ') else {
                println!("Usage: set <category> <label>");
                continue;
            };
            let Some(category) = ResourceCategory::ALL.into_iter().find(|c| c.name() == name)
            else {
                println!("Unknown category '{}'", name);
                continue;
            };
            let handle = PolicyHandle::new(PolicyId(next_policy), label);
            next_policy += 1;
            session.managers_mut().load_state(category, &handle);
            println!("Live {} policy is now '{}'", category, label);
            continue;
        }

        println!("Unknown command '{}'", input);
    }

    Ok(())
}

fn display_status(session: &mut AlertSession, world: &World) -> Result<()> {
    println!("\n--- Alert level {} ---", session.level());
    println!("{:<10} {:<24} {:<24} {:<24}", "category", "live", "normal", "emergency");
    for category in ResourceCategory::ALL {
        let live = session.managers().active_policy(category);
        let normal = session.get_alert_policy(AlertLevelId::NORMAL, category)?;
        let emergency = session.get_alert_policy(AlertLevelId::EMERGENCY, category)?;
        println!(
            "{:<10} {:<24} {:<24} {:<24}",
            category.name(),
            live.label(),
            normal.as_ref().map_or("-", |p| p.label()),
            emergency.as_ref().map_or("-", |p| p.label()),
        );
    }

    println!("\nColonists:");
    for colonist in world.colonists() {
        let task = colonist.tasks.current().map_or("idle", |t| t.label.as_str());
        let role = if colonist.is_free() { "" } else { " (guest)" };
        println!("  {}{}: {}", colonist.name, role, task);
    }
    println!();
    Ok(())
}
