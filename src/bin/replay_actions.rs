//! Replays a saved action log without a window
//!
//! Reads a JSON session produced by the demo, applies every intent to a fresh
//! grid and prints the resulting layout.

use std::env;
use std::process;

use astar_grid::action_log::{format_actions, summarize, SessionLog};
use astar_grid::{layout, Controller, RecordingSink, Response, SearchOutcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <action_log.json>", args[0]);
        eprintln!("Replays a recorded session and prints the final grid");
        process::exit(1);
    }

    let session = SessionLog::load_from_file(&args[1])?;
    println!("=== Replaying {} ({}x{}) ===", args[1], session.cols, session.rows);
    println!("{}\n", format_actions(&session.actions));

    let mut controller = Controller::new(session.cols, session.rows, RecordingSink::new());
    for (i, logged) in session.actions.iter().enumerate() {
        match controller.apply(logged.intent) {
            Ok(Response::Searched(SearchOutcome::Found { path, cost, explored })) => {
                println!(
                    "#{:3} path of {} tiles, cost {}, {} explored",
                    i + 1,
                    path.len(),
                    cost,
                    explored
                );
            }
            Ok(Response::Searched(SearchOutcome::NoPath { explored })) => {
                println!("#{:3} no valid path ({} explored)", i + 1, explored);
            }
            Ok(Response::Reset) => println!("#{:3} reset", i + 1),
            Ok(_) => {}
            Err(e) => println!("#{:3} {:?} rejected: {}", i + 1, logged.intent, e),
        }
    }

    println!("\n{}", layout::render(controller.grid()));
    println!("Annotation requests: {}", controller.sink().events().len());
    println!("{}", summarize(&session.actions));

    Ok(())
}
