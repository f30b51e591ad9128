mod crossterm_driver;

use anyhow::Result;
use caret_core::cursor::{global, install_global, DEFAULT_REPEAT};
use caret_core::driver::AnsiDriver;
use caret_core::{CursorController, EventChannel, Point, TerminalDriver};
use clap::{Parser, ValueEnum};
use crossterm::{execute, style::Print, terminal};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crossterm_driver::CrosstermDriver;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// crossterm commands
    Crossterm,
    /// Raw ANSI escape sequences on stdin/stdout
    Ansi,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Caret cursor control demo", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Terminal driver to use
    #[arg(long, value_enum, default_value_t = Backend::Crossterm)]
    backend: Backend,

    /// How many cells to walk right before returning to the saved position
    #[arg(long, default_value_t = 10)]
    steps: u16,

    /// Leave the existing screen content alone
    #[arg(long)]
    no_clear: bool,
}

/// Payload sent on every step of the walk
#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    from: Point,
    to: Point,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug { "caret=debug" } else { "caret=info" };

    // Logs go to stderr so they don't land in the middle of the drawing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting caret demo with {:?} backend", args.backend);

    match args.backend {
        Backend::Crossterm => install_global(CrosstermDriver::new()),
        Backend::Ansi => install_global(AnsiDriver::stdio()),
    }

    terminal::enable_raw_mode()?;
    let outcome = run(&args);
    terminal::disable_raw_mode()?;

    let steps = outcome?;
    println!("Walked {} steps, ended back at the saved position.", steps.len());
    for step in &steps {
        println!("{}", step_line(step));
    }
    Ok(())
}

fn step_line(step: &Step) -> String {
    format!("  {} -> {}", step.from, step.to)
}

/// Walk right one cell at a time, printing a dot in each cell.
///
/// `to` is read after the dot is printed, so each step starts where the
/// previous one ended.
fn walk<D, F>(
    cursor: &mut CursorController<D>,
    steps: u16,
    on_step: &EventChannel<&'static str, Step>,
    mut print: F,
) -> Result<()>
where
    D: TerminalDriver,
    F: FnMut(&mut CursorController<D>, &str) -> Result<()>,
{
    for _ in 0..steps {
        let from = cursor.move_right(DEFAULT_REPEAT)?;
        print(&mut *cursor, ".")?;
        let to = cursor.position()?;
        on_step.trigger(&"walker", &Step { from, to });
    }
    Ok(())
}

fn run(args: &Args) -> Result<Vec<Step>> {
    let walked = Rc::new(RefCell::new(Vec::new()));
    let on_step: EventChannel<&'static str, Step> = EventChannel::new();

    let log = Rc::clone(&walked);
    on_step.add(move |walker: &&'static str, step: &Step| {
        debug!("{} stepped {} -> {}", walker, step.from, step.to);
        log.borrow_mut().push(step.clone());
    });

    let mut stdout = io::stdout();
    let mut cursor = global();
    if !args.no_clear {
        cursor.clear_screen()?;
    }

    cursor.move_to(Point::new(2, 1))?;
    cursor.flush()?;
    execute!(stdout, Print("start"))?;

    let origin = cursor.move_to(Point::new(2, 3))?;
    let home = cursor.save_current_position()?;
    info!(
        "Saved {} as {} (was at {})",
        cursor.saved_position(home).unwrap_or_default(),
        home,
        origin
    );

    walk(&mut *cursor, args.steps, &on_step, |cursor, text| {
        cursor.flush()?;
        execute!(stdout, Print(text))?;
        Ok(())
    })?;

    let end = cursor.retrieve_position(home)?;
    cursor.clear_row()?;
    cursor.flush()?;
    execute!(stdout, Print(format!("back from {}", end)))?;

    cursor.move_down(2)?;
    let row = cursor.position()?.y;
    cursor.move_to(Point::new(0, row))?;
    cursor.clear_saved_positions();
    cursor.flush()?;

    let steps = walked.take();
    Ok(steps)
}
