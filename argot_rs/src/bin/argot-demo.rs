//! argot-demo: a small command tree exercising the engine end to end.
//!
//! ```bash
//! argot-demo greet ada good morning -l -n 2
//! argot-demo db m up 3 --dry-run
//! argot-demo paint wall --shape circle --fill
//! argot-demo help db
//! ```

use std::path::PathBuf;

use anyhow::{Context, bail};
use argot::{
    App, Command, ConvertibleValue, EngineConfig, Group, Invocation, OptionDescriptor,
    OptionGroup, RestrictedChoice, restricted_choice,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Circle,
    Square,
    Triangle,
}

impl RestrictedChoice for Shape {
    type Raw = String;

    fn variants() -> &'static [Self] {
        &[Shape::Circle, Shape::Square, Shape::Triangle]
    }

    fn raw(&self) -> String {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
        }
        .to_string()
    }
}

restricted_choice!(Shape);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl RestrictedChoice for Direction {
    type Raw = String;

    fn variants() -> &'static [Self] {
        &[Direction::Up, Direction::Down]
    }

    fn raw(&self) -> String {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
        .to_string()
    }
}

restricted_choice!(Direction);

fn greet(inv: &Invocation<'_>) -> anyhow::Result<()> {
    let person = inv.arguments.single("person").unwrap_or_default();
    let words = inv.arguments.list("greeting");
    let greeting = if words.is_empty() {
        "Hello".to_string()
    } else {
        words.join(" ")
    };

    let mut line = format!("{}, {}!", greeting, person);
    if inv.options.flag("--loudly") {
        line = line.to_uppercase();
    }
    for _ in 0..inv.options.value::<u32>("--times").unwrap_or(1) {
        println!("{}", line);
    }
    Ok(())
}

fn migrate(inv: &Invocation<'_>) -> anyhow::Result<()> {
    let raw = inv.arguments.single("direction").unwrap_or_default();
    let Some(direction) = Direction::convert(raw) else {
        bail!(
            "invalid direction '{}' (expected {})",
            raw,
            Direction::signature()
        );
    };
    let steps: u32 = match inv.arguments.single("steps") {
        Some(steps) => steps
            .parse()
            .with_context(|| format!("invalid step count '{}'", steps))?,
        None => 1,
    };

    let prefix = if inv.options.flag("--dry-run") {
        "[dry-run] "
    } else {
        ""
    };
    println!("{}migrating {} {} step(s)", prefix, direction.raw(), steps);
    Ok(())
}

fn status(inv: &Invocation<'_>) -> anyhow::Result<()> {
    println!("database: ok");
    let verbosity = inv.options.count("--verbose");
    if verbosity > 0 {
        println!("verbosity: {}", verbosity);
    }
    Ok(())
}

fn paint(inv: &Invocation<'_>) -> anyhow::Result<()> {
    let canvas = inv.arguments.single("canvas").unwrap_or_default();
    let shape = inv.options.value::<Shape>("--shape").unwrap_or(Shape::Square);
    let style = if inv.options.flag("--fill") {
        "filled"
    } else if inv.options.flag("--outline") {
        "outlined"
    } else {
        "plain"
    };
    println!("painting a {} {} on {}", style, shape.raw(), canvas);
    for tag in inv.options.values::<String>("--tag") {
        println!("tag: {}", tag);
    }
    Ok(())
}

fn build_app(config: EngineConfig) -> anyhow::Result<App> {
    let dry_run = OptionDescriptor::flag(&["--dry-run"], "Print what would happen")?;

    let db = Group::new("db")
        .about("Database maintenance")
        .shared_option(dry_run)
        .command(
            Command::new("migrate", "<direction> [<steps>]")?
                .shortcut("m")
                .about("Apply or roll back migrations")
                .describe("direction", "up or down")
                .describe("steps", "How many migrations (default 1)")
                .handler(migrate),
        )
        .command(
            Command::new("status", "")?
                .about("Show database status")
                .handler(status),
        );

    let app = App::new("argot-demo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Demonstration of grouped commands, typed options and usage output")
        .config(config)
        .shared_option(OptionDescriptor::counter(
            &["-V", "--verbose"],
            "Increase verbosity",
        )?)
        .command(
            Command::new("greet", "<person> [<greeting>] ...")?
                .about("Greet someone")
                .option(OptionDescriptor::flag(&["-l", "--loudly"], "Shout the greeting")?)
                .option(OptionDescriptor::key::<u32>(
                    &["-n", "--times"],
                    "Repeat the greeting",
                )?)
                .handler(greet),
        )
        .command(
            Command::new("paint", "<canvas>")?
                .about("Paint a shape")
                .option(OptionDescriptor::key::<Shape>(&["-s", "--shape"], "Shape to paint")?)
                .option(OptionDescriptor::flag(&["-f", "--fill"], "Fill the shape")?)
                .option(OptionDescriptor::flag(&["-o", "--outline"], "Outline the shape")?)
                .option(OptionDescriptor::variadic_key::<String>(
                    &["-t", "--tag"],
                    "Attach a tag (repeatable)",
                )?)
                .option_group(OptionGroup::at_most_one(&["--fill", "--outline"]))
                .handler(paint),
        )
        .group(db);

    Ok(app)
}

fn main() {
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config_path = std::env::var_os("ARGOT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".argot.toml"));
    let config = EngineConfig::load(&config_path);

    let app = match build_app(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(argot::EXIT_DEFINITION);
        }
    };
    if let Err(e) = app.validate() {
        eprintln!("error: {}", e);
        std::process::exit(argot::EXIT_DEFINITION);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(app.run(&args));
}
