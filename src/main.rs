use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Parser;

use hexfield::app::domain::TextRange;
use hexfield::app::infrastructure::logging::init_tracing;
use hexfield::{ColorClass, Event, FixedCalendar, HexfieldSettings, HexfieldState, MemoryHost};

/// Print the colored ranges a hexfield-markdown planner would get.
#[derive(Parser, Debug)]
#[command(name = "hexfield", version, about)]
struct Cli {
    /// Markdown file to scan
    file: PathBuf,

    /// Reference day for due-date proximity (defaults to the local date)
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Settings file to use instead of the per-user one
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> hexfield::app::Result<Vec<String>> {
    let text = std::fs::read_to_string(&cli.file)?;
    let settings = match &cli.settings {
        Some(path) => HexfieldSettings::load_from(path),
        None => HexfieldSettings::load(),
    };

    let file_name = cli
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut host = MemoryHost::with_settings(settings);
    let doc = host.open_document(&file_name, "markdown", &text);
    let view = host.open_view(doc);

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let mut state = HexfieldState::new(&mut host, FixedCalendar(today));
    let now = Instant::now();
    state.handle(&mut host, Event::Opened(doc), now);
    state.handle(&mut host, Event::Activated(Some(view)), now);

    let mut painted: Vec<(TextRange, ColorClass, String)> = Vec::new();
    for class in ColorClass::all() {
        let Some(handle) = state.engine().handle(*class) else {
            continue;
        };
        let color = host.style(handle).map(|s| s.color.clone()).unwrap_or_default();
        for range in host.ranges(view, handle) {
            painted.push((*range, *class, color.clone()));
        }
    }
    painted.sort_by_key(|(range, _, _)| *range);
    state.shutdown(&mut host);

    Ok(painted
        .into_iter()
        .map(|(range, class, color)| format_line(range, class, &color))
        .collect())
}

fn format_line(range: TextRange, class: ColorClass, color: &str) -> String {
    format!(
        "{}:{}-{}:{} {} {}",
        range.start.line + 1,
        range.start.column + 1,
        range.end.line + 1,
        range.end.column + 1,
        class.name(),
        color
    )
}
