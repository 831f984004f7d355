mod cli;
mod console;
mod debounce;
mod export;
mod fetch;
mod filter;
mod interactive;
mod model;
mod render;
mod ui;
mod view;

use crate::console::TerminalView;
use crate::fetch::LoadedReport;
use std::time::Duration;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    // Set console width override if specified (for testing)
    if let Some(width) = args.console_width {
        console::set_console_width(width);
    }

    // Load the report: one GET or one file read, terminal on failure
    let loaded = match load_report(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            ui::print_error(&format!("Failed to load data. Please try again later.\n       {}", e));
            std::process::exit(1);
        }
    };

    let use_colors = !args.no_color;
    let LoadedReport { report, raw } = loaded;

    // Render the full dashboard
    let mut view = TerminalView::stdout(use_colors);
    let mut entries = render::render_dashboard(&report, &mut view);

    // One-shot filter pass
    if let Some(query) = &args.filter {
        let outcome = filter::apply_filter(&mut entries, query);
        render::render_filtered(&entries, query, &outcome, &mut view);
    }

    // Export the originally fetched document
    if let Some(path) = &args.export {
        match export::export_report(&raw, path) {
            Ok(_) => ui::status(&format!("report saved to {}", path.display())),
            Err(e) => {
                ui::print_error(&format!("Failed to save report: {}", e));
                std::process::exit(1);
            }
        }
    }

    // Interactive filter loop
    if args.interactive {
        if let Err(e) = interactive::run(entries, Duration::from_millis(args.debounce_ms), use_colors) {
            ui::print_error(&format!("Filter session failed: {}", e));
            std::process::exit(1);
        }
    }
}

fn load_report(args: &cli::CliArgs) -> Result<LoadedReport, fetch::LoadError> {
    match &args.input {
        Some(path) => fetch::read_report(path),
        None => fetch::fetch_report(args.report_url()),
    }
}
