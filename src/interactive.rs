//! Interactive filter loop.
//!
//! Reads query lines from stdin and feeds them through the debouncer, so a
//! burst of input lines costs one filter pass. Each pass re-evaluates the
//! whole card set and redraws the visible cards plus the filter info line.
//! A blank line clears the filter; EOF ends the session.

use crate::console::TerminalView;
use crate::debounce::Debouncer;
use crate::filter::apply_filter;
use crate::render::render_filtered;
use crate::ui;
use crate::view::CardEntry;
use log::debug;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Run the stdin filter loop until EOF
pub fn run(entries: Vec<CardEntry>, quiet: Duration, use_colors: bool) -> io::Result<()> {
    let state = Arc::new(Mutex::new(entries));
    let filter_state = state.clone();

    let debouncer = Debouncer::new(quiet, move |query: String| {
        let Ok(mut entries) = filter_state.lock() else {
            debug!("filter state poisoned, ignoring query");
            return;
        };
        let outcome = apply_filter(&mut entries, &query);
        let mut view = TerminalView::stdout(use_colors);
        render_filtered(&entries, &query, &outcome, &mut view);
        prompt();
    });

    ui::status("type to filter, blank line to clear, Ctrl-D to quit");
    prompt();

    for line in io::stdin().lock().lines() {
        debouncer.schedule(line?);
    }

    Ok(())
}

fn prompt() {
    print!("filter> ");
    let _ = io::stdout().flush();
}
