//! CLI command implementations

pub mod ask;
pub mod chat;
pub mod status;

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use wayfinder_core::Route;

/// Print the chosen route as a dimmed diagnostic caption
pub fn print_route_caption(route: Route) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Black)).set_intense(true);
    let _ = stderr.set_color(&spec);
    let _ = writeln!(stderr, "route: {}", route);
    let _ = stderr.reset();
}
