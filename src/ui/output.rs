//! Output functions for consistent CLI formatting

use super::context::UiContext;
use console::style;

/// Display a successful step
pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        println!("{} {}", style("✓").green(), message);
    } else {
        println!("{} {}", style("[OK]").green(), message);
    }
}

/// Display a successful step with a dimmed detail
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.use_fancy_output() {
        println!("{} {} {}", style("✓").green(), message, style(detail).dim());
    } else {
        println!("{} {}: {}", style("[OK]").green(), message, detail);
    }
}

/// Display a warning step
pub fn step_warn(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        println!("{} {}", style("!").yellow(), message);
    } else {
        println!("{} {}", style("[WARN]").yellow(), message);
    }
}

/// Display a failed step
pub fn step_error(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        println!("{} {}", style("✗").red(), message);
    } else {
        println!("{} {}", style("[FAIL]").red(), message);
    }
}

/// Display success outro
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        println!();
        println!("{}", style(message).green().bold());
    } else {
        println!();
        println!("{} {}", style("[OK]").green(), message);
    }
}

/// Display warning outro
pub fn outro_warn(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        println!();
        println!("{}", style(message).yellow().bold());
    } else {
        println!();
        println!("{} {}", style("[WARN]").yellow(), message);
    }
}
