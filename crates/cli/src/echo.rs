use std::time::Duration;

use owo_colors::OwoColorize;

use crate::VERSION;

const RULE_WIDTH: usize = 48;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {}", "ladle".bold().bright_blue(), format!("v{}", VERSION).dimmed());
    eprintln!("{}", "tag and attribute queries over HTML\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

fn print_section(title: &str) {
    eprintln!("{} {} {}", "──".dimmed(), title.bold().cyan(), "─".repeat(RULE_WIDTH - title.len()).dimmed());
}

/// Print the query steps as run and how many nodes the last one selected
pub fn print_selection(steps: &[String], count: usize, strict: bool) {
    eprintln!();
    print_section("Query");
    for (i, step) in steps.iter().enumerate() {
        eprintln!("  {} {}", format!("{:>2}.", i + 1).dimmed(), step.bright_white());
    }
    let mode = if strict { "strict" } else { "loose" };
    eprintln!(
        "  {} {} {}\n",
        count.to_string().bold().bright_white(),
        if count == 1 { "node" } else { "nodes" },
        format!("({} matching)", mode).dimmed()
    );
}

/// Print each phase's share of the total run time
pub fn print_timing_summary(total: Duration, timings: &[(&str, Duration)]) {
    print_section("Timing");

    let total_ms = total.as_secs_f64() * 1000.0;
    for (label, duration) in timings {
        let ms = duration.as_secs_f64() * 1000.0;
        let share = if total_ms > 0.0 { ms / total_ms * 100.0 } else { 0.0 };
        eprintln!("  {:<8} {:>9.2}ms {}", label.dimmed(), ms, format!("{:>3.0}%", share).dimmed());
    }
    eprintln!("  {:<8} {:>9.2}ms\n", "total".bold(), total_ms);
}

/// Format byte counts for display
pub fn format_size(bytes: usize) -> String {
    match bytes {
        b if b >= 1 << 20 => format!("{:.1} MiB", b as f64 / (1 << 20) as f64),
        b if b >= 1 << 10 => format!("{:.1} KiB", b as f64 / (1 << 10) as f64),
        b => format!("{} B", b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 << 20), "3.0 MiB");
    }
}
