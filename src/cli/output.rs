//! Output formatting for CLI

use crate::{
    game::Board,
    wizard::{CacheStats, ErrorStats},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print a board grid, indented
pub fn print_board(board: &Board) {
    for line in board.to_string().lines() {
        println!("  {line}");
    }
}

/// Format a gain with an explicit sign
pub fn format_gain(gain: i64) -> String {
    if gain > 0 {
        format!("+{gain}")
    } else {
        gain.to_string()
    }
}

pub fn print_cache_stats(stats: Option<CacheStats>) {
    print_subsection("Cache");
    match stats {
        Some(stats) => {
            for (name, map) in [("line states", stats.line_states), ("evaluations", stats.evaluations)] {
                print_kv(
                    name,
                    &format!(
                        "{}/{} entries, {} hits, {} misses",
                        map.size, map.capacity, map.hits, map.misses
                    ),
                );
            }
        }
        None => print_kv("cache", "disabled"),
    }
}

pub fn print_error_stats(stats: &ErrorStats) {
    print_subsection("Fallbacks");
    print_kv("total", &stats.total_errors().to_string());
    for (kind, count) in stats.by_kind() {
        if count > 0 {
            print_kv(kind.as_str(), &count.to_string());
        }
    }
}
