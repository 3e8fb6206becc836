//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, categories) and shared utilities (open_db, parse_month)
//! - `budgets` - Budget commands (list, set, delete)
//! - `import` - CSV import and export
//! - `insights` - Insight listing
//! - `reports` - Report generation commands
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (list, add, update, delete)

pub mod budgets;
pub mod core;
pub mod import;
pub mod insights;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use import::*;
pub use insights::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
