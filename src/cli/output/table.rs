//! Table output formatting for CLI commands
//!
//! Formats assignment sets using comfy-table.

use crate::cli::output::truncate;
use crate::domain::models::VideoTriple;
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<usize>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<usize>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format the comparisons of an assignment as a table, in presentation
    /// order
    pub fn format_triples(&self, triples: &[VideoTriple]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Caption").add_attribute(Attribute::Bold),
            Cell::new("Baseline").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
        ]);

        for (index, triple) in triples.iter().enumerate() {
            let baseline_cell = if self.use_colors {
                Cell::new(&triple.baseline_name).fg(Color::Cyan)
            } else {
                Cell::new(&triple.baseline_name)
            };

            table.add_row(vec![
                Cell::new(index + 1),
                Cell::new(truncate(&triple.caption, 40)),
                baseline_cell,
                Cell::new(truncate(&triple.source_path.display().to_string(), 50)),
            ]);
        }

        table.to_string()
    }

    /// Create a base table with common settings
    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(u16::try_from(width).unwrap_or(u16::MAX));
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors are off when NO_COLOR is set or TERM is "dumb"
fn supports_color() -> bool {
    env::var_os("NO_COLOR").is_none() && !env::var("TERM").is_ok_and(|term| term == "dumb")
}
