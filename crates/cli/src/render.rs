//! Plain-text rendering of grid views.
//!
//! Output mirrors the presentation contract: the visible column list is
//! printed as left-fixed | scrollable | right-fixed, with sort indicators
//! in the header and the grouped tree indented by level.

use trellis_core::{ColumnSpec, Record};
use trellis_engine::{GridState, GroupChildren, GroupNode};

/// Visible columns in render order: left-fixed, scrollable, right-fixed
/// (grouped fields already excluded by the facade).
fn render_columns(grid: &GridState) -> Vec<&ColumnSpec> {
    let visible = grid.visible_columns();

    let mut cols: Vec<&ColumnSpec> = Vec::new();
    for group in [
        grid.columns().left_fixed(),
        grid.columns().scrollable(),
        grid.columns().right_fixed(),
    ] {
        cols.extend(
            group
                .into_iter()
                .filter(|c| visible.iter().any(|v| v.field == c.field)),
        );
    }
    cols
}

fn header_cell(grid: &GridState, col: &ColumnSpec) -> String {
    match (grid.sort_index(&col.field), grid.sort_direction(&col.field)) {
        (Some(index), Some(direction)) => {
            let arrow = match direction {
                trellis_core::SortDirection::Asc => "asc",
                trellis_core::SortDirection::Desc => "desc",
            };
            format!("{} [{} {arrow}]", col.label, index + 1)
        }
        _ => col.label.clone(),
    }
}

fn row_line(columns: &[&ColumnSpec], record: &Record, indent: usize) -> String {
    let cells: Vec<String> = columns
        .iter()
        .map(|c| record.value_of(&c.field).display())
        .collect();
    format!("{}{}", "  ".repeat(indent), cells.join(" | "))
}

/// Print the flat sorted view.
pub fn print_flat(grid: &GridState) {
    let columns = render_columns(grid);
    let header: Vec<String> = columns.iter().map(|c| header_cell(grid, c)).collect();
    println!("{}", header.join(" | "));

    for record in grid.sorted_records() {
        println!("{}", row_line(&columns, &record, 0));
    }
}

/// Print the grouped tree. Collapsed groups show only their header line.
pub fn print_tree(grid: &GridState) {
    let columns = render_columns(grid);
    let header: Vec<String> = columns.iter().map(|c| header_cell(grid, c)).collect();
    println!("{}", header.join(" | "));

    for node in grid.grouped_view() {
        print_node(&node, &columns);
    }
}

fn print_node(node: &GroupNode, columns: &[&ColumnSpec]) {
    let marker = if node.expanded { "-" } else { "+" };
    println!(
        "{}{marker} {} = {} ({})",
        "  ".repeat(node.level),
        node.field,
        node.key,
        node.children.len()
    );
    if !node.expanded {
        return;
    }
    match &node.children {
        GroupChildren::Groups(children) => {
            for child in children {
                print_node(child, columns);
            }
        }
        GroupChildren::Records(records) => {
            for record in records {
                println!("{}", row_line(columns, record, node.level + 1));
            }
        }
    }
}

/// Print the effective catalog, one descriptor per line.
pub fn print_catalog(columns: &[ColumnSpec]) {
    for col in columns {
        let fixed = match col.fixed {
            Some(side) => format!("{side:?}").to_lowercase(),
            None => "-".to_string(),
        };
        let width = col
            .width
            .map(|w| w.to_string())
            .unwrap_or_else(|| "-".to_string());
        let mut flags = Vec::new();
        if !col.visible {
            flags.push("hidden");
        }
        if col.disable_visibility_toggle {
            flags.push("always-visible");
        }
        if col.reject_when_unfixed {
            flags.push("pin-locked");
        }
        println!(
            "{:<16} {:<16} {:<8} w={:<5} fixed={:<6} {}",
            col.field,
            col.label,
            format!("{:?}", col.data_type).to_lowercase(),
            width,
            fixed,
            flags.join(",")
        );
    }
}
