use std::cmp::Ordering;

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::json;

use certrule_model::{CertificateCategory, RuleType, ValidationRule};
use certrule_select::to_engine_rules;

use crate::commands::Selection;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn print_selection(selection: &Selection, language: &str) {
    println!("Rule set: {}", selection.rules_path.display());
    println!(
        "Category: {}  At: {}",
        selection.category,
        selection.now.to_rfc3339()
    );
    println!("{}", selection_table(&selection.rules, language));
    println!(
        "{} of {} rules apply",
        selection.rules.len(),
        selection.total
    );
}

pub fn selection_table(rules: &[ValidationRule], language: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Identifier"),
        header_cell("Version"),
        header_cell("Category"),
        header_cell("Type"),
        header_cell("Country"),
        header_cell("Valid from"),
        header_cell("Valid to"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for rule in rules {
        table.add_row(vec![
            Cell::new(&rule.identifier).add_attribute(Attribute::Bold),
            Cell::new(&rule.version),
            Cell::new(&rule.category),
            type_cell(rule.rule_type),
            Cell::new(&rule.country),
            Cell::new(rule.valid_from.format(TIMESTAMP_FORMAT)),
            Cell::new(rule.valid_to.format(TIMESTAMP_FORMAT)),
            match rule.description(language) {
                Some(desc) => Cell::new(desc),
                None => dim_cell("-"),
            },
        ]);
    }
    table
}

/// Print the selection as engine-layout JSON.
pub fn print_selection_json(selection: &Selection) -> Result<()> {
    let value = json!({
        "category": selection.category,
        "at": selection.now,
        "total": selection.total,
        "rules": to_engine_rules(&selection.rules),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub fn print_categories() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Description")]);
    apply_table_style(&mut table);
    for category in CertificateCategory::all() {
        table.add_row(vec![category.as_str(), category.description()]);
    }
    println!("{table}");
}

pub fn ordering_symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn type_cell(rule_type: RuleType) -> Cell {
    match rule_type {
        RuleType::Acceptance => Cell::new(rule_type).fg(Color::Green),
        RuleType::Invalidation => Cell::new(rule_type).fg(Color::Red),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
