use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crm_lookup::Candidate;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn candidate_table(candidates: &[Candidate]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);

    for (position, candidate) in candidates.iter().enumerate() {
        table.add_row(vec![
            dim_cell(position + 1),
            Cell::new(&candidate.id),
            Cell::new(&candidate.name).add_attribute(Attribute::Bold),
            match &candidate.detail {
                Some(detail) => Cell::new(detail),
                None => dim_cell("-"),
            },
        ]);
    }
    table
}

pub fn key_value_table(rows: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    for (key, value) in rows {
        table.add_row(vec![header_cell(key), Cell::new(value)]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
