use std::cmp::Ordering;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use alchemist_cli::session::{FilterOutcome, Session};
use alchemist_core::WorkbookError;
use alchemist_model::{Entity, IssueKind, ValidationError};

use crate::types::{ExportResult, RulesResult, ValidateResult};

pub fn print_validation_summary(result: &ValidateResult) {
    print_entity_table(&result.session);
    print_issue_table(result.session.workbook.errors());
    print_rejections(&result.session.rejected);
    if let Some(path) = &result.errors_out {
        println!("Errors: {}", path.display());
    }
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
}

pub fn print_rules_summary(result: &RulesResult) {
    let workbook = &result.session.workbook;
    println!("Rules: {}", result.rules_file.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Type"), header_cell("Rule")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, rule) in workbook.rules().iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(rule.type_name()).fg(Color::Blue),
            Cell::new(rule.to_string()),
        ]);
    }
    println!("{table}");
    let rule_errors: Vec<ValidationError> =
        workbook.errors_for(Entity::Rules).cloned().collect();
    print_issue_table(&rule_errors);
    print_rejections(&result.session.rejected);
}

pub fn print_filter_result(outcome: &FilterOutcome) {
    let conditions: Vec<String> = outcome.conditions.iter().map(ToString::to_string).collect();
    if conditions.is_empty() {
        println!("Filter: (none)");
    } else {
        println!("Filter: {}", conditions.join(" AND "));
    }
    let mut table = Table::new();
    let mut header = vec![header_cell("Row")];
    header.extend(outcome.table.columns.iter().map(|column| header_cell(column)));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for &index in &outcome.matches {
        let Some(row) = outcome.table.rows.get(index) else {
            continue;
        };
        let mut cells = vec![dim_cell(index)];
        cells.extend(outcome.table.columns.iter().map(|column| match row.text(column) {
            Some(text) => Cell::new(text),
            None => dim_cell("-"),
        }));
        table.add_row(cells);
    }
    println!("{table}");
    println!(
        "{} of {} {} rows matched",
        outcome.matches.len(),
        outcome.table.len(),
        outcome.table.entity
    );
}

pub fn print_export_summary(result: &ExportResult) {
    println!("Output: {}", result.output_dir.display());
    println!(
        "Weights: priority={} fairness={} load={}",
        result.weights.priority, result.weights.fairness, result.weights.load
    );
    for path in &result.written {
        println!("  {}", path.display());
    }
    print_entity_table(&result.session);
    print_rejections(&result.session.rejected);
}

fn print_entity_table(session: &Session) {
    let workbook = &session.workbook;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Rows"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_rows = 0usize;
    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    for entity in Entity::TABLES.into_iter().chain([Entity::Rules]) {
        let rows = match entity {
            Entity::Rules => Some(workbook.rules().len()),
            _ => workbook.datasets().get(entity).map(alchemist_model::Table::len),
        };
        let errors = count_kind(workbook.errors_for(entity), IssueKind::Error);
        let warnings = count_kind(workbook.errors_for(entity), IssueKind::Warning);
        total_rows += rows.unwrap_or(0);
        total_errors += errors;
        total_warnings += warnings;
        table.add_row(vec![
            entity_cell(entity),
            count_cell(rows, Color::Reset),
            count_cell(Some(errors), Color::Red),
            count_cell(Some(warnings), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        count_cell(Some(total_errors), Color::Red).add_attribute(Attribute::Bold),
        count_cell(Some(total_warnings), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_issue_table(errors: &[ValidationError]) {
    if errors.is_empty() {
        return;
    }
    let mut issues: Vec<&ValidationError> = errors.iter().collect();
    issues.sort_by(|a, b| {
        let kind = kind_rank(b.kind).cmp(&kind_rank(a.kind));
        if kind != Ordering::Equal {
            return kind;
        }
        let entity = a.entity.as_str().cmp(b.entity.as_str());
        if entity != Ordering::Equal {
            return entity;
        }
        a.row_index().cmp(&b.row_index())
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Kind"),
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for issue in issues {
        let row = match issue.row {
            Some(row) => Cell::new(row),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            entity_cell(issue.entity),
            kind_cell(issue.kind),
            row,
            Cell::new(&issue.field),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn print_rejections(rejected: &[WorkbookError]) {
    if rejected.is_empty() {
        return;
    }
    eprintln!("Rejected rules:");
    for error in rejected {
        eprintln!("- {error}");
    }
}

fn count_kind<'a>(errors: impl Iterator<Item = &'a ValidationError>, kind: IssueKind) -> usize {
    errors.filter(|error| error.kind == kind).count()
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_rank(kind: IssueKind) -> u8 {
    match kind {
        IssueKind::Error => 2,
        IssueKind::Warning => 1,
    }
}

fn kind_cell(kind: IssueKind) -> Cell {
    match kind {
        IssueKind::Error => Cell::new("ERROR").fg(Color::Red),
        IssueKind::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn entity_cell(entity: Entity) -> Cell {
    Cell::new(entity.label())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
