use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use linewatch_model::{ReviewAlert, Severity, ThresholdRule, format_quantity};

use crate::types::{RefreshRun, ReviewRun};

pub fn print_refresh(run: &RefreshRun) {
    println!("Organization: {}", run.org);
    println!(
        "Upserted: {}  Deactivated: {}",
        run.outcome.upserted, run.outcome.deactivated
    );
    print_rules_table(&run.rules);
}

pub fn print_rules_table(rules: &[ThresholdRule]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Scope"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Unit"),
        header_cell("Severity"),
        header_cell("Origin"),
        header_cell("Active"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    align_column(&mut table, 7, CellAlignment::Center);

    let mut ordered: Vec<&ThresholdRule> = rules.iter().collect();
    ordered.sort_by(|a, b| a.key.cmp(&b.key));
    for rule in ordered {
        table.add_row(vec![
            Cell::new(&rule.key.field_key),
            Cell::new(rule.key.scope.as_str()),
            bound_cell(rule.min),
            bound_cell(rule.max),
            Cell::new(&rule.unit),
            severity_cell(rule.severity),
            origin_cell(rule),
            active_cell(rule.active),
        ]);
    }
    println!("{table}");
}

pub fn print_review(run: &ReviewRun) {
    let result = &run.result;
    println!(
        "Review: {} report {} ({})",
        result.activity_type, result.report_id, run.org
    );
    println!(
        "Status: {}  Alerts: {}  Warnings: {}  Passed: {}",
        result.overall_status(),
        result.alert_count(),
        result.warning_count(),
        result.passed_count()
    );
    if result.degraded {
        println!("Note: review was degraded; some checks could not be evaluated");
    }

    let triggered: Vec<&ReviewAlert> = result.alerts.iter().chain(result.warnings.iter()).collect();
    if !triggered.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Severity"),
            header_cell("Check"),
            header_cell("Message"),
            header_cell("Recommended action"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Center);
        for alert in triggered {
            table.add_row(vec![
                severity_cell(alert.severity),
                Cell::new(&alert.source_key),
                Cell::new(&alert.message),
                Cell::new(&alert.action),
            ]);
        }
        println!("{table}");
    }

    match &run.notification {
        Some(outcome) if outcome.attempted => {
            let recipient = outcome.recipient.as_deref().unwrap_or("-");
            if outcome.delivered {
                println!("Notification sent to {recipient}");
            } else {
                println!(
                    "Notification to {recipient} failed: {}",
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
        Some(_) => println!("Notification not required"),
        None => {}
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
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

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Critical => Cell::new("CRITICAL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::High => Cell::new("HIGH").fg(Color::Red),
        Severity::Medium => Cell::new("MEDIUM").fg(Color::Yellow),
        Severity::Low => Cell::new("LOW").fg(Color::DarkGrey),
        Severity::Info => Cell::new("INFO").fg(Color::DarkGrey),
    }
}

fn bound_cell(bound: Option<f64>) -> Cell {
    match bound {
        Some(value) => Cell::new(format_quantity(value)),
        None => dim_cell("-"),
    }
}

fn origin_cell(rule: &ThresholdRule) -> Cell {
    match &rule.origin {
        Some(origin) => Cell::new(origin.bucket.as_str()),
        None => dim_cell("default"),
    }
}

fn active_cell(active: bool) -> Cell {
    if active {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
