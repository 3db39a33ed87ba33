use chrono::TimeDelta;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use ev_trip_planner::quantity::{speed::KilometersPerHour, time::Hours};

pub fn build_stops_table(stops: &[TimeDelta], driving_time: Hours) -> Table {
    let charging_time: TimeDelta = stops.iter().sum();
    let driving_time = driving_time.to_time_delta();

    let mut table = new_table();
    table.set_header(vec!["Stop", "Duration"]);
    for (index, duration) in stops.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).add_attribute(Attribute::Dim),
            Cell::new(format_duration(*duration)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Charging"),
        Cell::new(format_duration(charging_time))
            .set_alignment(CellAlignment::Right)
            .fg(if stops.is_empty() { Color::Green } else { Color::DarkYellow }),
    ]);
    table.add_row(vec![
        Cell::new("Driving"),
        Cell::new(format_duration(driving_time)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(format_duration(charging_time + driving_time))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_speed_table(
    speed: KilometersPerHour,
    driving_time: Hours,
    break_time: TimeDelta,
) -> Table {
    let driving_time = driving_time.to_time_delta();

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Speed"),
        Cell::new(speed).set_alignment(CellAlignment::Right).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Driving"),
        Cell::new(format_duration(driving_time)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Breaks"),
        Cell::new(format_duration(break_time)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(format_duration(driving_time + break_time))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

/// Format the duration rounded to whole seconds, like `30m 1s`.
fn format_duration(duration: TimeDelta) -> String {
    let seconds = (duration + TimeDelta::milliseconds(500)).num_seconds();
    TimeDelta::seconds(seconds).to_std().map_or_else(
        |_| duration.to_string(),
        |duration| humantime::format_duration(duration).to_string(),
    )
}
