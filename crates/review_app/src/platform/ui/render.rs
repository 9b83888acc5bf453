use std::fmt::Write;

use review_core::{
    Action, AppViewModel, BulkAction, DuplicateGroup, PendingConfirmation, RunPhase, TreeRowView,
};

use crate::platform::config::Labels;

pub fn render(view: &AppViewModel, labels: &Labels) -> String {
    let mut out = String::new();

    let phase_label = match view.phase {
        RunPhase::Idle => "Idle",
        RunPhase::Requested => "Starting",
        RunPhase::Running => "Running",
        RunPhase::Finished => "Finished",
    };
    let start = if view.start_enabled { "enabled" } else { "disabled" };
    let _ = writeln!(out, "== {phase_label} | start {start} ==");

    let counters = &view.counters;
    let _ = writeln!(
        out,
        "Progress {:.0}% | checked {} / {} | errors {} | warnings {} | unknown {}",
        counters.progress_percent(),
        format_with_commas(counters.checked),
        format_with_commas(counters.total),
        format_with_commas(counters.errors),
        format_with_commas(counters.warnings),
        format_with_commas(counters.unknown)
    );

    if view.affordances.show_no_results {
        let _ = writeln!(out, "{}", labels.no_results);
    }
    if view.affordances.show_search {
        let _ = writeln!(out, "Search: {:?}", view.search_pattern);
    }
    if view.affordances.show_filters {
        let toggles: Vec<String> = view
            .categories
            .iter()
            .map(|(tag, enabled)| format!("[{}] {}", if *enabled { 'x' } else { ' ' }, tag.name()))
            .collect();
        let _ = writeln!(out, "Filters: {}", toggles.join(" "));
    }
    if view.affordances.show_mass_actions {
        let _ = writeln!(out, "Bulk: repair-all | remove-errors");
    }

    for row in &view.rows {
        let _ = writeln!(out, "{}", format_tree_row(row, labels));
    }
    for group in &view.duplicates {
        render_duplicate_group(&mut out, group, labels);
    }

    if let Some(debug) = &view.debug_output {
        let _ = writeln!(out, "Debug: {debug}");
    }
    if let Some(pending) = &view.pending {
        let _ = writeln!(out, "Confirm {}? (yes/no)", describe_pending(pending));
    }
    if let Some(edit) = &view.edit {
        let _ = writeln!(
            out,
            "Editing {} ({}): {}: {:?} | URL: {:?}",
            edit.bookmark_id,
            edit.mode.as_str(),
            labels.title,
            edit.title,
            edit.url
        );
    }
    if let Some(condition) = &view.last_condition {
        let _ = writeln!(out, "! {condition}");
    }

    out
}

fn format_tree_row(row: &TreeRowView, labels: &Labels) -> String {
    let indent = "  ".repeat(row.depth + 1);
    let title = if row.untitled {
        labels.no_title.as_str()
    } else {
        row.title.as_str()
    };
    if row.is_folder {
        return format!("{indent}+ {title} [{}]", row.id);
    }

    let mut line = format!("{indent}- {title} [{}]", row.id);
    if let Some(url) = &row.url {
        let _ = write!(line, " <{url}>");
    }
    if let Some(status) = row.status {
        let _ = write!(line, " {}: {}", labels.state, status.label());
    }
    if let Some(new_url) = &row.new_url {
        let _ = write!(line, " {}: <{new_url}>", labels.new_url);
    }
    line
}

fn render_duplicate_group(out: &mut String, group: &DuplicateGroup, labels: &Labels) {
    let _ = writeln!(out, "  {}", group.url);
    for entry in &group.entries {
        let _ = writeln!(
            out,
            "    [{}] {}: {} | {}: {}",
            entry.id,
            labels.title,
            entry.title,
            labels.path,
            entry.path_text()
        );
    }
}

fn describe_pending(pending: &PendingConfirmation) -> String {
    match pending {
        PendingConfirmation::Single(Action::Remove { id }) => format!("removal of {id}"),
        PendingConfirmation::Single(Action::RepairRedirect { id, new_url }) => {
            format!("redirect repair of {id} to {new_url}")
        }
        PendingConfirmation::Single(Action::Edit { id, .. }) => format!("edit of {id}"),
        PendingConfirmation::Bulk(BulkAction::RepairAllRedirects) => {
            "repair of all visible redirects".to_string()
        }
        PendingConfirmation::Bulk(BulkAction::RemoveAllErrors) => {
            "removal of all visible errors".to_string()
        }
    }
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
