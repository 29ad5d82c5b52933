//! User-facing reports.
//!
//! Everything here writes through an [`OutputFormatter`], so quiet and
//! verbose modes are honoured in one place.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::consolidate::{ConsolidationResult, PlannedAction, ProgressEvent};
use crate::listing::{BookInfo, total_size};
use crate::naming::PatternRegistry;
use crate::ordering::OrderedCollection;
use crate::utils::format_size_short;

/// Show one progress event of a consolidation run.
pub fn display_progress(formatter: &OutputFormatter, event: &ProgressEvent) {
    match event {
        ProgressEvent::SkippedCollection { .. } => formatter.warning(&event.to_string()),
        ProgressEvent::PatternDetected { .. } => formatter.debug(&event.to_string()),
        ProgressEvent::Finished { .. } => {}
        _ => formatter.info(&event.to_string()),
    }
}

/// Summarise a consolidation run.
pub fn display_consolidation_result(formatter: &OutputFormatter, result: &ConsolidationResult) {
    if !result.success {
        formatter.error(result.error.as_deref().unwrap_or("Consolidation failed"));
        return;
    }

    if !result.planned_actions.is_empty() {
        formatter.section("Planned actions (dry run):");
        for (idx, action) in result.planned_actions.iter().enumerate() {
            formatter.list_item(idx + 1, &describe_action(action));
            if let PlannedAction::Merge { files, .. } = action {
                for file in files {
                    formatter.detail("  part", &file.display().to_string());
                }
            }
        }
        formatter.blank_line();
    }

    for conflict in &result.naming_conflicts {
        formatter.warning(&format!(
            "Naming conflict: {} saved as {}",
            conflict.requested,
            conflict.resolved.display()
        ));
    }

    if !result.skipped_files.is_empty() {
        formatter.warning(&format!(
            "{} file(s) left out (duplicates or unreadable)",
            result.skipped_files.len()
        ));
        for file in &result.skipped_files {
            formatter.detail("skipped", &file.display().to_string());
        }
    }

    formatter.success(&format!(
        "Total books: {} ({} copied, {} merged)",
        result.total_books, result.individual_copied, result.merged
    ));
}

fn describe_action(action: &PlannedAction) -> String {
    match action {
        PlannedAction::Copy { from, to } => {
            format!("copy  {} -> {}", from.display(), to.display())
        }
        PlannedAction::Merge {
            collection,
            ordered_by,
            files,
            to,
        } => format!(
            "merge {} ({} file(s), {}) -> {}",
            collection,
            files.len(),
            ordered_by,
            to.display()
        ),
    }
}

/// Show a shelf listing as a table.
pub fn display_book_list(formatter: &OutputFormatter, books: &[BookInfo], details: bool) {
    if books.is_empty() {
        formatter.info("No books found.");
        return;
    }

    let rows: Vec<Vec<String>> = books
        .iter()
        .map(|book| {
            let mut row = vec![book.title.clone(), book.formatted_size.clone()];
            if details {
                let pages = book
                    .page_count
                    .map(|p| format!("{p} pages"))
                    .unwrap_or_else(|| "? pages".to_string());
                row.push(book.created.format("%Y-%m-%d %H:%M").to_string());
                row.push(pages);
            }
            row
        })
        .collect();
    formatter.table(&rows);

    formatter.blank_line();
    formatter.info(&format!(
        "{} book(s), {}",
        books.len(),
        format_size_short(total_size(books))
    ));
}

/// Show the reading order of one collection.
pub fn display_ordered_collection(formatter: &OutputFormatter, collection: &OrderedCollection) {
    formatter.info(&format!("Ordered by: {}", collection.ordered_by));
    for (idx, file) in collection.files.iter().enumerate() {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        formatter.list_item(idx + 1, &name);
    }
    for file in &collection.dropped {
        formatter.warning(&format!("Dropped duplicate: {}", file.display()));
    }
}

/// List the registered naming patterns in detection order.
pub fn display_patterns(formatter: &OutputFormatter, registry: &PatternRegistry) {
    formatter.section("Naming patterns (checked in this order):");
    let rows: Vec<Vec<String>> = registry
        .patterns()
        .map(|pattern| vec![format!("{:>3}", pattern.priority()), pattern.name().to_string()])
        .collect();
    formatter.table(&rows);
}
