// src/queue/validate.rs

//! Registration and pre-flight checks for the init queue.
//!
//! Each check returns the defect message on failure; the queue decides
//! whether that becomes a fatal or a plain error.

use std::collections::HashSet;

use crate::queue::record::TaskRecord;

pub(crate) type Check = std::result::Result<(), String>;

/// Checks applied to a single `add` call.
pub(crate) fn validate_registration(name: &str, has_action: bool, deps: &[&str]) -> Check {
    if name.is_empty() {
        return Err("add() called with an empty task label".to_string());
    }
    if !has_action {
        return Err(format!("add({name}) called without an action"));
    }
    if deps.iter().any(|dep| *dep == name) {
        return Err(format!("add({name}) lists itself as a dependency"));
    }
    Ok(())
}

/// Checks across all registered tasks, run before the first pass.
pub(crate) fn validate_records(records: &[TaskRecord<'_>]) -> Check {
    ensure_unique_labels(records)?;
    validate_task_dependencies(records)?;
    Ok(())
}

fn ensure_unique_labels(records: &[TaskRecord<'_>]) -> Check {
    let mut seen: HashSet<&str> = HashSet::new();
    for record in records {
        if !seen.insert(record.name()) {
            return Err(format!("duplicate task label '{}'", record.name()));
        }
    }
    Ok(())
}

fn validate_task_dependencies(records: &[TaskRecord<'_>]) -> Check {
    let labels: HashSet<&str> = records.iter().map(|r| r.name()).collect();
    for record in records {
        for dep in record.deps() {
            if !labels.contains(dep.as_str()) {
                return Err(format!(
                    "task '{}' has unknown dependency '{}'",
                    record.name(),
                    dep
                ));
            }
        }
    }
    Ok(())
}
