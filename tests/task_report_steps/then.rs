//! Then steps for task report BDD scenarios.

use super::world::TaskReportWorld;
use rstest_bdd_macros::then;
use taskflat::report::{ports::TaskSourceError, services::ReportError};

#[then("the report has {count:usize} rows")]
fn report_has_rows(world: &TaskReportWorld, count: usize) -> Result<(), eyre::Report> {
    let rows = world.rows()?;
    if rows.len() != count {
        return Err(eyre::eyre!("expected {count} rows, found {}", rows.len()));
    }
    Ok(())
}

#[then(r#"row {index:usize} is for task "{id}" and assignee "{username}" in group "{group}""#)]
fn row_for_assignee_in_group(
    world: &TaskReportWorld,
    index: usize,
    id: String,
    username: String,
    group: String,
) -> Result<(), eyre::Report> {
    let row = world.row(index)?;
    let actual = (
        row.task_id.as_str(),
        row.assignee.as_deref(),
        row.group.as_deref(),
    );
    let expected = (id.as_str(), Some(username.as_str()), Some(group.as_str()));
    if actual != expected {
        return Err(eyre::eyre!("row {index}: expected {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"row {index:usize} is for task "{id}" without an assignee"#)]
fn row_without_assignee(
    world: &TaskReportWorld,
    index: usize,
    id: String,
) -> Result<(), eyre::Report> {
    let row = world.row(index)?;
    if row.task_id.as_str() != id || row.assignee_id.is_some() || row.assignee.is_some() {
        return Err(eyre::eyre!("row {index}: unexpected row {row:?}"));
    }
    Ok(())
}

#[then(r#"every row names list "{list}", folder "{folder}" and space "{space}""#)]
fn every_row_names_containers(
    world: &TaskReportWorld,
    list: String,
    folder: String,
    space: String,
) -> Result<(), eyre::Report> {
    for row in world.rows()? {
        if row.list_name != list || row.folder_name != folder || row.space_name != space {
            return Err(eyre::eyre!(
                "row for task {} names {}/{}/{}",
                row.task_id,
                row.list_name,
                row.folder_name,
                row.space_name
            ));
        }
    }
    Ok(())
}

#[then("row {index:usize} has no group")]
fn row_has_no_group(world: &TaskReportWorld, index: usize) -> Result<(), eyre::Report> {
    let row = world.row(index)?;
    if let Some(group) = &row.group {
        return Err(eyre::eyre!("row {index}: expected no group, found {group}"));
    }
    Ok(())
}

#[then(r#"row {index:usize} has type "{type_name}""#)]
fn row_has_type(
    world: &TaskReportWorld,
    index: usize,
    type_name: String,
) -> Result<(), eyre::Report> {
    let row = world.row(index)?;
    if row.task_type.as_deref() != Some(type_name.as_str()) {
        return Err(eyre::eyre!(
            "row {index}: expected type {type_name}, found {:?}",
            row.task_type
        ));
    }
    Ok(())
}

#[then(r#"the report fails because space "{space}" is unknown"#)]
fn report_fails_for_unknown_space(
    world: &TaskReportWorld,
    space: String,
) -> Result<(), eyre::Report> {
    let result = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no report generated in scenario world"))?;
    match result {
        Err(ReportError::Source(TaskSourceError::UnknownSpace(id))) if id.as_str() == space => {
            Ok(())
        }
        other => Err(eyre::eyre!("expected unknown space {space}, got {other:?}")),
    }
}
