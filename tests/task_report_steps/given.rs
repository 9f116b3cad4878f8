//! Given steps for task report BDD scenarios.

use super::world::{TaskReportWorld, scenario_task};
use rstest_bdd_macros::given;
use serde_json::json;
use taskflat::report::domain::{CustomField, MemberRef};

#[given(r#"a workspace "{name}" with team id "{team}""#)]
fn workspace_with_team(world: &mut TaskReportWorld, name: String, team: String) {
    world.source = world.source.clone().with_team(team.clone(), name.clone());
    world.config = world.config.clone().with_workspace_name(name);
    world.team_id = Some(team);
}

#[given(r#"list "{id}" is named "{name}""#)]
fn list_is_named(world: &mut TaskReportWorld, id: String, name: String) {
    world.source = world.source.clone().with_list_name(id, name);
}

#[given(r#"folder "{id}" is named "{name}""#)]
fn folder_is_named(world: &mut TaskReportWorld, id: String, name: String) {
    world.source = world.source.clone().with_folder_name(id, name);
}

#[given(r#"space "{id}" is named "{name}""#)]
fn space_is_named(world: &mut TaskReportWorld, id: String, name: String) {
    world.source = world.source.clone().with_space_name(id, name);
}

#[given(r#"a group "{group}" containing member {member:i64} "{username}""#)]
fn group_contains_member(
    world: &mut TaskReportWorld,
    group: String,
    member: i64,
    username: String,
) {
    world.add_group_member(&group, MemberRef::new(member, username));
}

#[given(r#"a task "{id}" in list "{list}", folder "{folder}" and space "{space}""#)]
fn task_in_containers(
    world: &mut TaskReportWorld,
    id: String,
    list: String,
    folder: String,
    space: String,
) {
    world
        .tasks
        .push(scenario_task(&id, &list, &folder, &space));
}

#[given(r#"task "{id}" is assigned to member {member:i64} "{username}""#)]
fn task_is_assigned(
    world: &mut TaskReportWorld,
    id: String,
    member: i64,
    username: String,
) -> Result<(), eyre::Report> {
    world
        .task_mut(&id)?
        .assignees
        .push(MemberRef::new(member, username));
    Ok(())
}

#[given(r#"task "{id}" has Type option {index:i64} of "{options}""#)]
fn task_has_type_option(
    world: &mut TaskReportWorld,
    id: String,
    index: i64,
    options: String,
) -> Result<(), eyre::Report> {
    let labels: Vec<&str> = options.split(',').map(str::trim).collect();
    world.task_mut(&id)?.custom_fields.push(
        CustomField::new("Type", Some(json!(index))).with_options(labels),
    );
    Ok(())
}
