//! When steps for task report BDD scenarios.

use super::world::{TaskReportWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskflat::report::domain::{ListId, TaskFilters};

#[when(r#"the report for list "{list}" is generated for tasks created after "{date}""#)]
fn generate_report(
    world: &mut TaskReportWorld,
    list: String,
    date: String,
) -> Result<(), eyre::Report> {
    let service = world.service(&list)?;
    let mut ctx = run_async(service.open_session()).wrap_err("open report session")?;
    let filters = TaskFilters::new().created_after(date);
    let result = run_async(service.task_rows(&mut ctx, &ListId::new(list), &filters));
    world.last_report = Some(result);
    Ok(())
}
