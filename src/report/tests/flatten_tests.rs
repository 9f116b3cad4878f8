//! Tests for hierarchy resolution and task flattening.

use rstest::rstest;
use serde_json::json;

use super::fixtures::{assigned, config, groups, placed, source, task};
use crate::report::{
    adapters::memory::{InMemoryTaskSource, LookupCounts},
    domain::{
        CustomField, FlatTaskRow, GroupMembershipIndex, ListId, MemberId, ReportConfig,
        TypeOptionsSource,
    },
    ports::{MockTaskSource, TaskSourceError},
    services::{ReportError, ResolutionContext},
};

fn context(config: &ReportConfig) -> ResolutionContext {
    let index = GroupMembershipIndex::build(
        &groups(),
        &config.excluded_group_name,
        config.membership_tie_break,
    );
    ResolutionContext::new(index, config)
}

fn without_assignee(row: &FlatTaskRow) -> FlatTaskRow {
    FlatTaskRow {
        assignee_id: None,
        assignee: None,
        group: None,
        ..row.clone()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_assignee_gets_an_otherwise_identical_row(
    source: InMemoryTaskSource,
    config: ReportConfig,
) {
    let mut ctx = context(&config);
    let raw = assigned(task("a"), &[(7, "alice"), (8, "bob")]);

    let rows = ctx
        .flatten_task(&source, &raw)
        .await
        .expect("flattening succeeds");

    let [first, second] = rows.as_slice() else {
        panic!("expected two rows, got {}", rows.len());
    };
    assert_eq!(without_assignee(first), without_assignee(second));
    assert_eq!(first.assignee_id, Some(MemberId::new(7)));
    assert_eq!(first.assignee.as_deref(), Some("alice"));
    assert_eq!(first.group.as_deref(), Some("Content"));
    assert_eq!(second.assignee_id, Some(MemberId::new(8)));
    assert_eq!(second.group.as_deref(), Some("Design"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigned_task_yields_single_row_without_assignee(
    source: InMemoryTaskSource,
    config: ReportConfig,
) {
    let mut ctx = context(&config);

    let rows = ctx
        .flatten_task(&source, &task("a"))
        .await
        .expect("flattening succeeds");

    let [row] = rows.as_slice() else {
        panic!("expected one row, got {}", rows.len());
    };
    assert_eq!(row.assignee_id, None);
    assert_eq!(row.assignee, None);
    assert_eq!(row.group, None);
    assert_eq!(row.list_name, "Posts");
    assert_eq!(row.folder_name, "Clients");
    assert_eq!(row.space_name, "Marketing");
    assert_eq!(row.task_closed, "-");
    assert_eq!(row.task_start, "-");
    assert_eq!(row.task_due.len(), "YYYY-MM-DD".len());
    assert_eq!(row.task_created.len(), "YYYY-MM-DD HH:MM:SS".len());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_outside_every_group_has_no_group(
    source: InMemoryTaskSource,
    config: ReportConfig,
) {
    let mut ctx = context(&config);
    let raw = assigned(task("a"), &[(9, "ranger"), (404, "guest")]);

    let rows = ctx
        .flatten_task(&source, &raw)
        .await
        .expect("flattening succeeds");

    assert!(rows.iter().all(|row| row.group.is_none()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn custom_fields_are_projected_into_rows(source: InMemoryTaskSource) {
    let config = ReportConfig::default().with_type_options_source(TypeOptionsSource::SameField);
    let mut ctx = context(&config);
    let mut raw = task("a");
    raw.custom_fields = vec![
        CustomField::new("Job Number", Some(json!("J-12"))),
        CustomField::new("Type", Some(json!(0))).with_options(["Post", "Story"]),
        CustomField::new("FB Post URL", Some(json!("https://example.com/p/12"))),
    ];

    let rows = ctx
        .flatten_task(&source, &raw)
        .await
        .expect("flattening succeeds");

    let row = rows.first().expect("one row");
    assert_eq!(row.task_type.as_deref(), Some("Post"));
    assert_eq!(row.job_no, Some(json!("J-12")));
    assert_eq!(row.post_url, Some(json!("https://example.com/p/12")));
    assert_eq!(row.submit_date, "-");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_containers_are_looked_up_once(source: InMemoryTaskSource, config: ReportConfig) {
    let mut ctx = context(&config);
    let tasks = vec![
        task("a"),
        placed(task("b"), "l2", "f1", "s1"),
        task("c"),
        placed(task("d"), "l2", "f1", "s1"),
    ];

    let rows = ctx
        .flatten_tasks(&source, &tasks)
        .await
        .expect("flattening succeeds");

    let names: Vec<&str> = rows.iter().map(|row| row.list_name.as_str()).collect();
    assert_eq!(names, ["Posts", "Ads", "Posts", "Ads"]);
    assert_eq!(
        source.lookup_counts(),
        LookupCounts {
            list: 2,
            folder: 1,
            space: 1,
        }
    );
    assert_eq!(ctx.hierarchy().cached_counts(), (2, 1, 1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_and_assignee_order_is_preserved(source: InMemoryTaskSource, config: ReportConfig) {
    let mut ctx = context(&config);
    let tasks = vec![
        assigned(task("a"), &[(8, "bob"), (7, "alice")]),
        task("b"),
        assigned(task("c"), &[(7, "alice")]),
    ];

    let rows = ctx
        .flatten_tasks(&source, &tasks)
        .await
        .expect("flattening succeeds");

    let order: Vec<(&str, Option<&str>)> = rows
        .iter()
        .map(|row| (row.task_id.as_str(), row.assignee.as_deref()))
        .collect();
    assert_eq!(
        order,
        [
            ("a", Some("bob")),
            ("a", Some("alice")),
            ("b", None),
            ("c", Some("alice")),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_list_fails_the_whole_batch(source: InMemoryTaskSource, config: ReportConfig) {
    let mut ctx = context(&config);
    let tasks = vec![task("a"), placed(task("b"), "missing", "f1", "s1")];

    let result = ctx.flatten_tasks(&source, &tasks).await;

    assert!(matches!(
        result,
        Err(ReportError::Source(TaskSourceError::UnknownList(ref id))) if id.as_str() == "missing"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lenient_batch_records_failures_and_keeps_other_rows(
    source: InMemoryTaskSource,
    config: ReportConfig,
) {
    let mut ctx = context(&config);
    let tasks = vec![
        task("a"),
        placed(task("b"), "l1", "f1", "nowhere"),
        task("c"),
    ];

    let batch = ctx.flatten_tasks_lenient(&source, &tasks).await;

    let ids: Vec<&str> = batch.rows.iter().map(|row| row.task_id.as_str()).collect();
    assert_eq!(ids, ["a", "c"]);
    assert_eq!(batch.failures.len(), 1);
    let failure = batch.failures.first().expect("one failure");
    assert_eq!(failure.task_id.as_str(), "b");
    assert!(matches!(
        failure.error,
        ReportError::Source(TaskSourceError::UnknownSpace(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_lookups_are_retried_not_cached(config: ReportConfig) {
    let sparse = InMemoryTaskSource::new()
        .with_folder_name("f1", "Clients")
        .with_space_name("s1", "Marketing");
    let mut ctx = context(&config);

    let first = ctx.flatten_task(&sparse, &task("a")).await;
    let second = ctx.flatten_task(&sparse, &task("b")).await;

    assert!(first.is_err());
    assert!(second.is_err());
    assert_eq!(sparse.lookup_counts().list, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolver_queries_source_once_per_container(config: ReportConfig) {
    let mut mock = MockTaskSource::new();
    mock.expect_resolve_list_name()
        .times(1)
        .returning(|_| Ok("Posts".to_owned()));
    mock.expect_resolve_folder_name()
        .times(1)
        .returning(|_| Ok("Clients".to_owned()));
    mock.expect_resolve_space_name()
        .times(1)
        .returning(|_| Ok("Marketing".to_owned()));
    let mut ctx = context(&config);

    let rows = ctx
        .flatten_tasks(&mock, &[task("a"), task("b"), task("c")])
        .await
        .expect("flattening succeeds");

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.list_id == ListId::new("l1")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn zero_capacity_cache_still_resolves(source: InMemoryTaskSource) {
    let config = ReportConfig::default().with_hierarchy_cache_capacity(0);
    let mut ctx = context(&config);

    let rows = ctx
        .flatten_tasks(&source, &[task("a"), placed(task("b"), "l2", "f1", "s1"), task("c")])
        .await
        .expect("flattening succeeds");

    assert_eq!(rows.len(), 3);
    assert_eq!(source.lookup_counts().list, 3);
}
