use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use tracegrid_engine::columns::{
    ColumnChoice, DurationMode, TableOptions, aggregated_feedback_column, build_table,
    cost_column, duration_column, enrichment_column, feedback_column, name_column, tags_column,
    time_column, TimeField, HAS_TAGS_EVENT,
};
use tracegrid_engine::{
    BlockingRelatedRuns, Cell, Column, FetchError, RenderContext, SortSpec, Table,
};
use tracegrid_testing::{FixedLookup, RecordingAnalytics, RunBuilder, StubSource, fixtures};
use tracegrid_types::Feedback;

#[test]
fn test_unfinished_run_duration_is_blank_in_both_modes() {
    let ctx = fixtures::context();
    let open = fixtures::open_run("open");

    for mode in [DurationMode::Compact, DurationMode::Full] {
        assert_eq!(duration_column(mode).cell(&open, &ctx), Cell::Empty);
    }
}

#[test]
fn test_time_column_switches_at_local_midnight() {
    let paris = chrono_tz::Europe::Paris;
    // 2024-03-02 15:00 UTC is 16:00 in Paris
    let ctx = RenderContext::new(fixtures::viewer_in(paris));
    let column = time_column(TimeField::CreatedAt, "Time");

    // 23:30 UTC on Mar 1 is 00:30 on Mar 2 in Paris: today
    let just_after = RunBuilder::new("a")
        .created_at(Utc.with_ymd_and_hms(2024, 3, 1, 23, 30, 0).unwrap())
        .build();
    // 22:30 UTC on Mar 1 is 23:30 on Mar 1 in Paris: yesterday
    let just_before = RunBuilder::new("b")
        .created_at(Utc.with_ymd_and_hms(2024, 3, 1, 22, 30, 0).unwrap())
        .build();

    let today = column.cell(&just_after, &ctx).plain_text();
    let yesterday = column.cell(&just_before, &ctx).plain_text();

    assert!(!today.contains("03/02/2024"), "got {today}");
    assert!(yesterday.contains("03/01/2024"), "got {yesterday}");
}

#[test]
fn test_sentiment_thresholds() {
    let ctx = fixtures::context();
    let column = enrichment_column("sentiment");

    let tooltip = |score: f64| {
        let run = RunBuilder::new("r").enrichment("sentiment", json!(score)).build();
        column.cell(&run, &ctx).tooltip().map(str::to_string)
    };

    assert_eq!(tooltip(0.5).as_deref(), Some("Sentiment: neutral"));
    assert_eq!(tooltip(0.500001).as_deref(), Some("Sentiment: positive"));
    assert_eq!(tooltip(-0.5).as_deref(), Some("Sentiment: neutral"));
    assert_eq!(tooltip(-0.500001).as_deref(), Some("Sentiment: negative"));
}

#[test]
fn test_pii_branches() {
    let ctx = fixtures::context();
    let column = enrichment_column("pii");

    let glyph = |value: serde_json::Value| {
        let run = RunBuilder::new("r").enrichment("pii", value).build();
        column.cell(&run, &ctx).plain_text()
    };

    assert_eq!(glyph(json!("soft")), "⚠️");
    assert_eq!(glyph(json!("hard")), "❌");
    assert_eq!(glyph(json!("none")), "❎");
    assert_eq!(glyph(json!(false)), "❎");
}

#[test]
fn test_topic_colours_are_stable_across_rows() {
    let ctx = fixtures::context();
    let column = enrichment_column("topics");

    let first = RunBuilder::new("a")
        .enrichment("topics", json!(["billing", "refunds"]))
        .build();
    let second = RunBuilder::new("b")
        .enrichment("topics", json!(["refunds", "billing"]))
        .build();

    let colours = |cell: Cell| -> Vec<(String, tracegrid_engine::BadgeColor)> {
        let Cell::Tooltip { content, .. } = cell else {
            panic!("expected tooltip, got {cell:?}");
        };
        let Cell::Group { items } = *content else {
            panic!("expected group");
        };
        let mut pairs: Vec<_> = items
            .into_iter()
            .map(|item| match item {
                Cell::Badge(badge) => (badge.text, badge.color),
                other => panic!("expected badge, got {other:?}"),
            })
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    };

    assert_eq!(
        colours(column.cell(&first, &ctx)),
        colours(column.cell(&second, &ctx))
    );
}

#[test]
fn test_simple_feedback_cases() {
    let ctx = fixtures::context();
    let column = feedback_column();

    let own = RunBuilder::new("a")
        .feedback(Feedback::thumbs_up())
        .parent_feedback(Feedback::thumbs_down())
        .build();
    let inherited = RunBuilder::new("b")
        .parent_feedback(Feedback::thumbs_down())
        .build();
    let none = RunBuilder::new("c").build();

    assert_eq!(column.cell(&own, &ctx).plain_text(), "👍");
    assert_eq!(column.cell(&inherited, &ctx).plain_text(), "👎 (parent)");
    assert_eq!(column.cell(&none, &ctx), Cell::Empty);
}

#[test]
fn test_aggregated_feedback_includes_related_runs_with_feedback() {
    let ctx = fixtures::context();
    let runs = fixtures::conversation();
    let root = &runs[0];

    let source = StubSource::new().with_related("conv-root", runs[1..].to_vec());
    let column = aggregated_feedback_column(Arc::new(BlockingRelatedRuns::new(source)));

    assert_eq!(
        column.cell(root, &ctx).plain_text(),
        "👍 👎 💬 too slow"
    );
}

#[test]
fn test_aggregated_feedback_fails_open() {
    let ctx = fixtures::context();
    let row = RunBuilder::new("r1")
        .parent_feedback(Feedback::thumbs_up())
        .build();

    let source =
        StubSource::new().with_failure("r1", FetchError::Transport("timed out".to_string()));
    let column = aggregated_feedback_column(Arc::new(BlockingRelatedRuns::new(source)));

    assert_eq!(column.cell(&row, &ctx), feedback_column().cell(&row, &ctx));
    assert_eq!(
        aggregated_feedback_column(Arc::new(FixedLookup::pending())).cell(&row, &ctx),
        feedback_column().cell(&row, &ctx)
    );
}

#[test]
fn test_name_column_colours_follow_status() {
    let ctx = fixtures::context();
    let column = name_column("Name");

    let rows = [
        RunBuilder::new("a").name("ok").status("success").build(),
        RunBuilder::new("b").name("bad").status("error").build(),
        RunBuilder::new("c").name("other").status("queued").build(),
    ];
    let cells: Vec<Cell> = rows.iter().map(|row| column.cell(row, &ctx)).collect();

    insta::assert_json_snapshot!(cells, @r#"
    [
      {
        "type": "badge",
        "text": "ok",
        "color": {
          "kind": "tone",
          "value": "positive"
        },
        "variant": "outline"
      },
      {
        "type": "badge",
        "text": "bad",
        "color": {
          "kind": "tone",
          "value": "negative"
        },
        "variant": "outline"
      },
      {
        "type": "badge",
        "text": "other",
        "color": {
          "kind": "tone",
          "value": "neutral"
        },
        "variant": "outline"
      }
    ]
    "#);
}

#[test]
fn test_cost_order_is_total() {
    let table = Table::builder().column(cost_column()).build().unwrap();
    let mut runs = vec![
        RunBuilder::new("none-1").build(),
        RunBuilder::new("five").cost(5.0).build(),
        RunBuilder::new("two").cost(2.0).build(),
        RunBuilder::new("none-2").build(),
    ];

    table.sort_runs(&mut runs, &SortSpec::asc("cost")).unwrap();
    let ids: Vec<&str> = runs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["none-1", "none-2", "two", "five"]);

    table.sort_runs(&mut runs, &SortSpec::desc("cost")).unwrap();
    let ids: Vec<&str> = runs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["five", "two", "none-1", "none-2"]);
}

#[test]
fn test_tags_event_fires_for_tagged_rows_only() {
    let analytics = Arc::new(RecordingAnalytics::new());
    let ctx = fixtures::context().with_analytics(analytics.clone());
    let column = tags_column();

    column.cell(&RunBuilder::new("a").build(), &ctx);
    column.cell(&RunBuilder::new("b").tags(&[]).build(), &ctx);
    assert_eq!(analytics.count(HAS_TAGS_EVENT), 0);

    column.cell(&RunBuilder::new("c").tags(&["prod"]).build(), &ctx);
    column.cell(&RunBuilder::new("d").tags(&["dev"]).build(), &ctx);
    assert_eq!(analytics.count(HAS_TAGS_EVENT), 2);
}

#[test]
fn test_catalog_table_renders_conversation() {
    let options = TableOptions {
        related: Some(Arc::new(FixedLookup::resolved(Vec::new()))),
        ..TableOptions::default()
    };
    let choices = [
        ColumnChoice::Name,
        ColumnChoice::Status,
        ColumnChoice::Cost,
        ColumnChoice::Enrichment("sentiment".to_string()),
    ];
    let table = build_table(&choices, &options).unwrap();
    let rows = table.render(&fixtures::conversation(), &fixtures::context());

    let texts: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells.iter().map(Cell::plain_text).collect())
        .collect();
    assert_eq!(
        texts,
        vec![
            vec!["support-bot", "success", "$0.00420", "🙂 0.8"],
            vec!["retrieve", "success", "$0.00010", ""],
            vec!["answer", "error", "", ""],
        ]
    );
}

#[test]
fn test_open_runs_trail_duration_sort() {
    let table = Table::builder()
        .column(duration_column(DurationMode::Full))
        .build()
        .unwrap();
    let start = fixtures::now() - Duration::hours(1);
    let mut runs = vec![
        fixtures::open_run("open"),
        RunBuilder::new("long").created_at(start).duration_ms(60_000).build(),
        RunBuilder::new("short").created_at(start).duration_ms(10).build(),
    ];

    table.sort_runs(&mut runs, &SortSpec::desc("duration")).unwrap();
    let ids: Vec<&str> = runs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["long", "short", "open"]);
}
