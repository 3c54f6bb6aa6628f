//! Fixed clock and sample runs.

use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::json;
use tracegrid_engine::{RenderContext, Viewer};
use tracegrid_types::{Feedback, Run};

use crate::RunBuilder;

/// 2024-03-02 15:00:00 UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 2, 15, 0, 0)
        .single()
        .expect("valid fixture time")
}

/// UTC viewer in `en_US` whose clock is [`now`]
pub fn viewer() -> Viewer {
    Viewer::new(now(), Tz::UTC, chrono::Locale::en_US)
}

pub fn viewer_in(tz: Tz) -> Viewer {
    Viewer::new(now(), tz, chrono::Locale::en_US)
}

pub fn context() -> RenderContext {
    RenderContext::new(viewer())
}

/// A three-run conversation: `conv-root` with two children
///
/// Only `conv-root` and `conv-b` carry feedback.
pub fn conversation() -> Vec<Run> {
    let start = now() - Duration::minutes(30);
    vec![
        RunBuilder::new("conv-root")
            .run_type("chat")
            .name("support-bot")
            .created_at(start)
            .duration_ms(4_200)
            .status("success")
            .tags(&["prod", "support"])
            .cost(0.0042)
            .user("u-42", "Ada Lovelace")
            .input(json!([{ "role": "user", "content": "Where is my order?" }]))
            .output(json!({ "role": "assistant", "content": "It ships tomorrow." }))
            .feedback(Feedback::thumbs_up())
            .enrichment("sentiment", json!(0.8))
            .enrichment("topics", json!(["shipping", "orders"]))
            .build(),
        RunBuilder::new("conv-a")
            .name("retrieve")
            .created_at(start + Duration::seconds(1))
            .duration_ms(800)
            .status("success")
            .parent("conv-root")
            .parent_feedback(Feedback::thumbs_up())
            .cost(0.0001)
            .build(),
        RunBuilder::new("conv-b")
            .name("answer")
            .created_at(start + Duration::seconds(2))
            .duration_ms(2_500)
            .status("error")
            .parent("conv-root")
            .error(json!({ "message": "rate limited" }))
            .feedback(Feedback::thumbs_down().with_comment("too slow"))
            .enrichment("pii", json!("soft"))
            .build(),
    ]
}

/// A run that has not ended yet
pub fn open_run(id: &str) -> Run {
    RunBuilder::new(id).name("streaming").build()
}

/// Write `runs` as a JSON array to `path`
pub fn write_runs(path: &Path, runs: &[Run]) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(runs)?)?;
    Ok(())
}
