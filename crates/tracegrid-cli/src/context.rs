//! Resolves CLI flags against the config file into the pieces a table needs.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracegrid_engine::columns::{ColumnChoice, TableOptions};
use tracegrid_engine::{
    AnalyticsSink, RelatedRuns, RelatedRunsSource, RenderContext, SessionAnalytics, SortSpec,
    Viewer,
};
use tracegrid_runtime::{Config, FileRunsSource, HttpRunsSource};
use tracegrid_types::Run;

use crate::args::TableArgs;
use crate::types::DurationArg;

pub struct ExecutionContext {
    config: Config,
    analytics: Arc<SessionAnalytics>,
}

impl ExecutionContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            analytics: Arc::new(SessionAnalytics::new()),
        }
    }

    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path).context("loading config")?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn analytics(&self) -> &SessionAnalytics {
        &self.analytics
    }

    /// `--columns` replaces the configured list; `--enrichment` kinds append
    pub fn choices(&self, args: &TableArgs) -> Result<Vec<ColumnChoice>> {
        let mut choices = if args.columns.is_empty() {
            self.config.table.choices()?
        } else {
            args.columns
                .iter()
                .map(|name| name.parse::<ColumnChoice>())
                .collect::<std::result::Result<Vec<_>, _>>()?
        };

        for kind in &args.enrichments {
            let choice = ColumnChoice::Enrichment(kind.clone());
            if !choices.contains(&choice) {
                choices.push(choice);
            }
        }
        Ok(choices)
    }

    pub fn related_enabled(&self, args: &TableArgs) -> bool {
        args.related
            || args.related_file.is_some()
            || args.api_url.is_some()
            || self.config.table.related_runs
    }

    /// Pick the store related runs are read from
    ///
    /// `--related-file`, then `--api-url`, then `[api] base_url`, then the
    /// loaded runs themselves.
    pub fn related_source(
        &self,
        args: &TableArgs,
        runs: &[Run],
    ) -> Result<Arc<dyn RelatedRunsSource>> {
        if let Some(path) = &args.related_file {
            tracing::debug!(path = %path.display(), "related runs from file");
            return Ok(Arc::new(FileRunsSource::open(path)?));
        }

        let api = &self.config.api;
        if let Some(url) = &args.api_url {
            let key = std::env::var(&api.api_key_env).ok().filter(|k| !k.is_empty());
            let mut source =
                HttpRunsSource::new(url, key, Duration::from_secs(api.timeout_secs))?;
            if let Some(project) = &api.project_id {
                source = source.with_project(project.clone());
            }
            return Ok(Arc::new(source));
        }

        if api.base_url.is_some() {
            return Ok(Arc::new(HttpRunsSource::from_config(api)?));
        }

        Ok(Arc::new(FileRunsSource::new(runs.to_vec())))
    }

    pub fn table_options(
        &self,
        args: &TableArgs,
        related: Option<Arc<dyn RelatedRuns>>,
    ) -> TableOptions {
        let duration_mode = match args.duration {
            Some(DurationArg::Compact) => tracegrid_engine::columns::DurationMode::Compact,
            Some(DurationArg::Full) => tracegrid_engine::columns::DurationMode::Full,
            None => self.config.display.duration.into(),
        };

        TableOptions {
            duration_mode,
            related,
            ..TableOptions::default()
        }
    }

    pub fn viewer(&self, args: &TableArgs) -> Viewer {
        let display = &self.config.display;
        Viewer::with_overrides(
            args.locale.as_deref().or(display.locale.as_deref()),
            args.timezone.as_deref().or(display.timezone.as_deref()),
        )
    }

    pub fn render_context(&self, args: &TableArgs) -> RenderContext {
        let analytics: Arc<dyn AnalyticsSink> = self.analytics.clone();
        let mut ctx = RenderContext::new(self.viewer(args)).with_analytics(analytics);
        ctx.redactor = if args.mask {
            Box::new(tracegrid_engine::MaskRedactor)
        } else {
            self.config.display.redactor()
        };
        ctx
    }

    pub fn sort(&self, args: &TableArgs) -> Result<Option<SortSpec>> {
        args.sort
            .as_deref()
            .map(|raw| raw.parse::<SortSpec>())
            .transpose()
            .map_err(Into::into)
    }
}
