use std::collections::HashMap;
use std::path::Path;

use tracegrid_engine::{FetchError, RelatedRunsSource};
use tracegrid_types::{Run, parse_runs};

use crate::{Error, Result};

/// Read a run list (bare array or `{"data": [...]}`) from disk
pub fn load_runs(path: &Path) -> Result<Vec<Run>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_runs(&content).map_err(|source| Error::Runs {
        path: path.to_path_buf(),
        source,
    })
}

/// Related runs from a local export
///
/// Two runs are related when following `parentRunId` links from each ends at
/// the same root run. Results keep file order and exclude the asked-for run.
#[derive(Debug, Clone)]
pub struct FileRunsSource {
    runs: Vec<Run>,
    /// Root id for each run, parallel to `runs`
    roots: Vec<String>,
    index: HashMap<String, usize>,
}

impl FileRunsSource {
    pub fn new(runs: Vec<Run>) -> Self {
        let parents: HashMap<&str, &str> = runs
            .iter()
            .filter_map(|run| {
                run.parent_run_id
                    .as_deref()
                    .map(|parent| (run.id.as_str(), parent))
            })
            .collect();
        let roots = runs
            .iter()
            .map(|run| root_of(&parents, &run.id).to_string())
            .collect();
        let index = runs
            .iter()
            .enumerate()
            .map(|(idx, run)| (run.id.clone(), idx))
            .collect();

        Self { runs, roots, index }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(load_runs(path)?))
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

/// Topmost ancestor reachable through `parentRunId`, cycle-safe
fn root_of<'a>(parents: &HashMap<&'a str, &'a str>, run_id: &'a str) -> &'a str {
    let mut current = run_id;
    let mut hops = 0;
    while let Some(parent) = parents.get(current) {
        current = *parent;
        hops += 1;
        if hops > parents.len() {
            break;
        }
    }
    current
}

impl RelatedRunsSource for FileRunsSource {
    fn fetch_related(&self, run_id: &str) -> std::result::Result<Vec<Run>, FetchError> {
        let Some(&idx) = self.index.get(run_id) else {
            return Err(FetchError::NotFound(run_id.to_string()));
        };

        let root = &self.roots[idx];
        Ok(self
            .runs
            .iter()
            .zip(&self.roots)
            .filter(|(run, run_root)| run.id != run_id && *run_root == root)
            .map(|(run, _)| run.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracegrid_testing::{RunBuilder, fixtures};

    fn ids(runs: &[Run]) -> Vec<&str> {
        runs.iter().map(|run| run.id.as_str()).collect()
    }

    #[test]
    fn test_related_share_a_root() {
        let mut runs = fixtures::conversation();
        runs.push(RunBuilder::new("grandchild").parent("conv-b").build());
        runs.push(RunBuilder::new("stranger").build());
        let source = FileRunsSource::new(runs);

        let related = source.fetch_related("conv-root").unwrap();
        assert_eq!(ids(&related), vec!["conv-a", "conv-b", "grandchild"]);

        let related = source.fetch_related("grandchild").unwrap();
        assert_eq!(ids(&related), vec!["conv-root", "conv-a", "conv-b"]);

        assert!(source.fetch_related("stranger").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_run_is_not_found() {
        let source = FileRunsSource::new(fixtures::conversation());
        assert!(matches!(
            source.fetch_related("ghost"),
            Err(FetchError::NotFound(id)) if id == "ghost"
        ));
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let runs = vec![
            RunBuilder::new("a").parent("b").build(),
            RunBuilder::new("b").parent("a").build(),
        ];
        let source = FileRunsSource::new(runs);
        assert!(source.fetch_related("a").is_ok());
    }

    #[test]
    fn test_roots_resolve_once_per_run() {
        let mut runs = vec![RunBuilder::new("root").build()];
        let mut parent = "root".to_string();
        for depth in 1..50 {
            let id = format!("n{depth}");
            runs.push(RunBuilder::new(&id).parent(&parent).build());
            parent = id;
        }
        let source = FileRunsSource::new(runs);

        assert!(source.roots.iter().all(|root| root == "root"));
        assert_eq!(source.fetch_related("n49").unwrap().len(), 49);
    }

    #[test]
    fn test_load_runs_accepts_api_page() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("page.json");
        std::fs::write(
            &path,
            r#"{"data": [{"id": "r1", "createdAt": "2024-03-02T14:55:00Z", "type": "llm"}]}"#,
        )?;

        let runs = load_runs(&path)?;
        assert_eq!(ids(&runs), vec!["r1"]);
        Ok(())
    }

    #[test]
    fn test_load_runs_skips_malformed_rows() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("mixed.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "r1", "createdAt": "2024-03-02T14:55:00Z", "tags": "prod"},
                {"name": "no id"},
                {"id": "r2", "createdAt": "2024-03-02T14:56:00Z", "cost": 0.5}
            ]"#,
        )?;

        let runs = load_runs(&path)?;
        assert_eq!(ids(&runs), vec!["r1", "r2"]);
        assert_eq!(runs[0].tags, None);
        assert_eq!(runs[1].cost, Some(0.5));
        Ok(())
    }

    #[test]
    fn test_load_runs_reports_path() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "42")?;

        let err = load_runs(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"), "got {err}");
        Ok(())
    }
}
