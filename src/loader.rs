//! Loading of module descriptions and seed lists.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use recovery_types::{ModuleDef, TypeGraph};

/// A top-level correspondence found by the type-matching stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Full name in the renamed module.
    pub renamed: String,
    /// Full name in the reference module.
    pub reference: String,
    #[serde(default)]
    pub score: f64,
}

pub fn read_module(path: &Path) -> Result<TypeGraph> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let module: ModuleDef =
        serde_json::from_str(&text).with_context(|| format!("parse module {}", path.display()))?;
    let graph = TypeGraph::from_module(module)
        .with_context(|| format!("build type graph for {}", path.display()))?;
    tracing::info!(module = %graph.name(), types = graph.len(), "loaded {}", path.display());
    Ok(graph)
}

pub fn read_seeds(path: &Path) -> Result<Vec<Seed>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse seeds {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_module() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("module.json");
        fs::write(
            &path,
            r#"{"name": "Game.dll", "types": [{"namespace": "Game", "name": "Player",
                "nested_types": [{"name": "Stats"}]}]}"#,
        )
        .unwrap();

        let graph = read_module(&path).unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.find("Game.Player/Stats").is_some());
    }

    #[test]
    fn test_read_module_reports_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dup.json");
        fs::write(
            &path,
            r#"{"name": "Dup.dll", "types": [{"name": "A"}, {"name": "A"}]}"#,
        )
        .unwrap();

        let err = read_module(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("duplicate type `A`"));
    }

    #[test]
    fn test_read_seeds_default_score() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seeds.json");
        fs::write(
            &path,
            r#"[{"renamed": "ABCDEFGHIJK", "reference": "Game.Player", "score": 3.5},
                {"renamed": "LMNOPQRSTUV", "reference": "Game.Hud"}]"#,
        )
        .unwrap();

        let seeds = read_seeds(&path).unwrap();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].score, 3.5);
        assert_eq!(seeds[1].score, 0.0);
        assert_eq!(seeds[1].reference, "Game.Hud");
    }

    #[test]
    fn test_read_seeds_missing_file() {
        let err = read_seeds(Path::new("/nonexistent/seeds.json")).unwrap_err();
        assert!(err.to_string().contains("read /nonexistent/seeds.json"));
    }
}
