//! Loading pipeline run manifests into match candidates.

use dispatch_core::{Candidate, Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const PIPELINE_RUN_KIND: &str = "PipelineRun";

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    generate_name: Option<String>,
    #[serde(default)]
    annotations: BTreeMap<String, String>,
}

/// Load every PipelineRun from the YAML files in `dir`.
///
/// Files are read in name order and documents in file order, which is the
/// priority the matcher sees.
pub fn load_candidates(dir: &Path, prefix: &str) -> Result<Vec<Candidate>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("yaml") | Some("yml")
                )
        })
        .collect();
    files.sort();

    let mut candidates = Vec::new();
    for file in files {
        let contents = std::fs::read_to_string(&file)?;
        let parsed = parse_manifests(&contents, prefix)
            .map_err(|e| Error::InvalidManifest(format!("{}: {}", file.display(), e)))?;
        candidates.extend(parsed);
    }
    Ok(candidates)
}

/// Parse a (possibly multi-document) YAML string into candidates.
pub fn parse_manifests(contents: &str, prefix: &str) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    for document in serde_yaml::Deserializer::from_str(contents) {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        let manifest: Manifest = serde_yaml::from_value(value)?;
        if manifest.kind.as_deref() != Some(PIPELINE_RUN_KIND) {
            continue;
        }

        let metadata = manifest.metadata;
        let name = metadata
            .generate_name
            .or(metadata.name)
            .ok_or_else(|| Error::InvalidManifest("PipelineRun without a name".to_string()))?;
        candidates.push(Candidate::from_annotations(name, prefix, metadata.annotations));
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::annotations::DEFAULT_ANNOTATION_PREFIX;
    use pretty_assertions::assert_eq;

    const PUSH_RUN: &str = r#"
apiVersion: tekton.dev/v1beta1
kind: PipelineRun
metadata:
  generateName: push-
  annotations:
    pipelinesascode.tekton.dev/on-event: "[push]"
    pipelinesascode.tekton.dev/on-target-branch: "[main]"
spec:
  pipelineRef:
    name: build
"#;

    #[test]
    fn test_parse_single_document() {
        let candidates = parse_manifests(PUSH_RUN, DEFAULT_ANNOTATION_PREFIX).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "push-");
        assert_eq!(candidates[0].annotations.on_event.as_deref(), Some("[push]"));
        assert_eq!(candidates[0].annotations.on_target_branch.as_deref(), Some("[main]"));
    }

    #[test]
    fn test_parse_multi_document_skips_other_kinds() {
        let contents = format!(
            "---\napiVersion: tekton.dev/v1beta1\nkind: Task\nmetadata:\n  name: lint\n\
             ---{}---\nkind: PipelineRun\nmetadata:\n  name: nightly\n",
            PUSH_RUN
        );
        let names: Vec<_> = parse_manifests(&contents, DEFAULT_ANNOTATION_PREFIX)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["push-", "nightly"]);
    }

    #[test]
    fn test_unnamed_pipeline_run_is_invalid() {
        let err = parse_manifests("kind: PipelineRun\nmetadata: {}\n", DEFAULT_ANNOTATION_PREFIX)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidManifest(_)));
    }

    #[test]
    fn test_load_candidates_in_file_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("b-pr.yaml"),
            "kind: PipelineRun\nmetadata:\n  generateName: pr-\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("a-push.yml"), PUSH_RUN).unwrap();
        std::fs::write(dir.path().join("README.md"), "# not a manifest").unwrap();

        let names: Vec<_> = load_candidates(dir.path(), DEFAULT_ANNOTATION_PREFIX)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["push-", "pr-"]);
    }

    #[test]
    fn test_load_reports_broken_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("broken.yaml"), "kind: [unclosed").unwrap();

        let err = load_candidates(dir.path(), DEFAULT_ANNOTATION_PREFIX).unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }
}
