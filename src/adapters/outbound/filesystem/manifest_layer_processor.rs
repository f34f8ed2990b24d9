use crate::image_analysis::domain::{Feature, FeatureVersion, Layer, Namespace, Version};
use crate::ports::outbound::{Datastore, LayerProcessingError, LayerProcessor, LayerRequest};
use crate::shared::security::{clean_location, validate_content_file, ContentFileError};
use async_trait::async_trait;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Detector generation recorded on every layer this processor persists.
pub const ENGINE_VERSION: i32 = 3;

/// Content of a layer manifest.
///
/// An omitted section is inherited from the parent layer, an empty one
/// clears it.
#[derive(Debug, Deserialize)]
struct LayerManifest {
    namespaces: Option<Vec<ManifestNamespace>>,
    features: Option<Vec<ManifestFeature>>,
}

#[derive(Debug, Deserialize)]
struct ManifestNamespace {
    name: String,
    version_format: String,
}

#[derive(Debug, Deserialize)]
struct ManifestFeature {
    name: String,
    namespace: String,
    version: Version,
}

/// ManifestLayerProcessor adapter reading detected layer content from JSON
///
/// The layer path points to a manifest listing the namespaces and features
/// detected in that layer. Manifests are read from the local filesystem
/// only, with the same safety checks as any other content file.
pub struct ManifestLayerProcessor {
    supported_formats: Vec<String>,
    max_manifest_bytes: u64,
}

impl ManifestLayerProcessor {
    pub fn new(supported_formats: Vec<String>, max_manifest_bytes: u64) -> Self {
        Self {
            supported_formats,
            max_manifest_bytes,
        }
    }

    fn supports(&self, format: &str) -> bool {
        self.supported_formats
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(format))
    }

    fn validate(&self, request: &LayerRequest<'_>) -> Result<(), LayerProcessingError> {
        if request.name.is_empty() || request.path.is_empty() || request.format.is_empty() {
            return Err(LayerProcessingError::BadRequest(
                "could not process a layer which does not have a name, a path or a format"
                    .to_string(),
            ));
        }

        if !self.supports(request.format) {
            return Err(LayerProcessingError::BadRequest(format!(
                "unsupported image format '{}'",
                request.format
            )));
        }

        Ok(())
    }

    fn read_manifest(&self, location: &str) -> Result<LayerManifest, LayerProcessingError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Err(LayerProcessingError::Unsupported {
                details: format!("remote layer location {}", clean_location(location)),
            });
        }

        let path = Path::new(location);
        validate_content_file(path, self.max_manifest_bytes).map_err(|e| match e {
            ContentFileError::TooLarge { size, limit, .. } => {
                LayerProcessingError::ExtractedFileTooLarge { size, limit }
            }
            other => LayerProcessingError::CouldNotExtract {
                details: other.to_string(),
            },
        })?;

        let content = fs::read_to_string(path).map_err(|e| LayerProcessingError::CouldNotExtract {
            details: format!("failed to read {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| LayerProcessingError::CouldNotExtract {
            details: format!("invalid manifest {}: {}", path.display(), e),
        })
    }

    /// Resolves detected content against what the parent already carries.
    fn build_layer(
        name: &str,
        parent: Option<&Layer>,
        manifest: LayerManifest,
    ) -> Result<Layer, LayerProcessingError> {
        let inherited_namespaces = parent.map(|p| p.namespaces.as_slice()).unwrap_or_default();
        let inherited_features = parent.map(|p| p.features.as_slice()).unwrap_or_default();

        let namespaces: Vec<Namespace> = match manifest.namespaces {
            Some(declared) => declared
                .into_iter()
                .map(|ns| Namespace::new(ns.name, ns.version_format))
                .collect(),
            None => inherited_namespaces.to_vec(),
        };

        let features = match manifest.features {
            Some(detected) => detected
                .into_iter()
                .map(|detected| -> Result<FeatureVersion, LayerProcessingError> {
                    let namespace = namespaces
                        .iter()
                        .chain(inherited_namespaces)
                        .find(|ns| ns.name == detected.namespace)
                        .cloned()
                        .ok_or_else(|| LayerProcessingError::Unsupported {
                            details: format!(
                                "feature {} belongs to unknown namespace {}",
                                detected.name, detected.namespace
                            ),
                        })?;

                    let mut feature_version = FeatureVersion::new(
                        Feature::new(detected.name, namespace),
                        detected.version,
                        name,
                    );
                    if let Some(existing) = inherited_features
                        .iter()
                        .find(|existing| existing.is_same_install(&feature_version))
                    {
                        feature_version.added_by = existing.added_by.clone();
                    }
                    Ok(feature_version)
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => {
                tracing::debug!(
                    layer = name,
                    inherited = inherited_features.len(),
                    "no features detected, inheriting the parent's"
                );
                inherited_features.to_vec()
            }
        };

        let mut layer = Layer::new(name, parent.map(|p| p.name.clone()), ENGINE_VERSION);
        layer.namespaces = namespaces;
        layer.features = features;
        Ok(layer)
    }
}

#[async_trait]
impl LayerProcessor for ManifestLayerProcessor {
    fn engine_version(&self) -> i32 {
        ENGINE_VERSION
    }

    async fn process_layer(
        &self,
        store: &dyn Datastore,
        request: LayerRequest<'_>,
    ) -> Result<(), LayerProcessingError> {
        self.validate(&request)?;

        tracing::debug!(
            layer = request.name,
            parent = request.parent.unwrap_or(""),
            location = clean_location(request.path),
            headers = ?request.headers.keys().collect::<Vec<_>>(),
            "processing layer"
        );

        match store.find_layer(request.name, false, false).await {
            Ok(existing) if existing.engine_version >= ENGINE_VERSION => {
                tracing::debug!(
                    layer = request.name,
                    engine_version = existing.engine_version,
                    "layer already processed by this engine, skipping"
                );
                return Ok(());
            }
            Ok(_) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let parent = match request.parent {
            Some(parent_name) => match store.find_layer(parent_name, true, false).await {
                Ok(parent) => Some(parent),
                Err(e) if e.is_not_found() => {
                    return Err(LayerProcessingError::BadRequest(
                        "parent layer is unknown, it must be processed first".to_string(),
                    ));
                }
                Err(e) => return Err(e.into()),
            },
            None => None,
        };

        let manifest = self.read_manifest(request.path)?;
        let layer = Self::build_layer(request.name, parent.as_ref(), manifest)?;

        tracing::debug!(
            layer = request.name,
            namespaces = layer.namespaces.len(),
            features = layer.features.len(),
            "layer processed"
        );

        store.insert_layer(layer).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::persistence::InMemoryDatastore;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn processor() -> ManifestLayerProcessor {
        ManifestLayerProcessor::new(vec!["Docker".to_string(), "ACI".to_string()], 1024)
    }

    fn write_manifest(dir: &TempDir, file: &str, content: &str) -> String {
        let path = dir.path().join(file);
        fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    fn request<'a>(
        name: &'a str,
        parent: Option<&'a str>,
        path: &'a str,
        headers: &'a HashMap<String, String>,
    ) -> LayerRequest<'a> {
        LayerRequest {
            format: "docker",
            name,
            parent,
            path,
            headers,
        }
    }

    const BASE: &str = r#"{
        "namespaces": [{"name": "debian:9", "version_format": "dpkg"}],
        "features": [
            {"name": "openssl", "namespace": "debian:9", "version": "1.1.0f-3"},
            {"name": "bash", "namespace": "debian:9", "version": "4.4-5"}
        ]
    }"#;

    #[tokio::test]
    async fn test_process_root_layer() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "base.json", BASE);
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();

        processor()
            .process_layer(&store, request("img-0", None, &path, &headers))
            .await
            .unwrap();

        let layer = store.find_layer("img-0", true, false).await.unwrap();
        assert_eq!(layer.engine_version, ENGINE_VERSION);
        assert!(layer.is_root());
        assert_eq!(layer.namespaces, vec![Namespace::new("debian:9", "dpkg")]);
        assert_eq!(layer.features.len(), 2);
        assert!(layer.features.iter().all(|fv| fv.added_by == "img-0"));
    }

    #[tokio::test]
    async fn test_child_inherits_omitted_sections_and_added_by() {
        let dir = TempDir::new().unwrap();
        let base = write_manifest(&dir, "base.json", BASE);
        let upgrade = write_manifest(
            &dir,
            "upgrade.json",
            r#"{"features": [
                {"name": "openssl", "namespace": "debian:9", "version": "1.1.0f-4"},
                {"name": "bash", "namespace": "debian:9", "version": "4.4-5"}
            ]}"#,
        );
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();
        let processor = processor();

        processor
            .process_layer(&store, request("img-0", None, &base, &headers))
            .await
            .unwrap();
        processor
            .process_layer(&store, request("img-1", Some("img-0"), &upgrade, &headers))
            .await
            .unwrap();

        let layer = store.find_layer("img-1", true, false).await.unwrap();
        assert_eq!(layer.parent.as_deref(), Some("img-0"));
        assert_eq!(layer.namespaces, vec![Namespace::new("debian:9", "dpkg")]);

        let added_by = |name: &str| {
            layer
                .features
                .iter()
                .find(|fv| fv.feature.name == name)
                .map(|fv| fv.added_by.clone())
                .unwrap()
        };
        assert_eq!(added_by("openssl"), "img-1");
        assert_eq!(added_by("bash"), "img-0");
    }

    #[tokio::test]
    async fn test_omitted_features_are_inherited() {
        let dir = TempDir::new().unwrap();
        let base = write_manifest(&dir, "base.json", BASE);
        let empty = write_manifest(&dir, "empty.json", "{}");
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();
        let processor = processor();

        processor
            .process_layer(&store, request("img-0", None, &base, &headers))
            .await
            .unwrap();
        processor
            .process_layer(&store, request("img-1", Some("img-0"), &empty, &headers))
            .await
            .unwrap();

        let layer = store.find_layer("img-1", true, false).await.unwrap();
        assert_eq!(layer.features.len(), 2);
        assert!(layer.features.iter().all(|fv| fv.added_by == "img-0"));
    }

    #[tokio::test]
    async fn test_sentinel_feature_version_is_unbounded() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "layer.json",
            r##"{"namespaces": [{"name": "debian:9", "version_format": "dpkg"}],
                "features": [{"name": "tzdata", "namespace": "debian:9", "version": "#MAXV#"}]}"##,
        );
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();

        processor()
            .process_layer(&store, request("img-0", None, &path, &headers))
            .await
            .unwrap();

        let layer = store.find_layer("img-0", true, false).await.unwrap();
        assert!(layer.features[0].version.is_unbounded());
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_request() {
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();

        let err = processor()
            .process_layer(&store, request("img-0", None, "", &headers))
            .await
            .unwrap_err();
        assert!(matches!(err, LayerProcessingError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_unsupported_format_is_bad_request() {
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();
        let mut request = request("img-0", None, "/tmp/layer.json", &headers);
        request.format = "OCI";

        let err = processor().process_layer(&store, request).await.unwrap_err();
        assert!(matches!(err, LayerProcessingError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_unknown_parent_is_bad_request() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "layer.json", BASE);
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();

        let err = processor()
            .process_layer(&store, request("img-1", Some("img-0"), &path, &headers))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LayerProcessingError::BadRequest(
                "parent layer is unknown, it must be processed first".to_string()
            )
        );
        assert!(!store.contains_layer("img-1"));
    }

    #[tokio::test]
    async fn test_already_processed_layer_is_skipped() {
        let store = InMemoryDatastore::new();
        store
            .insert_layer(Layer::new("img-0", None, ENGINE_VERSION))
            .await
            .unwrap();
        let headers = HashMap::new();

        // The path does not exist; reaching the manifest would fail.
        processor()
            .process_layer(&store, request("img-0", None, "/nonexistent.json", &headers))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_older_engine_layer_is_reprocessed() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "layer.json", BASE);
        let store = InMemoryDatastore::new();
        store
            .insert_layer(Layer::new("img-0", None, ENGINE_VERSION - 1))
            .await
            .unwrap();
        let headers = HashMap::new();

        processor()
            .process_layer(&store, request("img-0", None, &path, &headers))
            .await
            .unwrap();

        let layer = store.find_layer("img-0", true, false).await.unwrap();
        assert_eq!(layer.engine_version, ENGINE_VERSION);
        assert_eq!(layer.features.len(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_manifest_could_not_extract() {
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();

        let err = processor()
            .process_layer(&store, request("img-0", None, "/nonexistent.json", &headers))
            .await
            .unwrap_err();
        assert!(matches!(err, LayerProcessingError::CouldNotExtract { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_could_not_extract() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "layer.json", "not json");
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();

        let err = processor()
            .process_layer(&store, request("img-0", None, &path, &headers))
            .await
            .unwrap_err();
        assert!(matches!(err, LayerProcessingError::CouldNotExtract { .. }));
    }

    #[tokio::test]
    async fn test_oversized_manifest() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "layer.json", BASE);
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();
        let processor = ManifestLayerProcessor::new(vec!["Docker".to_string()], 8);

        let err = processor
            .process_layer(&store, request("img-0", None, &path, &headers))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LayerProcessingError::ExtractedFileTooLarge { limit: 8, .. }
        ));
    }

    #[tokio::test]
    async fn test_remote_location_is_unsupported() {
        let store = InMemoryDatastore::new();
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer secret".to_string());

        let err = processor()
            .process_layer(
                &store,
                request("img-0", None, "https://registry/layer?sig=abc", &headers),
            )
            .await
            .unwrap_err();
        match err {
            LayerProcessingError::Unsupported { details } => {
                assert!(!details.contains("sig=abc"));
            }
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_feature_namespace_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            "layer.json",
            r#"{"features": [{"name": "musl", "namespace": "alpine:3.7", "version": "1.1.18"}]}"#,
        );
        let store = InMemoryDatastore::new();
        let headers = HashMap::new();

        let err = processor()
            .process_layer(&store, request("img-0", None, &path, &headers))
            .await
            .unwrap_err();
        assert!(matches!(err, LayerProcessingError::Unsupported { .. }));
        assert!(!store.contains_layer("img-0"));
    }
}
