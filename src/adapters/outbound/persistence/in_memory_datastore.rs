use crate::image_analysis::domain::{
    Feature, Layer, LayersIntroducingVulnerability, PageCursor, Version, Vulnerability,
    VulnerabilityNotification,
};
use crate::ports::outbound::{Datastore, DatastoreError, NotificationPage};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::collections::HashSet;

/// Key of a vulnerability match: a feature at an exact version.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct AffectedKey {
    feature: Feature,
    version: Version,
}

/// InMemoryDatastore adapter keeping layers and notifications in process.
///
/// Maps are sharded (`DashMap`), which gives per-layer-name atomicity for
/// concurrent requests. Vulnerability matching is not computed here:
/// callers record which vulnerabilities affect which feature versions.
#[derive(Default)]
pub struct InMemoryDatastore {
    layers: DashMap<String, Layer>,
    affected: DashMap<AffectedKey, Vec<Vulnerability>>,
    notifications: DashMap<String, VulnerabilityNotification>,
}

impl InMemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `vulnerability` affects `feature` at `version`.
    pub fn record_vulnerability(
        &self,
        feature: Feature,
        version: Version,
        vulnerability: Vulnerability,
    ) {
        self.affected
            .entry(AffectedKey { feature, version })
            .or_default()
            .push(vulnerability);
    }

    /// Stores a notification, replacing any previous one of the same name.
    pub fn insert_notification(&self, notification: VulnerabilityNotification) {
        self.notifications
            .insert(notification.name.clone(), notification);
    }

    pub fn contains_layer(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn attach_vulnerabilities(&self, layer: &mut Layer) {
        for feature_version in &mut layer.features {
            let key = AffectedKey {
                feature: feature_version.feature.clone(),
                version: feature_version.version.clone(),
            };
            feature_version.affected_by = self
                .affected
                .get(&key)
                .map(|entry| entry.value().clone())
                .unwrap_or_default();
        }
    }

    /// Names of `root` and every layer whose parent chain reaches it.
    fn descendants_of(&self, root: &str) -> HashSet<String> {
        let mut doomed = HashSet::from([root.to_string()]);
        loop {
            let children: Vec<String> = self
                .layers
                .iter()
                .filter(|entry| !doomed.contains(entry.key()))
                .filter(|entry| {
                    entry
                        .value()
                        .parent
                        .as_ref()
                        .is_some_and(|parent| doomed.contains(parent))
                })
                .map(|entry| entry.key().clone())
                .collect();

            if children.is_empty() {
                return doomed;
            }
            doomed.extend(children);
        }
    }
}

/// Takes at most `limit` layers starting at `offset`; returns the page and
/// the offset following it.
fn page_of(
    introducing: Option<&LayersIntroducingVulnerability>,
    offset: i64,
    limit: usize,
) -> Result<(Option<LayersIntroducingVulnerability>, usize, bool), DatastoreError> {
    let start = usize::try_from(offset)
        .map_err(|_| DatastoreError::backend(format!("invalid page offset {}", offset)))?;

    let Some(introducing) = introducing else {
        return Ok((None, start, true));
    };

    let layers: Vec<_> = introducing
        .layers
        .iter()
        .skip(start)
        .take(limit)
        .cloned()
        .collect();
    let next = start + layers.len();
    let exhausted = next >= introducing.layers.len();

    Ok((
        Some(LayersIntroducingVulnerability {
            vulnerability: introducing.vulnerability.clone(),
            layers,
        }),
        next,
        exhausted,
    ))
}

#[async_trait]
impl Datastore for InMemoryDatastore {
    async fn find_layer(
        &self,
        name: &str,
        with_features: bool,
        with_vulnerabilities: bool,
    ) -> Result<Layer, DatastoreError> {
        let stored = self
            .layers
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DatastoreError::not_found("layer", name))?;

        if !with_features {
            return Ok(stored.without_features());
        }

        let mut layer = stored;
        if with_vulnerabilities {
            self.attach_vulnerabilities(&mut layer);
        } else {
            for feature_version in &mut layer.features {
                feature_version.affected_by.clear();
            }
        }
        Ok(layer)
    }

    async fn insert_layer(&self, layer: Layer) -> Result<(), DatastoreError> {
        if layer.name.is_empty() {
            return Err(DatastoreError::backend("layer name must not be empty"));
        }
        self.layers.insert(layer.name.clone(), layer);
        Ok(())
    }

    async fn delete_layer(&self, name: &str) -> Result<(), DatastoreError> {
        if !self.layers.contains_key(name) {
            return Err(DatastoreError::not_found("layer", name));
        }

        for doomed in self.descendants_of(name) {
            self.layers.remove(&doomed);
        }
        Ok(())
    }

    async fn get_notification(
        &self,
        name: &str,
        limit: usize,
        page: PageCursor,
    ) -> Result<NotificationPage, DatastoreError> {
        let stored = self
            .notifications
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DatastoreError::not_found("notification", name))?;

        let (old_vulnerability, old_next, old_done) =
            page_of(stored.old_vulnerability.as_ref(), page.old_vulnerability, limit)?;
        let (new_vulnerability, new_next, new_done) =
            page_of(stored.new_vulnerability.as_ref(), page.new_vulnerability, limit)?;

        let next_page = if old_done && new_done {
            None
        } else {
            Some(PageCursor::new(old_next as i64, new_next as i64))
        };

        let notification = VulnerabilityNotification {
            old_vulnerability,
            new_vulnerability,
            ..stored
        };

        Ok((notification, next_page))
    }

    async fn delete_notification(&self, name: &str) -> Result<(), DatastoreError> {
        match self.notifications.get_mut(name) {
            Some(mut entry) if entry.deleted.is_none() => {
                entry.deleted = Some(Utc::now());
                Ok(())
            }
            _ => Err(DatastoreError::not_found("notification", name)),
        }
    }
}
