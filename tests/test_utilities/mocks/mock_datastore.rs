use async_trait::async_trait;
use image_vuln_intel::ports::outbound::NotificationPage;
use image_vuln_intel::prelude::{
    Datastore, DatastoreError, Layer, PageCursor, VulnerabilityNotification,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock Datastore for testing
///
/// Layers are kept in a map; notifications always come back as a single
/// page. `with_failure` turns every call into a backend failure.
pub struct MockDatastore {
    pub layers: Mutex<HashMap<String, Layer>>,
    pub notifications: HashMap<String, VulnerabilityNotification>,
    pub deleted_layers: Mutex<Vec<String>>,
    pub should_fail: bool,
}

impl MockDatastore {
    pub fn new() -> Self {
        Self {
            layers: Mutex::new(HashMap::new()),
            notifications: HashMap::new(),
            deleted_layers: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    pub fn with_layer(self, layer: Layer) -> Self {
        self.layers.lock().unwrap().insert(layer.name.clone(), layer);
        self
    }

    pub fn with_notification(mut self, notification: VulnerabilityNotification) -> Self {
        self.notifications
            .insert(notification.name.clone(), notification);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub fn deleted_layers(&self) -> Vec<String> {
        self.deleted_layers.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), DatastoreError> {
        if self.should_fail {
            return Err(DatastoreError::backend("Mock datastore failure"));
        }
        Ok(())
    }
}

impl Default for MockDatastore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Datastore for MockDatastore {
    async fn find_layer(
        &self,
        name: &str,
        _with_features: bool,
        _with_vulnerabilities: bool,
    ) -> Result<Layer, DatastoreError> {
        self.check()?;
        self.layers
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| DatastoreError::not_found("layer", name))
    }

    async fn insert_layer(&self, layer: Layer) -> Result<(), DatastoreError> {
        self.check()?;
        self.layers.lock().unwrap().insert(layer.name.clone(), layer);
        Ok(())
    }

    async fn delete_layer(&self, name: &str) -> Result<(), DatastoreError> {
        self.check()?;
        self.deleted_layers.lock().unwrap().push(name.to_string());
        self.layers.lock().unwrap().remove(name);
        Ok(())
    }

    async fn get_notification(
        &self,
        name: &str,
        _limit: usize,
        _page: PageCursor,
    ) -> Result<NotificationPage, DatastoreError> {
        self.check()?;
        self.notifications
            .get(name)
            .cloned()
            .map(|notification| (notification, None))
            .ok_or_else(|| DatastoreError::not_found("notification", name))
    }

    async fn delete_notification(&self, name: &str) -> Result<(), DatastoreError> {
        self.check()?;
        if self.notifications.contains_key(name) {
            Ok(())
        } else {
            Err(DatastoreError::not_found("notification", name))
        }
    }
}
