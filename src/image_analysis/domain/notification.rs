use super::vulnerability::Vulnerability;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position of a layer within the ancestries known to the datastore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedLayerName {
    pub index: i32,
    pub layer_name: String,
}

impl OrderedLayerName {
    pub fn new(index: i32, layer_name: impl Into<String>) -> Self {
        Self {
            index,
            layer_name: layer_name.into(),
        }
    }
}

/// A vulnerability together with the ordered layers that introduce it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayersIntroducingVulnerability {
    pub vulnerability: Vulnerability,
    pub layers: Vec<OrderedLayerName>,
}

/// Record of a vulnerability changing state between two scans.
///
/// The old/new pair is computed upstream; this crate only renders and pages it.
#[derive(Debug, Clone, PartialEq)]
pub struct VulnerabilityNotification {
    pub name: String,
    pub created: Option<DateTime<Utc>>,
    pub notified: Option<DateTime<Utc>>,
    pub deleted: Option<DateTime<Utc>>,
    pub old_vulnerability: Option<LayersIntroducingVulnerability>,
    pub new_vulnerability: Option<LayersIntroducingVulnerability>,
}

/// Cursor into the old and new introducing-layer lists of a notification.
///
/// The "no more pages" state is not a cursor value: datastores return
/// `Option<PageCursor>` and `None` ends the pagination, so it can never be
/// turned into a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageCursor {
    pub old_vulnerability: i64,
    pub new_vulnerability: i64,
}

impl PageCursor {
    pub const FIRST: PageCursor = PageCursor {
        old_vulnerability: 0,
        new_vulnerability: 0,
    };

    pub fn new(old_vulnerability: i64, new_vulnerability: i64) -> Self {
        Self {
            old_vulnerability,
            new_vulnerability,
        }
    }

    /// Offsets address positions in a layer list, so neither may be negative.
    pub fn is_valid(&self) -> bool {
        self.old_vulnerability >= 0 && self.new_vulnerability >= 0
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::FIRST
    }
}
