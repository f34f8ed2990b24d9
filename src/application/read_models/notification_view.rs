use super::vulnerability_view::VulnerabilityView;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedLayerNameView {
    pub index: i32,
    pub layer_name: String,
}

/// A vulnerability state together with the layers introducing it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayersIntroducingVulnerabilityView {
    pub vulnerability: VulnerabilityView,
    pub layers: Vec<OrderedLayerNameView>,
}

/// One page of the old/new vulnerability diff
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// Token of the page being returned
    pub this_token: String,
    /// Token of the following page, empty when this is the last one
    pub next_token: String,
    pub old: Option<LayersIntroducingVulnerabilityView>,
    pub new: Option<LayersIntroducingVulnerabilityView>,
}

/// View representation of a vulnerability notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationView {
    pub name: String,
    /// Epoch seconds, empty when unset
    pub created: String,
    pub notified: String,
    pub deleted: String,
    pub limit: i32,
    pub page: PageView,
}
