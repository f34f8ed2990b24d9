//! Builder for constructing client views from domain objects
//!
//! All rendering rules for the unbounded version live here: a fix version
//! equal to the sentinel is omitted and a feature version equal to it is
//! rendered as `"None"`.

use super::ancestry_view::LayerView;
use super::notification_view::{
    LayersIntroducingVulnerabilityView, NotificationView, OrderedLayerNameView, PageView,
};
use super::vulnerability_view::{FeatureView, VulnerabilityView};
use crate::image_analysis::domain::{
    FeatureVersion, Layer, LayersIntroducingVulnerability, Vulnerability,
    VulnerabilityNotification,
};
use chrono::{DateTime, Utc};

/// Builder for client views
pub struct ReadModelBuilder;

impl ReadModelBuilder {
    /// Converts a vulnerability to its view
    ///
    /// # Arguments
    /// * `vulnerability` - Domain vulnerability
    /// * `with_fixed_in` - Include the features carrying the fix. Those
    ///   features are always rendered without their own vulnerabilities.
    ///
    /// # Errors
    /// Returns an error if the metadata cannot be serialized
    pub fn vulnerability(
        vulnerability: &Vulnerability,
        with_fixed_in: bool,
    ) -> Result<VulnerabilityView, serde_json::Error> {
        let metadata = match &vulnerability.metadata {
            Some(metadata) => serde_json::to_string(metadata)?,
            None => String::new(),
        };

        let fixed_in_features = if with_fixed_in {
            vulnerability
                .fixed_in
                .iter()
                .map(|fixed| Self::feature(fixed, false))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };

        Ok(VulnerabilityView {
            name: vulnerability.name.clone(),
            namespace_name: vulnerability.namespace.name.clone(),
            description: vulnerability.description.clone(),
            link: vulnerability.link.clone(),
            severity: vulnerability.severity.to_string(),
            metadata,
            fixed_by: vulnerability.fixed_by.render_fixed_by(),
            fixed_in_features,
        })
    }

    /// Converts a feature version to its view
    ///
    /// Nested vulnerabilities never carry their fixed-in features, otherwise
    /// a feature and the vulnerabilities fixed in it would embed each other.
    pub fn feature(
        feature_version: &FeatureVersion,
        with_vulnerabilities: bool,
    ) -> Result<FeatureView, serde_json::Error> {
        let vulnerabilities = if with_vulnerabilities {
            feature_version
                .affected_by
                .iter()
                .map(|vulnerability| Self::vulnerability(vulnerability, false))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };

        Ok(FeatureView {
            name: feature_version.feature.name.clone(),
            namespace_name: feature_version.feature.namespace.name.clone(),
            version_format: feature_version.feature.namespace.version_format.clone(),
            version: feature_version.version.render_feature_version(),
            added_by: feature_version.added_by.clone(),
            vulnerabilities,
        })
    }

    pub fn layer(layer: &Layer) -> LayerView {
        LayerView {
            name: layer.name.clone(),
            namespace_names: layer
                .namespaces
                .iter()
                .map(|namespace| namespace.name.clone())
                .collect(),
        }
    }

    pub fn layers_introducing(
        introducing: &LayersIntroducingVulnerability,
    ) -> Result<LayersIntroducingVulnerabilityView, serde_json::Error> {
        Ok(LayersIntroducingVulnerabilityView {
            vulnerability: Self::vulnerability(&introducing.vulnerability, true)?,
            layers: introducing
                .layers
                .iter()
                .map(|ordered| OrderedLayerNameView {
                    index: ordered.index,
                    layer_name: ordered.layer_name.clone(),
                })
                .collect(),
        })
    }

    /// Converts one page of a notification to its view
    ///
    /// # Arguments
    /// * `notification` - Notification page read from the datastore
    /// * `limit` - Page size that was requested
    /// * `this_token` - Token of the page being rendered
    /// * `next_token` - Token of the next page, empty on the last page
    pub fn notification(
        notification: &VulnerabilityNotification,
        limit: i32,
        this_token: String,
        next_token: String,
    ) -> Result<NotificationView, serde_json::Error> {
        let old = notification
            .old_vulnerability
            .as_ref()
            .map(Self::layers_introducing)
            .transpose()?;
        let new = notification
            .new_vulnerability
            .as_ref()
            .map(Self::layers_introducing)
            .transpose()?;

        Ok(NotificationView {
            name: notification.name.clone(),
            created: Self::timestamp(notification.created),
            notified: Self::timestamp(notification.notified),
            deleted: Self::timestamp(notification.deleted),
            limit,
            page: PageView {
                this_token,
                next_token,
                old,
                new,
            },
        })
    }

    /// Epoch seconds, or an empty string for an unset or zero timestamp
    fn timestamp(timestamp: Option<DateTime<Utc>>) -> String {
        match timestamp {
            Some(ts) if ts.timestamp() != 0 || ts.timestamp_subsec_nanos() != 0 => {
                ts.timestamp().to_string()
            }
            _ => String::new(),
        }
    }
}
