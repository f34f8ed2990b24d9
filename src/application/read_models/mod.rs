//! Read models for client-facing output
//!
//! This module contains the views returned by the inbound ports and the
//! builder converting domain objects into them.

mod ancestry_view;
mod notification_view;
mod read_model_builder;
mod vulnerability_view;

pub use ancestry_view::{AncestryView, LayerView};
pub use notification_view::{
    LayersIntroducingVulnerabilityView, NotificationView, OrderedLayerNameView, PageView,
};
pub use read_model_builder::ReadModelBuilder;
pub use vulnerability_view::{FeatureView, VulnerabilityView};
