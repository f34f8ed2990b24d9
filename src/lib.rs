//! image-vuln-intel - Vulnerability intelligence for container images
//!
//! This library ingests container image ancestries (ordered chains of
//! layers), reconstructs them with the features and vulnerabilities found
//! in them, and pages through vulnerability notifications with opaque,
//! sealed page tokens. It follows hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`image_analysis`): Layers, features, vulnerabilities,
//!   notifications and the policies acting on them
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use image_vuln_intel::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let datastore = Arc::new(InMemoryDatastore::new());
//! let processor = ManifestLayerProcessor::new(vec!["Docker".to_string()], 1024 * 1024);
//! let use_case = AncestryUseCase::new(Arc::clone(&datastore), processor);
//!
//! let request = PostAncestryRequest::new(
//!     "nginx",
//!     "Docker",
//!     vec![LayerSource::new("base.json"), LayerSource::new("nginx.json")],
//! );
//! use_case.post_ancestry(request).await?;
//!
//! let ancestry = use_case
//!     .get_ancestry(GetAncestryRequest::new("nginx", true, true))
//!     .await?;
//! println!("{:?}", ancestry.ancestry.layer_names());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod image_analysis;
pub mod ports;
pub mod shared;
pub mod telemetry;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::crypto::XChaChaPageTokenCodec;
    pub use crate::adapters::outbound::filesystem::ManifestLayerProcessor;
    pub use crate::adapters::outbound::persistence::InMemoryDatastore;
    pub use crate::application::dto::{
        DeleteNotificationRequest, GetAncestryRequest, GetAncestryResponse,
        GetNotificationRequest, GetNotificationResponse, LayerSource, PostAncestryRequest,
        PostAncestryResponse,
    };
    pub use crate::application::read_models::{
        AncestryView, FeatureView, NotificationView, VulnerabilityView,
    };
    pub use crate::application::use_cases::{AncestryUseCase, NotificationUseCase};
    pub use crate::config::{Config, PaginationKey};
    pub use crate::image_analysis::domain::{
        Feature, FeatureVersion, Layer, Namespace, PageCursor, Severity, Version, Vulnerability,
        VulnerabilityNotification,
    };
    pub use crate::ports::inbound::{AncestryPort, NotificationPort};
    pub use crate::ports::outbound::{
        Datastore, DatastoreError, LayerProcessingError, LayerProcessor, PageTokenCodec,
    };
    pub use crate::shared::error::{ExitCode, ServiceError};
    pub use crate::shared::Result;
}
