//! Rebuilding an ancestry from its terminal layer

use super::AncestryUseCase;
use crate::application::read_models::{AncestryView, FeatureView, ReadModelBuilder};
use crate::ports::outbound::{Datastore, LayerProcessor};
use crate::shared::error::ServiceError;
use std::collections::HashSet;

impl<D, P> AncestryUseCase<D, P>
where
    D: Datastore + 'static,
    P: LayerProcessor,
{
    /// Returns the ancestry ending at `name` and the features of that layer.
    ///
    /// The chain is walked one parent at a time from the terminal layer and
    /// then reversed so the root comes first.
    pub(super) async fn reconstruct(
        &self,
        name: &str,
        with_features: bool,
        with_vulnerabilities: bool,
    ) -> Result<(AncestryView, Vec<FeatureView>), ServiceError> {
        let terminal = self
            .datastore
            .find_layer(name, with_features, with_vulnerabilities)
            .await?;

        let features = if with_features {
            terminal
                .features
                .iter()
                .map(|feature| ReadModelBuilder::feature(feature, with_vulnerabilities))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ServiceError::internal(e.to_string()))?
        } else {
            Vec::new()
        };

        let mut layers = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(name.to_string());

        while let Some(current) = next {
            if !visited.insert(current.clone()) {
                return Err(ServiceError::internal(format!(
                    "layer chain of {} loops back to {}",
                    name, current
                )));
            }

            let layer = self.datastore.find_layer(&current, false, false).await?;
            next = layer.parent.clone();
            layers.push(ReadModelBuilder::layer(&layer));
        }

        layers.reverse();

        let ancestry = AncestryView {
            name: terminal.name,
            engine_version: terminal.engine_version,
            layers,
        };

        Ok((ancestry, features))
    }
}
