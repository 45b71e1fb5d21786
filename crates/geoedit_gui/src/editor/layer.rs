//! Editable vector layer contents.

use crate::backend::FeatureKey;
use geoedit_core::{Extent, Feature};

/// A feature stored in the layer together with its local key.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerFeature {
    pub key: FeatureKey,
    pub feature: Feature,
}

/// Ordered feature store backing the editable layer.
///
/// Later features render on top and win hit tests.
#[derive(Debug, Default)]
pub struct VectorSource {
    features: Vec<LayerFeature>,
    next_key: u64,
}

impl VectorSource {
    pub fn add(&mut self, feature: Feature) -> FeatureKey {
        self.next_key += 1;
        let key = FeatureKey(self.next_key);
        self.features.push(LayerFeature { key, feature });
        key
    }

    pub fn add_features(&mut self, features: impl IntoIterator<Item = Feature>) -> Vec<FeatureKey> {
        features.into_iter().map(|f| self.add(f)).collect()
    }

    pub fn clear(&mut self) {
        self.features.clear();
    }

    pub fn remove(&mut self, key: FeatureKey) -> Option<Feature> {
        let index = self.features.iter().position(|f| f.key == key)?;
        Some(self.features.remove(index).feature)
    }

    pub fn get(&self, key: FeatureKey) -> Option<&Feature> {
        self.features
            .iter()
            .find(|f| f.key == key)
            .map(|f| &f.feature)
    }

    pub fn get_mut(&mut self, key: FeatureKey) -> Option<&mut Feature> {
        self.features
            .iter_mut()
            .find(|f| f.key == key)
            .map(|f| &mut f.feature)
    }

    pub fn contains(&self, key: FeatureKey) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LayerFeature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Combined extent of every feature geometry.
    pub fn extent(&self) -> Extent {
        let mut extent = Extent::empty();
        for item in &self.features {
            extent.extend(&item.feature.extent());
        }
        extent
    }
}
