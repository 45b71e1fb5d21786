//! Protocol types for the GUI backend worker.

use geoedit_core::{Feature, FeatureId};

/// Local handle of a feature in the editable layer.
///
/// Assigned by the layer on insertion; stable for the feature's lifetime and
/// independent of any server id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureKey(pub u64);

/// Commands issued by the UI thread for the backend worker to execute.
#[derive(Debug)]
pub enum CoreCmd {
    /// Load the full feature collection from the server.
    FetchCollection,
    /// Persist a freshly drawn feature.
    InsertFeature { key: FeatureKey, feature: Feature },
    /// Persist the post-edit geometry of an existing feature.
    UpdateFeature {
        key: FeatureKey,
        id: FeatureId,
        feature: Feature,
    },
    /// Delete a persisted feature.
    DeleteFeature { key: FeatureKey, id: FeatureId },
}

/// Which request produced a [`CoreEvent::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorSource {
    Fetch,
    Insert,
    Update,
    Delete,
}

/// Events produced by the backend worker and polled by the UI thread.
#[derive(Debug)]
pub enum CoreEvent {
    /// Features returned by the initial fetch, already in the map projection.
    CollectionLoaded { features: Vec<Feature> },
    /// Server accepted an insert.
    FeatureInserted { key: FeatureKey },
    /// Server accepted an update.
    FeatureUpdated { key: FeatureKey, id: FeatureId },
    /// Server accepted a delete; the feature may now be removed locally.
    FeatureDeleted { key: FeatureKey, id: FeatureId },
    /// A request failed. Nothing is retried.
    Error {
        source: CoreErrorSource,
        key: Option<FeatureKey>,
        message: String,
    },
}
