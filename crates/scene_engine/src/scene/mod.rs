//! Scene documents, building and lifecycle
//!
//! A [`SceneDocument`] is parsed from JSON, turned into nodes and lights by
//! the [`SceneBuilder`], and kept attached to a renderer surface by the
//! [`SceneController`], which also applies live [`ParameterChange`]s.

mod active;
mod document;
mod edit;
mod error;
mod lifecycle;
mod node;
mod scene_builder;
mod source;
mod transform;

pub use active::{ActiveSceneState, Frame, LayerEntry};
pub use document::{
    AmbientConfig, DirectionalConfig, LightingConfig, MaterialConfig, ObjectConfig, SceneDocument,
    TransformConfig, VectorConfig,
};
pub use edit::{EditOutcome, EditTarget, EditValue, ParameterChange};
pub use error::{EditWarning, SceneError};
pub use lifecycle::{
    LoadOutcome, LoadRequest, LoadState, LoadSummary, LoadTicket, PanelResponse, SceneController,
};
pub use node::{NodeKey, SceneNode};
pub use scene_builder::{BuiltScene, SceneBuilder};
pub use source::{ConfigSource, FileSource, MemorySource};
pub use transform::TransformApplier;

#[cfg(test)]
pub(crate) mod tests;
