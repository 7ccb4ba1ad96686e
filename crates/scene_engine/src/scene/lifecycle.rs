//! Scene lifecycle controller
//!
//! Owns the active scene and the renderer surface, and is the only thing that
//! attaches or detaches nodes. State moves through
//!
//! ```text
//! Empty --load--> Loading --ok--> Loaded --load--> Loading --ok--> Loaded
//!                    |                                 |
//!                    +--fail--> previous state <-------+
//! ```
//!
//! Fetching is split from committing so a host can run the fetch on another
//! thread: [`SceneController::begin_load`] hands out a [`LoadTicket`], the
//! host fetches, then [`SceneController::complete_load`] parses, builds and
//! swaps. While a load is in flight, further load requests collapse into one
//! pending reload and live edits are queued, then replayed once the load
//! settles.

use std::collections::VecDeque;

use crate::config::LifecycleConfig;
use crate::render::surface::RenderSurface;
use crate::ui::PanelEvent;
use super::active::ActiveSceneState;
use super::document::SceneDocument;
use super::edit::{self, EditEffect, EditOutcome, ParameterChange};
use super::error::{EditWarning, SceneError};
use super::scene_builder::{BuiltScene, SceneBuilder};
use super::source::ConfigSource;

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded, no load in flight
    Empty,
    /// A load is in flight
    Loading,
    /// A scene is attached and no load is in flight
    Loaded,
}

/// Proof that a load was started; must be handed back to complete it
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket(pub(crate) u64);

impl LoadTicket {
    /// Sequence number of the load
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Answer to a load request
#[derive(Debug, PartialEq, Eq)]
pub enum LoadRequest {
    /// Fetch now, then call [`SceneController::complete_load`]
    Started(LoadTicket),
    /// A load is already in flight; one reload was queued behind it
    Coalesced,
}

/// What a successful load did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Id of the scene now attached
    pub scene_id: String,
    /// Nodes built, visible or not
    pub node_count: usize,
    /// Nodes attached to the surface
    pub attached_count: usize,
    /// Deferred edits replayed after the swap
    pub replayed_edits: usize,
    /// Another load was requested while this one was in flight
    pub reload_pending: bool,
}

/// Result of the synchronous load path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The scene was fetched, built and swapped in
    Loaded(LoadSummary),
    /// A load was already in flight
    Coalesced,
}

/// Controller response to a panel event
#[derive(Debug, Clone, PartialEq)]
pub enum PanelResponse {
    /// Outcome of a load request
    Load(Result<LoadOutcome, SceneError>),
    /// Outcome of a live edit
    Edit(EditOutcome),
}

/// Drives loads and live edits against one renderer surface
pub struct SceneController<S: RenderSurface, C: ConfigSource> {
    surface: S,
    source: C,
    config: LifecycleConfig,
    builder: SceneBuilder,
    active: ActiveSceneState,
    in_flight: Option<u64>,
    next_ticket: u64,
    reload_pending: bool,
    deferred: VecDeque<ParameterChange>,
}

impl<S: RenderSurface, C: ConfigSource> SceneController<S, C> {
    /// Create a controller in the empty state
    pub fn new(surface: S, source: C, config: LifecycleConfig) -> Self {
        Self {
            surface,
            source,
            config,
            builder: SceneBuilder::new(),
            active: ActiveSceneState::new(),
            in_flight: None,
            next_ticket: 0,
            reload_pending: false,
            deferred: VecDeque::new(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoadState {
        if self.in_flight.is_some() {
            LoadState::Loading
        } else if self.active.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Loaded
        }
    }

    /// The active scene
    pub fn active(&self) -> &ActiveSceneState {
        &self.active
    }

    /// The renderer surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The renderer surface, mutably (camera and viewport live there)
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The configuration source
    pub fn source(&self) -> &C {
        &self.source
    }

    /// The configuration source, mutably
    pub fn source_mut(&mut self) -> &mut C {
        &mut self.source
    }

    /// Lifecycle settings
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Number of edits waiting for the load in flight
    pub fn deferred_edits(&self) -> usize {
        self.deferred.len()
    }

    /// Whether a reload was requested during the last load
    ///
    /// Stays set after that load settles, until the next load starts.
    pub fn reload_pending(&self) -> bool {
        self.reload_pending
    }

    /// Start a load, or fold the request into the one in flight
    pub fn begin_load(&mut self) -> LoadRequest {
        if self.in_flight.is_some() {
            if !self.reload_pending {
                log::debug!("Load already in flight; queueing one reload");
            }
            self.reload_pending = true;
            return LoadRequest::Coalesced;
        }

        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);
        self.reload_pending = false;
        log::info!("Loading scene from {} (load #{})", self.source.location(), self.next_ticket);
        LoadRequest::Started(LoadTicket(self.next_ticket))
    }

    /// Finish the load in flight with the fetched document text
    ///
    /// On success the previous scene is fully detached before any part of the
    /// new one is attached. On failure the previous scene stays attached and
    /// unchanged. Either way the load is over and deferred edits are replayed.
    ///
    /// # Errors
    /// The fetch, parse or build error of the document, or
    /// [`SceneError::StaleLoad`] when `ticket` is not the load in flight (in
    /// which case nothing happens).
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<String, SceneError>,
    ) -> Result<LoadSummary, SceneError> {
        if self.in_flight != Some(ticket.0) {
            log::warn!("Ignoring completion of load #{}; it is not in flight", ticket.0);
            return Err(SceneError::StaleLoad { ticket: ticket.0 });
        }
        self.in_flight = None;
        let reload_pending = self.reload_pending;

        match self.prepare(fetched) {
            Ok((document, built)) => {
                let node_count = built.nodes.len();
                let scene_id = built.scene_id.clone();
                let attached_count = self.swap_in(document, built);
                let replayed_edits = self.replay_deferred();

                log::info!(
                    "Scene '{}' loaded: {} node(s), {} attached, {} deferred edit(s) replayed",
                    scene_id,
                    node_count,
                    attached_count,
                    replayed_edits
                );
                Ok(LoadSummary {
                    scene_id,
                    node_count,
                    attached_count,
                    replayed_edits,
                    reload_pending,
                })
            }
            Err(e) => {
                log::error!("Scene load failed, keeping the current scene: {}", e);
                self.replay_deferred();
                Err(e)
            }
        }
    }

    /// Fetch and commit in one call
    ///
    /// Returns [`LoadOutcome::Coalesced`] while an asynchronous load started
    /// with [`SceneController::begin_load`] is still in flight.
    pub fn on_load_requested(&mut self) -> Result<LoadOutcome, SceneError> {
        match self.begin_load() {
            LoadRequest::Coalesced => Ok(LoadOutcome::Coalesced),
            LoadRequest::Started(ticket) => {
                let fetched = self.source.fetch();
                self.complete_load(ticket, fetched).map(LoadOutcome::Loaded)
            }
        }
    }

    /// Apply a live edit, or queue it while a load is in flight
    pub fn on_parameter_changed(&mut self, change: ParameterChange) -> EditOutcome {
        if self.in_flight.is_some() {
            return self.defer(change);
        }
        self.apply_now(&change)
    }

    /// Dispatch a panel event
    pub fn handle(&mut self, event: PanelEvent) -> PanelResponse {
        match event {
            PanelEvent::LoadRequested => PanelResponse::Load(self.on_load_requested()),
            PanelEvent::ParameterChanged(change) => PanelResponse::Edit(self.on_parameter_changed(change)),
        }
    }

    fn prepare(&self, fetched: Result<String, SceneError>) -> Result<(SceneDocument, BuiltScene), SceneError> {
        let document = SceneDocument::from_json_str(&fetched?)?;
        let built = self.builder.build(&document)?;
        Ok((document, built))
    }

    /// Detach everything old, then attach everything new; returns attached node count
    fn swap_in(&mut self, document: SceneDocument, built: BuiltScene) -> usize {
        let (old_nodes, old_lights) = self.active.clear();
        for (key, visible) in old_nodes {
            if visible {
                self.surface.detach_node(key);
            }
        }
        for kind in old_lights {
            self.surface.detach_light(kind);
        }

        let lights = built.lights();
        let keys = self.active.install(document, built);

        self.surface.set_background(self.active.background());
        for light in &lights {
            self.surface.attach_light(light);
        }

        let mut attached = 0;
        for key in keys {
            if let Some(node) = self.active.node(key) {
                if node.visible {
                    self.surface.attach_node(key, node);
                    attached += 1;
                }
            }
        }
        attached
    }

    fn defer(&mut self, change: ParameterChange) -> EditOutcome {
        let capacity = self.config.max_deferred_edits;
        if capacity == 0 {
            let warning = dropped(&change);
            log::warn!("{}", warning);
            return EditOutcome::Ignored(warning);
        }

        if self.deferred.len() >= capacity {
            if let Some(oldest) = self.deferred.pop_front() {
                log::warn!("{}", dropped(&oldest));
            }
        }
        log::debug!("Deferring edit {} until the load completes", change);
        self.deferred.push_back(change);
        EditOutcome::Deferred
    }

    /// Replay queued edits in arrival order; returns how many were applied
    fn replay_deferred(&mut self) -> usize {
        let mut applied = 0;
        while let Some(change) = self.deferred.pop_front() {
            if matches!(self.apply_now(&change), EditOutcome::Applied | EditOutcome::Unchanged) {
                applied += 1;
            }
        }
        applied
    }

    fn apply_now(&mut self, change: &ParameterChange) -> EditOutcome {
        match edit::apply(&mut self.active, change) {
            Ok(EditEffect::Unchanged) => EditOutcome::Unchanged,
            Ok(effect) => {
                self.publish(effect);
                log::trace!("Applied edit {}", change);
                EditOutcome::Applied
            }
            Err(warning) => {
                log::warn!("Ignoring edit {}: {}", change, warning);
                EditOutcome::Ignored(warning)
            }
        }
    }

    fn publish(&mut self, effect: EditEffect) {
        match effect {
            EditEffect::Light(kind) => {
                if let Some(light) = self.active.light(kind) {
                    self.surface.update_light(&light);
                }
            }
            EditEffect::Background => self.surface.set_background(self.active.background()),
            EditEffect::NodeUpdated(key) => {
                // Hidden nodes are not on the surface; they pick the change up when shown
                if let Some(node) = self.active.node(key).filter(|node| node.visible) {
                    self.surface.update_node(key, node);
                }
            }
            EditEffect::NodeShown(key) => {
                if let Some(node) = self.active.node(key) {
                    self.surface.attach_node(key, node);
                }
            }
            EditEffect::NodeHidden(key) => self.surface.detach_node(key),
            EditEffect::Unchanged => {}
        }
    }
}

fn dropped(change: &ParameterChange) -> EditWarning {
    EditWarning::DroppedDeferredEdit {
        target: change.target.to_string(),
        field: change.field.clone(),
    }
}
