use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::error::{ClusterError, ClusterResult};
use crate::math::AABB;
use crate::types::Mesh;

/// Default number of pendant models kept in memory
pub const DEFAULT_TEMPLATE_CAPACITY: usize = 128;

/// Supplies raw mesh geometry for a pendant model key
pub trait TemplateSource: Send + Sync {
    fn load(&self, model: &str) -> ClusterResult<Vec<Mesh>>;
}

/// Meshes of one pendant model plus its vertical extents.
///
/// Shared read-only between requests; clone the meshes before transforming them.
#[derive(Debug)]
pub struct PendantTemplate {
    pub model: String,
    pub meshes: Vec<Mesh>,
    /// Distance from the model origin up to its topmost point
    pub top_extent: f64,
    /// Distance from the model origin down to its bottommost point
    pub bottom_extent: f64,
}

impl PendantTemplate {
    pub fn new(model: &str, meshes: Vec<Mesh>) -> ClusterResult<Self> {
        let bounds = meshes
            .iter()
            .filter_map(Mesh::bounds)
            .reduce(|a: AABB, b| a.union(&b))
            .ok_or_else(|| ClusterError::EmptyTemplate(model.to_string()))?;
        let (top_extent, bottom_extent) = bounds.vertical_extents();

        Ok(Self {
            model: model.to_string(),
            meshes,
            top_extent,
            bottom_extent,
        })
    }
}

/// In-memory template source, keyed by model
#[derive(Default, Clone)]
pub struct MemoryTemplateSource {
    models: HashMap<String, Vec<Mesh>>,
}

impl MemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: &str, meshes: Vec<Mesh>) -> Self {
        self.insert(model, meshes);
        self
    }

    pub fn insert(&mut self, model: &str, meshes: Vec<Mesh>) {
        self.models.insert(model.to_string(), meshes);
    }
}

impl TemplateSource for MemoryTemplateSource {
    fn load(&self, model: &str) -> ClusterResult<Vec<Mesh>> {
        self.models
            .get(model)
            .cloned()
            .ok_or_else(|| ClusterError::UnknownPendantModel(model.to_string()))
    }
}

struct LruState {
    entries: HashMap<String, Arc<PendantTemplate>>,
    // Front is least recently used
    recency: VecDeque<String>,
}

impl LruState {
    fn touch(&mut self, model: &str) {
        if let Some(pos) = self.recency.iter().position(|k| k == model) {
            if let Some(key) = self.recency.remove(pos) {
                self.recency.push_back(key);
            }
        }
    }
}

/// Process-wide memo of pendant templates with least-recently-used eviction.
///
/// Sources are read outside the lock, so two threads missing on the same model may
/// both load it; the first insert wins.
pub struct TemplateStore {
    source: Box<dyn TemplateSource>,
    capacity: usize,
    state: Mutex<LruState>,
}

impl TemplateStore {
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        Self::with_capacity(source, DEFAULT_TEMPLATE_CAPACITY)
    }

    pub fn with_capacity(source: impl TemplateSource + 'static, capacity: usize) -> Self {
        Self {
            source: Box::new(source),
            capacity: capacity.max(1),
            state: Mutex::new(LruState {
                entries: HashMap::new(),
                recency: VecDeque::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, model: &str) -> bool {
        self.state.lock().entries.contains_key(model)
    }

    /// Returns the shared template for `model`, loading it on first use
    pub fn get(&self, model: &str) -> ClusterResult<Arc<PendantTemplate>> {
        {
            let mut state = self.state.lock();
            if let Some(template) = state.entries.get(model).cloned() {
                state.touch(model);
                log::trace!("Template cache hit: {}", model);
                return Ok(template);
            }
        }

        log::debug!("Template cache miss: {}", model);
        let template = Arc::new(PendantTemplate::new(model, self.source.load(model)?)?);

        let mut state = self.state.lock();
        if let Some(existing) = state.entries.get(model).cloned() {
            state.touch(model);
            return Ok(existing);
        }

        state.entries.insert(model.to_string(), Arc::clone(&template));
        state.recency.push_back(model.to_string());
        while state.entries.len() > self.capacity {
            let Some(evicted) = state.recency.pop_front() else {
                break;
            };
            state.entries.remove(&evicted);
            log::debug!("Evicted template: {}", evicted);
        }

        Ok(template)
    }
}
