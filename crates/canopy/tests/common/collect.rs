//! A sink that collects hits per query.

use std::sync::Mutex;

use canopy::Sink;

/// Collects hits behind one lock per query, so concurrent reporting from distinct queries never
/// contends on a shared lock.
pub struct Collector {
    /// Spatial hits per query, in arrival order.
    spatial: Vec<Mutex<Vec<usize>>>,
    /// Nearest hits per query, in arrival order.
    nearest: Vec<Mutex<Vec<(usize, f32)>>>,
}

impl Collector {
    /// A collector for a batch of `n_queries` queries.
    pub fn new(n_queries: usize) -> Self {
        Self {
            spatial: (0..n_queries).map(|_| Mutex::new(Vec::new())).collect(),
            nearest: (0..n_queries).map(|_| Mutex::new(Vec::new())).collect(),
        }
    }

    /// The spatial hits of query `query`, in arrival order.
    pub fn spatial_hits(&self, query: usize) -> Vec<usize> {
        self.spatial[query].lock().unwrap().clone()
    }

    /// The nearest hits of query `query`, in arrival order.
    pub fn nearest_hits(&self, query: usize) -> Vec<(usize, f32)> {
        self.nearest[query].lock().unwrap().clone()
    }
}

impl Sink<f32> for Collector {
    fn spatial_hit(&self, query: usize, item: usize) {
        self.spatial[query].lock().unwrap().push(item);
    }

    fn nearest_hit(&self, query: usize, item: usize, distance: f32) {
        self.nearest[query].lock().unwrap().push((item, distance));
    }
}
