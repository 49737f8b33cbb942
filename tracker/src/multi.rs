//! Multi-track mode: one independent marker per tracked object.
//!
//! Markers share nothing.  One not updated for longer than the TTL is dropped, with its
//! animation and tooltip state.
//!

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use lookup_formats::BoxDims;

use crate::{Marker, MarkerFrame, TrackerConfig};

#[derive(Debug)]
struct Tracked {
    marker: Marker,
    last_seen: Duration,
}

#[derive(Debug)]
pub struct MarkerSet {
    cfg: TrackerConfig,
    markers: BTreeMap<String, Tracked>,
}

impl MarkerSet {
    pub fn new(cfg: &TrackerConfig) -> Self {
        Self {
            cfg: *cfg,
            markers: BTreeMap::new(),
        }
    }

    /// New box for `id`.  An unknown id gets a marker sitting on the box right away.
    ///
    pub fn update(&mut self, id: &str, target: BoxDims, now: Duration) {
        match self.markers.get_mut(id) {
            Some(t) => {
                t.marker.retarget(target, now);
                t.last_seen = now;
            }
            None => {
                debug!("new marker {id}");
                self.markers.insert(
                    id.to_string(),
                    Tracked {
                        marker: Marker::new(target, &self.cfg),
                        last_seen: now,
                    },
                );
            }
        }
    }

    /// Drop every marker not updated within the TTL, return how many went away.
    ///
    pub fn prune(&mut self, now: Duration) -> usize {
        let ttl = self.cfg.marker_ttl();
        let before = self.markers.len();
        self.markers.retain(|id, t| {
            let keep = now.saturating_sub(t.last_seen) <= ttl;
            if !keep {
                debug!("marker {id} expired");
            }
            keep
        });
        before - self.markers.len()
    }

    /// Frames for all markers, ordered by id.
    ///
    pub fn frames(&mut self, now: Duration) -> Vec<(String, MarkerFrame)> {
        self.markers
            .iter_mut()
            .map(|(id, t)| (id.clone(), t.marker.frame(now)))
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
