//! Live tracking session.
//!
//! Two tasks, each the only owner of its state:
//!
//! - the matcher reacts to any change of location, heading, pitch or flight snapshot and
//!   publishes the flight in view;
//! - the smoother retargets the marker on the refresh interval and publishes a frame on every
//!   animation tick.
//!
//! All inputs and outputs are `watch` channels: only the latest value matters, intermediate
//! ones are coalesced.  Stopping (or dropping) the session aborts both tasks, which drops
//! every receiver and every timer.
//!

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use lookup_common::GeoPoint;
use lookup_formats::{AircraftPosition, BoundingRegion};

use crate::{FovMatcher, MarkerFrame, PitchLock, Smoother, TrackerConfig};

/// Input side of a session, one sender per collaborator.
///
#[derive(Debug)]
pub struct Feeds {
    pub location: watch::Sender<Option<GeoPoint>>,
    /// Raw compass heading, before offset
    pub heading: watch::Sender<Option<f64>>,
    /// Device pitch in degrees, see [`crate::pitch_from_accel`]
    pub pitch: watch::Sender<Option<f64>>,
    pub flights: watch::Sender<Arc<Vec<AircraftPosition>>>,
    /// Detection in display pixels, `None` to go back to the placeholder
    pub detection: watch::Sender<Option<BoundingRegion>>,
}

#[derive(Debug)]
pub struct TrackingSession {
    in_view: watch::Receiver<Option<AircraftPosition>>,
    frames: watch::Receiver<MarkerFrame>,
    tasks: JoinSet<()>,
}

impl TrackingSession {
    /// Spawn the session tasks on the current runtime.
    ///
    #[tracing::instrument(skip(cfg))]
    pub fn start(cfg: TrackerConfig) -> (TrackingSession, Feeds) {
        let (location, location_rx) = watch::channel(None);
        let (heading, heading_rx) = watch::channel(None);
        let (pitch, pitch_rx) = watch::channel(None);
        let (flights, flights_rx) = watch::channel(Arc::new(vec![]));
        let (detection, detection_rx) = watch::channel(None);

        let (in_view_tx, in_view) = watch::channel(None);
        let (frames_tx, frames) = watch::channel(MarkerFrame::default());

        let mut tasks = JoinSet::new();
        tasks.spawn(run_matcher(
            cfg,
            Inputs {
                location: location_rx,
                heading: heading_rx,
                pitch: pitch_rx,
                flights: flights_rx,
            },
            in_view_tx,
        ));
        tasks.spawn(run_smoother(cfg, detection_rx, frames_tx));
        info!("tracking session started");

        let feeds = Feeds {
            location,
            heading,
            pitch,
            flights,
            detection,
        };
        (
            TrackingSession {
                in_view,
                frames,
                tasks,
            },
            feeds,
        )
    }

    /// Flight currently in view
    ///
    pub fn in_view(&self) -> watch::Receiver<Option<AircraftPosition>> {
        self.in_view.clone()
    }

    /// Latest marker frame
    ///
    pub fn frames(&self) -> watch::Receiver<MarkerFrame> {
        self.frames.clone()
    }

    /// Abort everything and wait until all tasks are gone.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn stop(mut self) {
        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {}
        info!("tracking session stopped");
    }
}

struct Inputs {
    location: watch::Receiver<Option<GeoPoint>>,
    heading: watch::Receiver<Option<f64>>,
    pitch: watch::Receiver<Option<f64>>,
    flights: watch::Receiver<Arc<Vec<AircraftPosition>>>,
}

/// Which inputs still have a sender
///
struct Alive {
    location: bool,
    heading: bool,
    pitch: bool,
    flights: bool,
}

impl Default for Alive {
    fn default() -> Self {
        Self {
            location: true,
            heading: true,
            pitch: true,
            flights: true,
        }
    }
}

async fn run_matcher(
    cfg: TrackerConfig,
    mut inputs: Inputs,
    out: watch::Sender<Option<AircraftPosition>>,
) {
    let matcher = FovMatcher::from_config(&cfg);
    let offset = matcher.offset();
    let mut lock = PitchLock::new(cfg.pitch_lock);
    let mut alive = Alive::default();

    loop {
        // Refs must not live across the await below
        //
        let found = {
            if let Some(p) = *inputs.pitch.borrow_and_update() {
                lock.on_pitch(p);
            }
            lock.on_heading(inputs.heading.borrow_and_update().map(|h| offset.apply(h)));

            let user = *inputs.location.borrow_and_update();
            let flights = inputs.flights.borrow_and_update();
            match (user, lock.display()) {
                (Some(user), Some(heading)) => matcher
                    .in_view_corrected(&user, heading, &flights)
                    .cloned(),
                _ => None,
            }
        };

        out.send_if_modified(|cur| {
            if *cur != found {
                debug!("in view: {:?}", found.as_ref().map(|f| f.name()));
                *cur = found;
                true
            } else {
                false
            }
        });

        // A closed feed keeps its last value, we only stop once all of them are gone
        //
        tokio::select! {
            r = inputs.location.changed(), if alive.location => alive.location = r.is_ok(),
            r = inputs.heading.changed(), if alive.heading => alive.heading = r.is_ok(),
            r = inputs.pitch.changed(), if alive.pitch => alive.pitch = r.is_ok(),
            r = inputs.flights.changed(), if alive.flights => alive.flights = r.is_ok(),
            else => {
                trace!("all feeds closed, matcher done");
                break;
            }
        }
    }
}

async fn run_smoother(
    cfg: TrackerConfig,
    mut detection: watch::Receiver<Option<BoundingRegion>>,
    out: watch::Sender<MarkerFrame>,
) {
    let origin = Instant::now();
    let now = || origin.elapsed();

    let mut smoother = Smoother::new(&cfg, Duration::ZERO);
    // Anything sent before we got scheduled is used by the first tick
    smoother.set_detection(*detection.borrow_and_update());

    let mut refresh = interval(cfg.refresh());
    refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = interval(cfg.frame());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut detector_alive = true;
    loop {
        tokio::select! {
            r = detection.changed(), if detector_alive => match r {
                Ok(()) => smoother.set_detection(*detection.borrow_and_update()),
                // Keep animating on the last value
                Err(_) => detector_alive = false,
            },
            _ = refresh.tick() => smoother.tick(now()),
            _ = frames.tick() => {
                out.send_replace(smoother.frame(now()));
            }
        }
    }
}
