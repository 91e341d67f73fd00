//! Frame driver
//!
//! Called once per display refresh. Each frame runs to completion: drain
//! host events, tick the scene, push page effects, then hand the same
//! snapshot to every render target.

use crate::host::{self, PageHost};
use crate::render::{FrameSnapshot, RenderTarget, SceneSetup};
use crate::sim::{self, HostEvent, Mailbox, SceneEvent, SceneState};

pub struct FrameScheduler {
    pub state: SceneState,
    mailbox: Mailbox,
    host: Box<dyn PageHost>,
    targets: Vec<Box<dyn RenderTarget>>,
}

impl FrameScheduler {
    /// Wire up the scene and send static content to every target
    pub fn new(
        state: SceneState,
        vehicle_asset: &str,
        host: Box<dyn PageHost>,
        mut targets: Vec<Box<dyn RenderTarget>>,
    ) -> Self {
        let setup = SceneSetup::from_state(&state, vehicle_asset);
        for target in targets.iter_mut() {
            let role = target.role();
            log::debug!("Setting up {:?} target on #{}", role, role.canvas_id());
            target.setup(&setup);
            target.resize(setup.viewport);
        }
        log::info!(
            "Frame scheduler ready: {} target(s), {} stars, {} collectibles",
            targets.len(),
            setup.stars.len(),
            state.collectibles.live_count()
        );
        Self {
            state,
            mailbox: Mailbox::new(),
            host,
            targets,
        }
    }

    /// Queue a host event for the next frame
    pub fn post(&mut self, event: HostEvent) {
        self.mailbox.post(event);
    }

    /// Run one frame at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64) {
        sim::tick(&mut self.state, self.mailbox.drain(), now_ms);

        for signal in self.state.take_signals() {
            host::dispatch(self.host.as_mut(), &signal);
        }

        let events = self.state.take_events();
        for event in &events {
            if let SceneEvent::Resized(viewport) = event {
                for target in self.targets.iter_mut() {
                    log::debug!(
                        "Resizing {:?} target to {}x{}",
                        target.role(),
                        viewport.width,
                        viewport.height
                    );
                    target.resize(*viewport);
                }
            }
        }

        let snapshot = FrameSnapshot::capture(&self.state, events);
        for target in self.targets.iter_mut() {
            target.render(&snapshot);
        }
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn pending_events(&self) -> usize {
        self.mailbox.len()
    }
}
