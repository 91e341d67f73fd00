//! Per-frame simulation tick
//!
//! Step order is fixed and visible on screen: host events, ship movement,
//! collectible motion, pickups, intro flight, orbit damping. Rendering
//! happens after this returns.

use super::collision;
use super::input::HostEvent;
use super::intro::IntroStep;
use super::state::{PageSignal, SceneEvent, SceneState};

/// Apply one host event between ticks
pub fn apply_event(state: &mut SceneState, event: HostEvent) {
    match event {
        HostEvent::KeyDown(key) => state.input.set_held(&key, true),
        HostEvent::KeyUp(key) => state.input.set_held(&key, false),
        HostEvent::Resize { width, height } => {
            let viewport = state.viewport.resize(width, height, &mut state.camera);
            if let Some(vehicle) = state.vehicle.get_mut() {
                state.viewport.bounds().confine(&mut vehicle.pos);
            }
            state.events.push(SceneEvent::Resized(viewport));
        }
        HostEvent::PointerDrag { dx, dy } => {
            let height = state.viewport.viewport.height as f32;
            state.controls.drag(dx, dy, height);
        }
    }
}

/// Advance the scene by one display refresh at host time `now_ms`
pub fn tick(state: &mut SceneState, events: impl IntoIterator<Item = HostEvent>, now_ms: f64) {
    for event in events {
        apply_event(state, event);
    }
    state.clock.advance_to(now_ms);
    state.frame += 1;

    // Ship
    let bounds = state.viewport.bounds();
    if let Some(step) = state.mover.tick(&mut state.vehicle, &state.input, bounds) {
        if !state.scroll.enabled {
            log::info!("Ship reached the lower bound, handing off to page scroll");
        }
        // Re-sent every escape tick, the page treats it as idempotent
        state.scroll.enabled = true;
        state.scroll.offset += step;
        state.signals.push(PageSignal::EnableScroll);
        state.signals.push(PageSignal::ScrollBy(step));
    }

    // Collectibles
    if state.collectibles_enabled {
        state.collectibles.update(state.clock.elapsed_secs());
        let removed = collision::resolve(&state.vehicle, &mut state.collectibles, state.collision_radius);
        state
            .events
            .extend(removed.into_iter().map(|id| SceneEvent::CollectibleRemoved { id }));
    }

    // Intro
    let step = state.intro.tick(
        state.clock.elapsed_ms(),
        &mut state.camera.pos,
        &mut state.scene_rotation,
    );
    if step == IntroStep::Settled {
        state.signals.push(PageSignal::RevealContent {
            region: state.content_region.clone(),
            class: state.reveal_class.clone(),
        });
        state.signals.push(PageSignal::EnableScroll);
        state.scroll.enabled = true;
    }

    state.controls.update(&mut state.camera);
}
