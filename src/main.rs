//! Warp Landing entry point
//!
//! On the web this wires DOM events, the JS renderer bridge and the model
//! loader into the frame scheduler. Natively it flies a headless scene and
//! logs what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_scene {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{KeyboardEvent, MouseEvent};

    use warp_landing::assets::AssetLoad;
    use warp_landing::host::web::DomHost;
    use warp_landing::render::{FrameSnapshot, RenderTarget, SceneSetup, TargetRole};
    use warp_landing::sim::{HostEvent, SceneState, Viewport};
    use warp_landing::{FrameScheduler, LoadError, SceneConfig, SceneVariant};

    // Bridge to the page's renderer and model loader (window.warpRenderer)
    #[wasm_bindgen(inline_js = "
        export function create_renderer(canvas_id, antialias, setup_json) {
            return window.warpRenderer.create(canvas_id, antialias, JSON.parse(setup_json));
        }

        export function resize_renderer(handle, width, height) {
            window.warpRenderer.resize(handle, width, height);
        }

        export function render_frame(handle, frame_json) {
            window.warpRenderer.render(handle, JSON.parse(frame_json));
        }

        export function load_vehicle(path, scale, on_progress) {
            return window.warpRenderer.loadVehicle(path, scale, on_progress);
        }
    ")]
    extern "C" {
        fn create_renderer(canvas_id: &str, antialias: bool, setup_json: &str) -> u32;
        fn resize_renderer(handle: u32, width: u32, height: u32);
        fn render_frame(handle: u32, frame_json: &str);
        fn load_vehicle(path: &str, scale: f32, on_progress: &js_sys::Function) -> js_sys::Promise;
    }

    /// A canvas drawn by the JS renderer
    struct JsRenderTarget {
        role: TargetRole,
        handle: Option<u32>,
    }

    impl RenderTarget for JsRenderTarget {
        fn role(&self) -> TargetRole {
            self.role
        }

        fn setup(&mut self, setup: &SceneSetup) {
            match serde_json::to_string(setup) {
                Ok(json) => {
                    self.handle = Some(create_renderer(
                        self.role.canvas_id(),
                        self.role.antialias(),
                        &json,
                    ));
                }
                Err(e) => log::error!("Failed to encode scene setup: {}", e),
            }
        }

        fn resize(&mut self, viewport: Viewport) {
            if let Some(handle) = self.handle {
                resize_renderer(handle, viewport.width, viewport.height);
            }
        }

        fn render(&mut self, frame: &FrameSnapshot) {
            let Some(handle) = self.handle else { return };
            match serde_json::to_string(frame) {
                Ok(json) => render_frame(handle, &json),
                Err(e) => log::warn!("Failed to encode frame {}: {}", frame.frame, e),
            }
        }
    }

    struct App {
        scheduler: FrameScheduler,
        load: AssetLoad,
    }

    /// Config from `data-variant` / `data-scene-config` on the model canvas
    fn read_config(document: &web_sys::Document) -> SceneConfig {
        let Some(canvas) = document.get_element_by_id(TargetRole::Foreground.canvas_id()) else {
            return SceneConfig::default();
        };
        if let Some(json) = canvas.get_attribute("data-scene-config") {
            return SceneConfig::from_json(&json).unwrap_or_else(|e| {
                log::warn!("{}; falling back to defaults", e);
                SceneConfig::default()
            });
        }
        let variant = canvas
            .get_attribute("data-variant")
            .and_then(|v| SceneVariant::from_str(&v))
            .unwrap_or_default();
        log::info!("Scene variant: {}", variant.as_str());
        variant.config()
    }

    fn window_viewport(window: &web_sys::Window) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>, fallback: f64| v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback);
        Viewport::new(
            dim(window.inner_width(), 800.0) as u32,
            dim(window.inner_height(), 600.0) as u32,
        )
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = read_config(&document);
        let seed = config.seed.unwrap_or(js_sys::Date::now() as u64);
        log::info!("Warp Landing starting (seed {})", seed);

        let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
        let state = SceneState::new(&config, seed, now, window_viewport(&window));
        let targets: Vec<Box<dyn RenderTarget>> = TargetRole::for_count(config.renderer_count)
            .iter()
            .map(|&role| Box::new(JsRenderTarget { role, handle: None }) as Box<dyn RenderTarget>)
            .collect();
        let host = Box::new(DomHost::new(window.clone(), document.clone()));

        let app = Rc::new(RefCell::new(App {
            scheduler: FrameScheduler::new(state, &config.vehicle_asset, host, targets),
            load: AssetLoad::new(&config.vehicle_asset),
        }));

        setup_input_handlers(&window, app.clone());
        spawn_vehicle_load(app.clone(), config.vehicle_asset.clone(), config.vehicle_scale);

        request_animation_frame(app);
        log::info!("Warp Landing running!");
    }

    fn spawn_vehicle_load(app: Rc<RefCell<App>>, path: String, scale: f32) {
        let on_progress = {
            let app = app.clone();
            Closure::<dyn FnMut(f64, f64)>::new(move |loaded: f64, total: f64| {
                app.borrow_mut().load.on_progress(loaded, total);
            })
        };
        let promise = load_vehicle(&path, scale, on_progress.as_ref().unchecked_ref());

        wasm_bindgen_futures::spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| {
                    let message = e
                        .as_string()
                        .or_else(|| js_sys::Error::from(e).message().as_string())
                        .unwrap_or_else(|| "unknown error".to_string());
                    LoadError::from_message(&message)
                });
            let mut guard = app.borrow_mut();
            let App { scheduler, load } = &mut *guard;
            // Already logged; the scene continues either way
            let _ = load.finish(&mut scheduler.state, result);
            drop(on_progress);
        });
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        // Key down / up
        for (kind, down) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let event = if down { HostEvent::KeyDown(key) } else { HostEvent::KeyUp(key) };
                app.borrow_mut().scheduler.post(event);
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let app = app.clone();
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let viewport = window_viewport(&window_clone);
                app.borrow_mut().scheduler.post(HostEvent::Resize {
                    width: viewport.width,
                    height: viewport.height,
                });
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Orbit drag on the model canvas (primary button held)
        let document = window.document().expect("no document");
        if let Some(canvas) = document.get_element_by_id(TargetRole::Foreground.canvas_id()) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.buttons() & 1 == 0 {
                    return;
                }
                app.borrow_mut().scheduler.post(HostEvent::PointerDrag {
                    dx: event.movement_x() as f32,
                    dy: event.movement_y() as f32,
                });
            });
            let _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().scheduler.frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_scene::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use warp_landing::assets::AssetLoad;
    use warp_landing::host::LogHost;
    use warp_landing::render::{FrameSnapshot, RenderTarget, SceneSetup, TargetRole};
    use warp_landing::sim::{HostEvent, SceneState, Viewport, input::KEY_DOWN};
    use warp_landing::{FrameScheduler, SceneConfig, SceneVariant};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const RUN_MS: f64 = 8000.0;

    /// Logs a one-line summary once a second
    struct LogTarget {
        role: TargetRole,
    }

    impl RenderTarget for LogTarget {
        fn role(&self) -> TargetRole {
            self.role
        }

        fn setup(&mut self, setup: &SceneSetup) {
            log::info!("[{:?}] setup: {} stars, {} lights", self.role, setup.stars.len(), setup.lights.len());
        }

        fn resize(&mut self, viewport: Viewport) {
            log::debug!("[{:?}] resize {}x{}", self.role, viewport.width, viewport.height);
        }

        fn render(&mut self, frame: &FrameSnapshot) {
            if frame.frame % 60 == 0 {
                log::info!(
                    "[{:?}] frame {} t={:.0}ms camera.z={:.1} collectibles={} ship={:?}",
                    self.role,
                    frame.frame,
                    frame.elapsed_ms,
                    frame.camera.pos.z,
                    frame.collectibles.len(),
                    frame.vehicle.map(|v| v.pos),
                );
            }
        }
    }

    pub fn run() {
        let config = match std::env::args().nth(1) {
            Some(arg) if arg.ends_with(".json") => std::fs::read_to_string(&arg)
                .map_err(|e| log::warn!("Cannot read {}: {}", arg, e))
                .ok()
                .and_then(|json| {
                    SceneConfig::from_json(&json)
                        .map_err(|e| log::warn!("{}; using defaults", e))
                        .ok()
                })
                .unwrap_or_default(),
            Some(arg) => SceneVariant::from_str(&arg).unwrap_or_default().config(),
            None => SceneConfig::default(),
        };
        let seed = config.seed.unwrap_or(2024);

        let state = SceneState::new(&config, seed, 0.0, Viewport::new(1280, 720));
        let targets: Vec<Box<dyn RenderTarget>> = TargetRole::for_count(config.renderer_count)
            .iter()
            .map(|&role| Box::new(LogTarget { role }) as Box<dyn RenderTarget>)
            .collect();
        let mut scheduler = FrameScheduler::new(state, &config.vehicle_asset, Box::new(LogHost::default()), targets);

        // Model "arrives" half a second in
        let mut load = AssetLoad::new(&config.vehicle_asset);
        let mut now = 0.0;
        while now < RUN_MS {
            if load.progress < 1.0 && now >= 500.0 {
                load.on_progress(1.0, 1.0);
                let _ = load.finish(&mut scheduler.state, Ok(()));
            }
            // After the intro, dive through the floor into the page
            if (6500.0..6500.0 + FRAME_MS).contains(&now) {
                scheduler.post(HostEvent::KeyDown(KEY_DOWN.into()));
            }
            scheduler.frame(now);
            now += FRAME_MS;
        }

        let state = &scheduler.state;
        log::info!(
            "Done: {} frames, intro {:?}, ship {:?}, scrolled {}",
            state.frame,
            state.intro.phase,
            state.vehicle.get().map(|v| v.pos),
            state.scroll.offset
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Warp Landing (native) starting...");
    log::info!("Native mode runs the scene headless - use `trunk serve` for the web version");
    headless::run();
}
