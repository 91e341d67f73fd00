//! Page effects
//!
//! The scene only asks for three things from the page around it: make a
//! content region visible, allow vertical scrolling, and scroll down.

use crate::sim::PageSignal;

pub trait PageHost {
    /// Add `class` to the element with id `region`
    fn reveal_content(&mut self, region: &str, class: &str);
    /// Re-enable vertical page scroll
    fn enable_scroll(&mut self);
    fn scroll_by(&mut self, dy: f32);
}

/// Forward a signal to the host
pub fn dispatch(host: &mut dyn PageHost, signal: &PageSignal) {
    match signal {
        PageSignal::EnableScroll => host.enable_scroll(),
        PageSignal::ScrollBy(dy) => host.scroll_by(*dy),
        PageSignal::RevealContent { region, class } => {
            log::info!("Revealing #{} (.{})", region, class);
            host.reveal_content(region, class);
        }
    }
}

/// Host that only logs; used by the native driver
#[derive(Debug, Default)]
pub struct LogHost {
    pub scrolled: f32,
}

impl PageHost for LogHost {
    fn reveal_content(&mut self, region: &str, class: &str) {
        log::info!("[page] #{region} += .{class}");
    }

    fn enable_scroll(&mut self) {
        log::debug!("[page] scroll enabled");
    }

    fn scroll_by(&mut self, dy: f32) {
        self.scrolled += dy;
        log::debug!("[page] scrolled to {}", self.scrolled);
    }
}

/// Browser DOM host
#[cfg(target_arch = "wasm32")]
pub mod web {
    use super::PageHost;

    pub struct DomHost {
        window: web_sys::Window,
        document: web_sys::Document,
    }

    impl DomHost {
        pub fn new(window: web_sys::Window, document: web_sys::Document) -> Self {
            Self { window, document }
        }
    }

    impl PageHost for DomHost {
        fn reveal_content(&mut self, region: &str, class: &str) {
            match self.document.get_element_by_id(region) {
                Some(el) => {
                    if let Err(e) = el.class_list().add_1(class) {
                        log::warn!("Failed to reveal #{}: {:?}", region, e);
                    }
                }
                None => log::warn!("Content region #{} not found", region),
            }
        }

        fn enable_scroll(&mut self) {
            match self.document.body() {
                Some(body) => {
                    if let Err(e) = body.style().set_property("overflow-y", "auto") {
                        log::warn!("Failed to enable page scroll: {:?}", e);
                    }
                }
                None => log::warn!("Document has no body, cannot enable scroll"),
            }
        }

        fn scroll_by(&mut self, dy: f32) {
            self.window.scroll_by_with_x_and_y(0.0, dy as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl PageHost for Recorder {
        fn reveal_content(&mut self, region: &str, class: &str) {
            self.calls.push(format!("reveal {region} {class}"));
        }
        fn enable_scroll(&mut self) {
            self.calls.push("enable".into());
        }
        fn scroll_by(&mut self, dy: f32) {
            self.calls.push(format!("scroll {dy}"));
        }
    }

    #[test]
    fn test_dispatch_routes_signals() {
        let mut host = Recorder::default();
        let signals = [
            PageSignal::EnableScroll,
            PageSignal::ScrollBy(10.0),
            PageSignal::RevealContent {
                region: "content".into(),
                class: "visible".into(),
            },
        ];
        for signal in &signals {
            dispatch(&mut host, signal);
        }
        assert_eq!(host.calls, vec!["enable", "scroll 10", "reveal content visible"]);
    }

    #[test]
    fn test_log_host_tracks_scroll() {
        let mut host = LogHost::default();
        dispatch(&mut host, &PageSignal::ScrollBy(10.0));
        dispatch(&mut host, &PageSignal::ScrollBy(10.0));
        assert_eq!(host.scrolled, 20.0);
    }
}
