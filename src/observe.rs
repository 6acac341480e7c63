//! `IntersectionObserver` guard, disconnected when dropped.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type EntryCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

pub struct Intersection {
    observer: web::IntersectionObserver,
    _callback: EntryCallback,
}

impl Intersection {
    /// Calls `on_enter` for each observed element as it starts intersecting.
    /// The observer is passed along so the handler can `unobserve`.
    pub fn new(
        threshold: f64,
        root_margin: Option<&str>,
        mut on_enter: impl FnMut(&web::Element, &web::IntersectionObserver) + 'static,
    ) -> anyhow::Result<Self> {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web::IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        on_enter(&entry.target(), &observer);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);
        let options = web::IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }
        let observer =
            web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|e| anyhow::anyhow!("IntersectionObserver: {e:?}"))?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, el: &web::Element) {
        self.observer.observe(el);
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for Intersection {
    fn drop(&mut self) {
        self.disconnect();
    }
}
