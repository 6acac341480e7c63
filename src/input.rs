use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer position in CSS pixels relative to `el`'s top-left corner.
#[inline]
pub fn pointer_local(ev: &web::MouseEvent, el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

/// Local pointer position for a generic event, if it is a mouse/pointer event.
#[inline]
pub fn event_local(ev: &web::Event, el: &web::Element) -> Option<Vec2> {
    ev.dyn_ref::<web::MouseEvent>().map(|m| pointer_local(m, el))
}
