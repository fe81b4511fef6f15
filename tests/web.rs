//! Browser-side tests for the DOM half of the effect: buffer visibility,
//! toggling and persistence. The simulation itself is covered by the native
//! unit tests in `src/field.rs`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

use snowscape::{Snow, STORAGE_KEY};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn make_canvas(id: &str) -> HtmlCanvasElement {
    let canvas: HtmlCanvasElement = document()
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_id(id);
    document().body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn clear_persisted_state() {
    if let Ok(Some(storage)) = web_sys::window().unwrap().local_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}

#[wasm_bindgen_test]
fn start_sizes_both_buffers_to_the_viewport() {
    clear_persisted_state();
    let front = make_canvas("sized-front");
    let back = make_canvas("sized-back");

    let snow = Snow::new("sized-front", "sized-back", wasm_bindgen::JsValue::NULL).unwrap();
    snow.start().unwrap();

    assert_eq!(front.width(), back.width());
    assert_eq!(front.height(), back.height());

    let root = document().document_element().unwrap();
    assert_eq!(front.width(), root.client_width() as u32);
    assert_eq!(front.height(), root.client_height() as u32);
}

#[wasm_bindgen_test]
fn start_populates_the_field_from_the_viewport() {
    clear_persisted_state();
    make_canvas("pop-front");
    make_canvas("pop-back");

    let snow = Snow::new("pop-front", "pop-back", wasm_bindgen::JsValue::NULL).unwrap();
    snow.start().unwrap();

    let scene = snow.get_config();
    assert_eq!(snow.get_particle_count() as usize, scene.particle_count());
}

#[wasm_bindgen_test]
fn toggle_twice_restores_the_visual_state() {
    clear_persisted_state();
    let front = make_canvas("tog-front");
    let back = make_canvas("tog-back");

    let snow = Snow::new("tog-front", "tog-back", wasm_bindgen::JsValue::NULL).unwrap();
    snow.start().unwrap();
    assert!(snow.is_active());

    let front_display = front.style().get_property_value("display").unwrap();
    let back_display = back.style().get_property_value("display").unwrap();

    snow.toggle().unwrap();
    assert!(!snow.is_active());
    assert_eq!(front.style().get_property_value("display").unwrap(), "none");
    assert_eq!(back.style().get_property_value("display").unwrap(), "none");

    snow.toggle().unwrap();
    assert!(snow.is_active());
    assert_eq!(front.style().get_property_value("display").unwrap(), front_display);
    assert_eq!(back.style().get_property_value("display").unwrap(), back_display);
}

#[wasm_bindgen_test]
fn toggle_persists_the_active_flag() {
    clear_persisted_state();
    make_canvas("per-front");
    make_canvas("per-back");

    let snow = Snow::new("per-front", "per-back", wasm_bindgen::JsValue::NULL).unwrap();
    snow.start().unwrap();

    snow.toggle().unwrap();
    let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap().as_deref(), Some("false"));

    snow.toggle().unwrap();
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap().as_deref(), Some("true"));
}

#[wasm_bindgen_test]
fn persisted_false_starts_the_effect_hidden() {
    clear_persisted_state();
    let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    storage.set_item(STORAGE_KEY, "false").unwrap();

    let front = make_canvas("hid-front");
    make_canvas("hid-back");

    let snow = Snow::new("hid-front", "hid-back", wasm_bindgen::JsValue::NULL).unwrap();
    snow.start().unwrap();

    assert!(!snow.is_active());
    assert_eq!(front.style().get_property_value("display").unwrap(), "none");
    clear_persisted_state();
}
