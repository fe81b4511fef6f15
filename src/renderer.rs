//! Canvas double-buffering and the animation loop

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::SceneConfig;
use crate::constants::*;
use crate::field::SnowField;
use crate::random::JsRandom;

type FrameClosure = Closure<dyn FnMut(f64)>;
type DelayClosure = Closure<dyn FnMut()>;

/// Everything the frame callbacks mutate, behind one `Rc<RefCell>`.
struct State {
    scene: SceneConfig,
    field: SnowField,
    /// The two frame buffers. Exactly one is visible at a time.
    buffers: [HtmlCanvasElement; 2],
    /// 2D context of the current back buffer.
    context: CanvasRenderingContext2d,
    /// Which buffer is currently presented.
    draw_flag: bool,
    /// Snowing status.
    active: bool,
    /// Timestamp of the previous frame; `None` resets the elapsed baseline.
    last_time: Option<f64>,
    timeout_id: Option<i32>,
    raf_id: Option<i32>,
    rng: JsRandom,
}

impl State {
    fn back_buffer(&self) -> &HtmlCanvasElement {
        &self.buffers[usize::from(self.draw_flag)]
    }

    fn front_buffer(&self) -> &HtmlCanvasElement {
        &self.buffers[usize::from(!self.draw_flag)]
    }

    /// Advance the simulation, draw into the back buffer and present it.
    fn frame(&mut self, now: f64) -> Result<(), JsValue> {
        let elapsed = match self.last_time {
            Some(prev) => (now - prev) / 1000.0,
            None => 0.0,
        };
        self.last_time = Some(now);

        self.field.advance(&self.scene, elapsed, &mut self.rng);
        self.draw()?;
        self.flip()
    }

    fn draw(&self) -> Result<(), JsValue> {
        let width = self.scene.width;
        for flake in self.field.flakes() {
            self.context.begin_path();
            self.context
                .arc(flake.display_x(width), flake.y, flake.radius, 0.0, TAU)?;
            self.context.set_fill_style_str(&flake.fill);
            self.context.fill();
        }
        Ok(())
    }

    /// Present the frame: show the buffer that was just drawn, hide the
    /// other one, then clear it for the next frame's drawing.
    fn flip(&mut self) -> Result<(), JsValue> {
        self.back_buffer().style().set_property("visibility", "visible")?;
        self.front_buffer().style().set_property("visibility", "hidden")?;
        self.draw_flag = !self.draw_flag;

        self.context = context_of(self.back_buffer())?;
        self.clear_back();
        Ok(())
    }

    fn clear_back(&self) {
        self.context
            .clear_rect(0.0, 0.0, self.scene.width, self.scene.height);
    }

    /// Resize both buffers to the viewport and rebalance the flake count.
    fn resize(&mut self) -> Result<(), JsValue> {
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
            .ok_or("Failed to get document element")?;

        self.scene.width = f64::from(root.client_width());
        self.scene.height = f64::from(root.client_height());

        for buffer in &self.buffers {
            buffer.set_width(self.scene.width as u32);
            buffer.set_height(self.scene.height as u32);
        }

        self.field.resize(&self.scene, &mut self.rng);
        Ok(())
    }

    fn set_display(&self, value: &str) -> Result<(), JsValue> {
        for buffer in &self.buffers {
            buffer.style().set_property("display", value)?;
        }
        Ok(())
    }

    /// Cancel the pending timeout and animation frame, if any. Stops the
    /// self-perpetuating frame chain.
    fn cancel_pending(&mut self, window: &Window) {
        if let Some(id) = self.timeout_id.take() {
            window.clear_timeout_with_handle(id);
        }
        if let Some(id) = self.raf_id.take() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

fn context_of(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or("2D context is not supported")?
        .dyn_into()
        .map_err(JsValue::from)
}

fn persisted_active() -> Option<bool> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let value = storage.get_item(STORAGE_KEY).ok()??;
    value.parse().ok()
}

fn persist_active(active: bool) {
    // Storage may be unavailable (private browsing); snow falls regardless.
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(STORAGE_KEY, if active { "true" } else { "false" });
    }
}

/// The snow effect: a particle field rendered across two alternating
/// canvases, driven by a self-scheduling animation loop.
#[wasm_bindgen]
pub struct Snow {
    state: Rc<RefCell<State>>,
    frame_cb: Rc<RefCell<Option<FrameClosure>>>,
    delay_cb: Rc<RefCell<Option<DelayClosure>>>,
}

#[wasm_bindgen]
impl Snow {
    /// Build the effect over two equally sized canvases, looked up by id.
    ///
    /// The persisted active flag decides whether the effect starts snowing
    /// or hidden; first-time visitors get snow.
    #[wasm_bindgen(constructor)]
    pub fn new(
        front_id: &str,
        back_id: &str,
        config_val: JsValue,
    ) -> Result<Snow, JsValue> {
        let scene = SceneConfig::from_js(config_val);

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Failed to get document")?;
        let lookup = |id: &str| -> Result<HtmlCanvasElement, JsValue> {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("Canvas not found: {id}")))?
                .dyn_into()
                .map_err(JsValue::from)
        };
        let buffers = [lookup(front_id)?, lookup(back_id)?];
        let context = context_of(&buffers[0])?;

        let state = Rc::new(RefCell::new(State {
            scene,
            field: SnowField::new(),
            buffers,
            context,
            draw_flag: false,
            active: persisted_active().unwrap_or(true),
            last_time: None,
            timeout_id: None,
            raf_id: None,
            rng: JsRandom,
        }));

        let frame_cb: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
        let delay_cb: Rc<RefCell<Option<DelayClosure>>> = Rc::new(RefCell::new(None));

        // Frame callback: run one frame, then queue the throttling timeout.
        let frame_impl = {
            let state = Rc::clone(&state);
            let delay_cb = Rc::clone(&delay_cb);
            Closure::wrap(Box::new(move |now: f64| {
                let mut state = state.borrow_mut();
                state.raf_id = None;
                if !state.active {
                    return;
                }
                if let Err(err) = state.frame(now) {
                    console::warn_1(&err);
                    return;
                }
                let delay_ms = (1000.0 / state.scene.fps.max(1.0)) as i32;
                if let (Some(window), Some(cb)) =
                    (web_sys::window(), delay_cb.borrow().as_ref())
                {
                    if let Ok(id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.as_ref().unchecked_ref(),
                        delay_ms,
                    ) {
                        state.timeout_id = Some(id);
                    }
                }
            }) as Box<dyn FnMut(f64)>)
        };

        // Timeout callback: hand the next frame to the display's refresh.
        let delay_impl = {
            let state = Rc::clone(&state);
            let frame_cb = Rc::clone(&frame_cb);
            Closure::wrap(Box::new(move || {
                let mut state = state.borrow_mut();
                state.timeout_id = None;
                if !state.active {
                    return;
                }
                if let (Some(window), Some(cb)) =
                    (web_sys::window(), frame_cb.borrow().as_ref())
                {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        state.raf_id = Some(id);
                    }
                }
            }) as Box<dyn FnMut()>)
        };

        *frame_cb.borrow_mut() = Some(frame_impl);
        *delay_cb.borrow_mut() = Some(delay_impl);

        Ok(Snow {
            state,
            frame_cb,
            delay_cb,
        })
    }

    /// Size the buffers, populate the field and begin the animation loop
    /// (unless the persisted flag left the effect paused).
    pub fn start(&self) -> Result<(), JsValue> {
        let active = {
            let mut state = self.state.borrow_mut();
            state.resize()?;

            let scene = state.scene;
            // Split borrows: the field samples from the state's rng.
            let State { field, rng, .. } = &mut *state;
            field.populate(&scene, rng);

            state.clear_back();
            state.set_display(if state.active { "block" } else { "none" })?;
            state.last_time = None;
            state.active
        };

        console::log_1(
            &format!(
                "[Snowscape] Initialized with {} flakes",
                self.state.borrow().field.len()
            )
            .into(),
        );

        if active {
            self.request_frame();
        }
        Ok(())
    }

    /// Recompute buffer dimensions and the particle target from the current
    /// viewport. Safe at any time, including mid-animation.
    pub fn resize(&self) -> Result<(), JsValue> {
        self.state.borrow_mut().resize()
    }

    /// Toggle snowfall visibility and animation.
    pub fn toggle(&self) -> Result<(), JsValue> {
        let activated = {
            let mut state = self.state.borrow_mut();
            if state.active {
                state.active = false;
                state.set_display("none")?;
                if let Some(window) = web_sys::window() {
                    state.cancel_pending(&window);
                }
                false
            } else {
                state.active = true;
                state.set_display("block")?;
                state.last_time = None;
                true
            }
        };

        persist_active(activated);
        if activated {
            self.request_frame();
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    pub fn get_particle_count(&self) -> u32 {
        self.state.borrow().field.len() as u32
    }

    pub fn get_config(&self) -> SceneConfig {
        self.state.borrow().scene
    }

    pub fn is_configurable(&self) -> bool {
        RUNTIME_CONFIGURABLE
    }

    /// Issue exactly one animation frame request for the frame callback.
    fn request_frame(&self) {
        let mut state = self.state.borrow_mut();
        if state.raf_id.is_some() || state.timeout_id.is_some() {
            return;
        }
        if let (Some(window), Some(cb)) = (web_sys::window(), self.frame_cb.borrow().as_ref()) {
            if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                state.raf_id = Some(id);
            }
        }
    }
}

#[cfg(feature = "configurable")]
#[wasm_bindgen]
impl Snow {
    pub fn set_tint(&self, red: f64, green: f64, blue: f64) {
        let mut state = self.state.borrow_mut();
        state.scene.red = red;
        state.scene.green = green;
        state.scene.blue = blue;
    }

    /// Change particle density and rebalance the field immediately.
    pub fn set_intensity(&self, intensity: f64) {
        let mut state = self.state.borrow_mut();
        state.scene.intensity = intensity;
        let scene = state.scene;
        let State { field, rng, .. } = &mut *state;
        field.resize(&scene, rng);
    }

    pub fn set_wind(&self, force: f64, angle: f64) {
        let mut state = self.state.borrow_mut();
        state.scene.wind_force = force;
        state.scene.wind_angle = angle;
    }

    pub fn set_fps(&self, fps: f64) {
        self.state.borrow_mut().scene.fps = fps;
    }
}

impl Drop for Snow {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        if let Some(window) = web_sys::window() {
            state.cancel_pending(&window);
        }
        // Break the closure reference cycle.
        self.frame_cb.borrow_mut().take();
        self.delay_cb.borrow_mut().take();
    }
}
