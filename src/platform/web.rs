//! Browser bindings
//!
//! `CanvasSurface` replays draw lists on a 2D canvas context. `PaddleBallView`
//! and `WheelView` are the handles the page holds: they mount an engine on a
//! canvas, own its listeners and animation-frame loop, and forward engine
//! callbacks to JS functions.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent,
};

use crate::engine::{PaddleBallCallbacks, PaddleBallEngine};
use crate::render::{DrawCmd, DrawList, DrawSurface, Stroke};
use crate::settings::KioskSettings;
use crate::sim::{GamePhase, Side};
use crate::wheel::{WheelCallbacks, WheelEngine};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Kiosk arcade loaded");
}

fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn seed() -> u64 {
    js_sys::Date::now() as u64
}

fn find_canvas(canvas_id: &str) -> Result<Option<HtmlCanvasElement>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    Ok(document
        .get_element_by_id(canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok()))
}

/// 2D canvas context wrapper
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        let surface = Self { canvas, ctx };
        surface.fit_to_display();
        Some(surface)
    }

    /// Match the backing store to the displayed size
    pub fn fit_to_display(&self) {
        let width = self.canvas.client_width();
        let height = self.canvas.client_height();
        if width > 0 && height > 0 {
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
        }
    }

    /// Viewport coordinates to canvas pixels
    pub fn to_surface(&self, client_x: f64, client_y: f64) -> (f32, f32) {
        let rect = self.canvas.get_bounding_client_rect();
        let scale_x = if rect.width() > 0.0 {
            self.canvas.width() as f64 / rect.width()
        } else {
            1.0
        };
        let scale_y = if rect.height() > 0.0 {
            self.canvas.height() as f64 / rect.height()
        } else {
            1.0
        };
        (
            ((client_x - rect.left()) * scale_x) as f32,
            ((client_y - rect.top()) * scale_y) as f32,
        )
    }

    fn fill_and_outline(&self, fill: &str, stroke: Option<&Stroke>) {
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        if let Some(stroke) = stroke {
            self.ctx.set_stroke_style_str(&stroke.color);
            self.ctx.set_line_width(stroke.width);
            self.ctx.stroke();
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn present(&mut self, list: &DrawList) {
        let ctx = &self.ctx;
        let (width, height) = self.size();

        for cmd in list.iter() {
            match cmd {
                DrawCmd::Clear { color } => {
                    ctx.clear_rect(0.0, 0.0, width, height);
                    if let Some(color) = color {
                        ctx.set_fill_style_str(color);
                        ctx.fill_rect(0.0, 0.0, width, height);
                    }
                }
                DrawCmd::FillRect { x, y, w, h, color } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(*x, *y, *w, *h);
                }
                DrawCmd::Line {
                    from,
                    to,
                    stroke,
                    dash,
                } => {
                    let pattern: js_sys::Array = dash.iter().map(|d| JsValue::from_f64(*d)).collect();
                    let _ = ctx.set_line_dash(&pattern);
                    ctx.set_stroke_style_str(&stroke.color);
                    ctx.set_line_width(stroke.width);
                    ctx.begin_path();
                    ctx.move_to(from.0, from.1);
                    ctx.line_to(to.0, to.1);
                    ctx.stroke();
                    let _ = ctx.set_line_dash(&js_sys::Array::new());
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => {
                    ctx.begin_path();
                    let _ = ctx.arc(center.0, center.1, *radius, 0.0, TAU);
                    self.fill_and_outline(fill, stroke.as_ref());
                }
                DrawCmd::Wedge {
                    center,
                    radius,
                    start,
                    end,
                    fill,
                    stroke,
                } => {
                    ctx.begin_path();
                    ctx.move_to(center.0, center.1);
                    let _ = ctx.arc(center.0, center.1, *radius, *start, *end);
                    ctx.close_path();
                    self.fill_and_outline(fill, stroke.as_ref());
                }
                DrawCmd::Polygon {
                    points,
                    fill,
                    stroke,
                } => {
                    ctx.begin_path();
                    for (i, (x, y)) in points.iter().enumerate() {
                        if i == 0 {
                            ctx.move_to(*x, *y);
                        } else {
                            ctx.line_to(*x, *y);
                        }
                    }
                    ctx.close_path();
                    self.fill_and_outline(fill, stroke.as_ref());
                }
                DrawCmd::Text {
                    pos,
                    rotation,
                    text,
                    color,
                    font,
                } => {
                    ctx.save();
                    let _ = ctx.translate(pos.0, pos.1);
                    let _ = ctx.rotate(*rotation);
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                    ctx.set_fill_style_str(color);
                    ctx.set_font(font);
                    let _ = ctx.fill_text(text, 0.0, 0.0);
                    ctx.restore();
                }
            }
        }
    }
}

/// An attached DOM listener; detached on drop
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Self {
        let _ = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// requestAnimationFrame loop. The step returns whether it wants another frame.
struct FrameDriver {
    callback: FrameCallback,
    request_id: Rc<Cell<Option<i32>>>,
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    let borrowed = callback.borrow();
    let closure = borrowed.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

impl FrameDriver {
    fn new(mut step: impl FnMut(f64) -> bool + 'static) -> Self {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(None));

        let next = callback.clone();
        let id = request_id.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
            id.set(None);
            if step(time) {
                id.set(request_frame(&next));
            }
        }) as Box<dyn FnMut(f64)>));

        Self {
            callback,
            request_id,
        }
    }

    fn ensure_running(&self) {
        if self.request_id.get().is_none() {
            self.request_id.set(request_frame(&self.callback));
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.request_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for FrameDriver {
    fn drop(&mut self) {
        self.cancel();
        // The closure holds a handle to its own cell
        self.callback.borrow_mut().take();
    }
}

/// Engine callbacks queue here and reach JS once the engine is released
enum Signal {
    BackToSelection,
    WinTransition(Side),
}

type SignalQueue = Rc<RefCell<Vec<Signal>>>;

fn side_name(side: Side) -> JsValue {
    JsValue::from_str(side.as_str())
}

type SharedPaddleBall = Rc<RefCell<PaddleBallEngine<CanvasSurface>>>;

/// Paddle-ball mounted on a canvas
#[wasm_bindgen]
pub struct PaddleBallView {
    engine: SharedPaddleBall,
    signals: SignalQueue,
    on_back: js_sys::Function,
    on_win: js_sys::Function,
    frames: FrameDriver,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl PaddleBallView {
    /// Mount on the canvas with id `canvas_id`. A missing canvas or 2D
    /// context leaves the view blank.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        on_back_to_selection: js_sys::Function,
        on_win_transition: js_sys::Function,
    ) -> Result<PaddleBallView, JsValue> {
        let settings = KioskSettings::load();
        let canvas = find_canvas(canvas_id)?;
        let surface = canvas.clone().and_then(CanvasSurface::new);

        let signals: SignalQueue = Rc::new(RefCell::new(Vec::new()));
        let callbacks = {
            let back = signals.clone();
            let win = signals.clone();
            PaddleBallCallbacks {
                on_back_to_selection: Box::new(move || back.borrow_mut().push(Signal::BackToSelection)),
                on_win_transition: Box::new(move |side| {
                    win.borrow_mut().push(Signal::WinTransition(side))
                }),
            }
        };
        let engine = Rc::new(RefCell::new(PaddleBallEngine::mount(
            settings.game_config(),
            surface,
            callbacks,
            seed(),
        )));

        let frames = {
            let engine = engine.clone();
            let signals = signals.clone();
            let on_back = on_back_to_selection.clone();
            let on_win = on_win_transition.clone();
            FrameDriver::new(move |time| {
                let again = engine.borrow_mut().frame(time);
                dispatch(&signals, &on_back, Some(&on_win));
                again && engine.borrow().wants_frame()
            })
        };

        let mut view = Self {
            engine,
            signals,
            on_back: on_back_to_selection,
            on_win: on_win_transition,
            frames,
            listeners: Vec::new(),
        };
        if let Some(canvas) = canvas {
            view.attach_listeners(&canvas);
        }
        Ok(view)
    }

    fn attach_listeners(&mut self, canvas: &HtmlCanvasElement) {
        let target: &EventTarget = canvas.as_ref();

        // Touch start
        {
            let engine = self.engine.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                event.prevent_default();
                let mut e = engine.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    let Some(touch) = touches.get(i) else { continue };
                    let Some((x, y)) = e
                        .surface()
                        .map(|s| s.to_surface(touch.client_x() as f64, touch.client_y() as f64))
                    else {
                        continue;
                    };
                    e.touch_start(touch.identifier(), x, y);
                }
            });
            self.listeners.push(Listener::attach(target, "touchstart", closure));
        }

        // Touch move
        {
            let engine = self.engine.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                event.prevent_default();
                let mut e = engine.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    let Some(touch) = touches.get(i) else { continue };
                    let Some((_, y)) = e
                        .surface()
                        .map(|s| s.to_surface(touch.client_x() as f64, touch.client_y() as f64))
                    else {
                        continue;
                    };
                    e.touch_move(touch.identifier(), y);
                }
            });
            self.listeners.push(Listener::attach(target, "touchmove", closure));
        }

        // Touch end / cancel
        for name in ["touchend", "touchcancel"] {
            let engine = self.engine.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let mut e = engine.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        e.touch_end(touch.identifier());
                    }
                }
            });
            self.listeners.push(Listener::attach(target, name, closure));
        }

        // Mouse move
        {
            let engine = self.engine.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let mut e = engine.borrow_mut();
                let Some((x, y)) = e
                    .surface()
                    .map(|s| s.to_surface(event.client_x() as f64, event.client_y() as f64))
                else {
                    return;
                };
                e.pointer_move(x, y);
            });
            self.listeners.push(Listener::attach(target, "mousemove", closure));
        }

        // Window resize
        if let Some(window) = web_sys::window() {
            let engine = self.engine.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                resize_paddle_ball(&engine);
            });
            self.listeners
                .push(Listener::attach(window.as_ref(), "resize", closure));
        }
    }

    /// Start a new game; ignored unless idle
    pub fn start(&mut self) -> bool {
        let started = self.engine.borrow_mut().start(now());
        if started {
            self.frames.ensure_running();
        }
        started
    }

    /// Stop the game; ignored once finished
    pub fn stop(&mut self) -> bool {
        self.frames.cancel();
        let stopped = self.engine.borrow_mut().stop();
        if !stopped && self.engine.borrow().wants_frame() {
            // Refused: keep the pending win transition alive
            self.frames.ensure_running();
        }
        stopped
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> bool {
        self.engine.borrow_mut().new_game()
    }

    pub fn resize(&mut self) {
        resize_paddle_ball(&self.engine);
    }

    #[wasm_bindgen(js_name = backToSelection)]
    pub fn back_to_selection(&mut self) {
        self.engine.borrow_mut().back_to_selection();
        dispatch(&self.signals, &self.on_back, Some(&self.on_win));
    }

    #[wasm_bindgen(getter, js_name = canInteract)]
    pub fn can_interact(&self) -> bool {
        self.engine.borrow().can_interact()
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        let name = match self.engine.borrow().phase() {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::PointScored => "point-scored",
            GamePhase::Finished => "finished",
        };
        name.to_string()
    }

    #[wasm_bindgen(getter, js_name = leftScore)]
    pub fn left_score(&self) -> u8 {
        self.engine.borrow().score().left
    }

    #[wasm_bindgen(getter, js_name = rightScore)]
    pub fn right_score(&self) -> u8 {
        self.engine.borrow().score().right
    }

    #[wasm_bindgen(getter)]
    pub fn winner(&self) -> Option<String> {
        self.engine
            .borrow()
            .winner()
            .map(|side| side.as_str().to_string())
    }

    /// Cancel the frame loop, then timers, then drop listeners
    pub fn unmount(&mut self) {
        self.frames.cancel();
        self.engine.borrow_mut().teardown();
        self.listeners.clear();
        self.signals.borrow_mut().clear();
    }
}

fn resize_paddle_ball(engine: &SharedPaddleBall) {
    let mut e = engine.borrow_mut();
    if let Some(surface) = e.surface() {
        surface.fit_to_display();
    }
    e.resize();
}

/// Hand queued engine signals to the shell. Call with no engine borrow held.
fn dispatch(signals: &SignalQueue, on_back: &js_sys::Function, on_win: Option<&js_sys::Function>) {
    let pending: Vec<Signal> = signals.borrow_mut().drain(..).collect();
    for signal in pending {
        let result = match (signal, on_win) {
            (Signal::BackToSelection, _) => on_back.call0(&JsValue::NULL),
            (Signal::WinTransition(side), Some(on_win)) => {
                on_win.call1(&JsValue::NULL, &side_name(side))
            }
            (Signal::WinTransition(side), None) => {
                log::debug!("No win handler for {}", side.as_str());
                continue;
            }
        };
        if let Err(e) = result {
            log::warn!("Shell callback failed: {:?}", e);
        }
    }
}

type SharedWheel = Rc<RefCell<WheelEngine<CanvasSurface>>>;

/// Prize wheel mounted on a canvas
#[wasm_bindgen]
pub struct WheelView {
    engine: SharedWheel,
    signals: SignalQueue,
    on_back: js_sys::Function,
    frames: FrameDriver,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WheelView {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, on_back_to_selection: js_sys::Function) -> Result<WheelView, JsValue> {
        let settings = KioskSettings::load();
        let canvas = find_canvas(canvas_id)?;
        let surface = canvas.and_then(CanvasSurface::new);

        let signals: SignalQueue = Rc::new(RefCell::new(Vec::new()));
        let callbacks = {
            let back = signals.clone();
            WheelCallbacks {
                on_back_to_selection: Box::new(move || back.borrow_mut().push(Signal::BackToSelection)),
            }
        };
        let engine = Rc::new(RefCell::new(WheelEngine::mount(
            settings.wheel(),
            settings.spin_config(),
            surface,
            callbacks,
            seed(),
        )));

        let frames = {
            let engine = engine.clone();
            FrameDriver::new(move |time| engine.borrow_mut().frame(time))
        };

        let mut listeners = Vec::new();
        if let Some(window) = web_sys::window() {
            let engine = engine.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                resize_wheel(&engine);
            });
            listeners.push(Listener::attach(window.as_ref(), "resize", closure));
        }

        Ok(Self {
            engine,
            signals,
            on_back: on_back_to_selection,
            frames,
            listeners,
        })
    }

    /// Spin toward a random prize; ignored while spinning
    pub fn spin(&mut self) -> bool {
        let spinning = self.engine.borrow_mut().spin(now());
        if spinning {
            self.frames.ensure_running();
        }
        spinning
    }

    /// Back to rotation 0; ignored while spinning
    pub fn reset(&mut self) -> bool {
        self.engine.borrow_mut().reset()
    }

    pub fn resize(&mut self) {
        resize_wheel(&self.engine);
    }

    #[wasm_bindgen(js_name = backToSelection)]
    pub fn back_to_selection(&mut self) -> bool {
        let accepted = self.engine.borrow_mut().back_to_selection();
        dispatch(&self.signals, &self.on_back, None);
        accepted
    }

    #[wasm_bindgen(getter, js_name = isSpinning)]
    pub fn is_spinning(&self) -> bool {
        self.engine.borrow().is_spinning()
    }

    #[wasm_bindgen(getter, js_name = canInteract)]
    pub fn can_interact(&self) -> bool {
        self.engine.borrow().can_interact()
    }

    #[wasm_bindgen(getter, js_name = prizeIndex)]
    pub fn prize_index(&self) -> Option<u32> {
        self.engine.borrow().prize_index().map(|i| i as u32)
    }

    #[wasm_bindgen(getter, js_name = prizeLabel)]
    pub fn prize_label(&self) -> Option<String> {
        self.engine.borrow().prize().map(|p| p.label.clone())
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.engine.borrow().rotation()
    }

    pub fn unmount(&mut self) {
        self.frames.cancel();
        self.engine.borrow_mut().teardown();
        self.listeners.clear();
        self.signals.borrow_mut().clear();
    }
}

fn resize_wheel(engine: &SharedWheel) {
    let mut e = engine.borrow_mut();
    if let Some(surface) = e.surface() {
        surface.fit_to_display();
    }
    e.resize();
}
