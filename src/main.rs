//! Trispin entry point
//!
//! On the web this wires the canvas and pointer events to a `Spinner` and
//! runs the frame loop. Natively it runs a short scripted drag headlessly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use trispin::renderer::{DrawCall, RenderError, RenderState, SHAPES};
    use trispin::{PixelRatio, Settings, Spinner};

    struct App {
        spinner: Spinner,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        ratio: PixelRatio,
        draws: Vec<DrawCall>,
    }

    fn current_ratio() -> PixelRatio {
        web_sys::window()
            .map(|w| PixelRatio(w.device_pixel_ratio() as f32))
            .unwrap_or_default()
    }

    impl App {
        fn new(canvas: HtmlCanvasElement, settings: Settings) -> Self {
            Self {
                spinner: Spinner::new(settings),
                render_state: None,
                canvas,
                ratio: current_ratio(),
                draws: Vec::with_capacity(SHAPES.len()),
            }
        }

        fn surface_pos(&self, event: &PointerEvent) -> (f32, f32) {
            self.ratio.surface_pos(event.offset_x(), event.offset_y())
        }

        /// Match the canvas backing store to its CSS size
        fn sync_canvas_size(&mut self) -> (u32, u32) {
            let (width, height) = self
                .ratio
                .surface_size(self.canvas.client_width(), self.canvas.client_height());
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            (width, height)
        }

        fn resize(&mut self) {
            // Zoom or a move to another monitor changes the ratio
            self.ratio = current_ratio();
            let (width, height) = self.sync_canvas_size();
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
            self.spinner.on_surface_resized(width, height);
        }

        /// Render one frame. Returns false once rendering has failed.
        fn frame(&mut self) -> bool {
            let Some(ref mut render_state) = self.render_state else {
                return true;
            };

            self.draws.clear();
            if self.spinner.on_frame_tick(&mut self.draws).is_none() {
                return true;
            }

            match render_state.render(&self.draws) {
                Ok(()) => true,
                Err(e) => {
                    log::error!("Rendering stopped: {e}");
                    false
                }
            }
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        settings: &Settings,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, settings).await
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Trispin starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let app = Rc::new(RefCell::new(App::new(canvas.clone(), settings.clone())));
        let (width, height) = app.borrow_mut().sync_canvas_size();

        match init_renderer(&canvas, width, height, &settings).await {
            Ok(render_state) => {
                let mut a = app.borrow_mut();
                a.render_state = Some(render_state);
                a.spinner.on_surface_ready();
                a.spinner.on_surface_resized(width, height);
            }
            Err(e) => {
                log::error!("Failed to initialize renderer: {e}");
                return;
            }
        }

        setup_input_handlers(&canvas, app.clone());
        setup_resize_handler(app.clone());

        request_animation_frame(app);

        log::info!("Trispin running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer down - capture so moves outside the canvas still arrive
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let _ = canvas_clone.set_pointer_capture(event.pointer_id());
                let mut a = app.borrow_mut();
                let (x, y) = a.surface_pos(&event);
                a.spinner
                    .on_pointer_down(event.pointer_id(), x, y, event.time_stamp());
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move - hover moves and other fingers are dropped by the spinner
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut a = app.borrow_mut();
                let (x, y) = a.surface_pos(&event);
                a.spinner
                    .on_pointer_move(event.pointer_id(), x, y, event.time_stamp());
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                app.borrow_mut().spinner.on_pointer_up(event.pointer_id());
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer cancel (touch stolen by the browser, etc.)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                app.borrow_mut()
                    .spinner
                    .on_pointer_cancel(event.pointer_id());
            });
            let _ = canvas.add_event_listener_with_callback(
                "pointercancel",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Keyboard kick
        {
            let app = app.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "b" | "B") {
                    app.borrow_mut().spinner.boost();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Kick button
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("boost") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().spinner.boost();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        let keep_running = app.borrow_mut().frame();
        if keep_running {
            request_animation_frame(app);
        } else {
            log::error!("Frame loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Trispin (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drag across the right half of a portrait surface, let go, and watch the
/// spin decay.
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use trispin::renderer::DrawCall;
    use trispin::{Settings, Spinner};

    const WIDTH: u32 = 720;
    const HEIGHT: u32 = 1280;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    const FINGER: i32 = 0;

    let settings = Settings::load();
    match settings.to_json() {
        Ok(json) => log::debug!("Effective settings: {json}"),
        Err(e) => log::warn!("Cannot serialize settings: {e}"),
    }
    let mut spinner = Spinner::new(settings);
    spinner.on_surface_ready();
    spinner.on_surface_resized(WIDTH, HEIGHT);

    let mut draws: Vec<DrawCall> = Vec::new();
    let mut time_ms = 0.0;

    spinner.on_pointer_down(FINGER, 600.0, 300.0, time_ms);
    for step in 1..=12 {
        time_ms += FRAME_MS;
        spinner.on_pointer_move(FINGER, 600.0, 300.0 + step as f32 * 15.0, time_ms);
        draws.clear();
        spinner.on_frame_tick(&mut draws);
    }
    spinner.on_pointer_up(FINGER);
    log::info!(
        "Released at angle {:.2} with velocity {:.3}",
        spinner.motion().angle,
        spinner.motion().angular_velocity
    );

    spinner.boost();

    for frame in 1..=600 {
        draws.clear();
        spinner.on_frame_tick(&mut draws);
        if frame % 60 == 0 {
            let motion = spinner.motion();
            println!(
                "frame {:4}: angle {:9.3}  velocity {:.4}  draws {}",
                frame,
                motion.angle,
                motion.angular_velocity,
                draws.len()
            );
        }
    }

    println!("✓ {} frames composed", spinner.frame_count());
}
