//! Knife Hit entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent, TouchEvent};

    use knife_hit::Settings;
    use knife_hit::audio::{AudioManager, SoundEffect};
    use knife_hit::consts::*;
    use knife_hit::renderer::{FrameLayout, SdfRenderState};
    use knife_hit::sim::{GameEvent, Scene, SceneFlow, TickInput, tick};

    /// How fast collision shake fades (per second)
    const SHAKE_DECAY: f32 = 3.0;

    /// Game instance holding all state
    struct Game {
        flow: SceneFlow,
        render_state: Option<SdfRenderState>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        shake: f32,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                flow: SceneFlow::new(seed),
                render_state: None,
                audio: AudioManager::new(&settings),
                input: TickInput {
                    tap: false,
                    autoplay: settings.autoplay,
                },
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                shake: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks, then react to what happened
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.flow, &input, SIM_DT_MS);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Taps are one-shot
                self.input.tap = false;
            }

            for event in self.flow.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                if event == GameEvent::Collide && self.settings.screen_shake {
                    self.shake = 1.0;
                }
            }
            self.shake = (self.shake - dt * SHAKE_DECAY).max(0.0);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let layout = FrameLayout::from_flow(&self.flow);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&layout, self.shake, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements and overlays in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let scene = self.flow.scene;
            let game = &self.flow.game;
            let round = &self.flow.round;

            set_text(&document, "#hud-lives .hud-value", &game.lives.to_string());
            set_text(
                &document,
                "#hud-level .hud-value",
                &game.level.min(MAX_LEVEL).to_string(),
            );
            set_text(&document, "#hud-countdown .hud-value", &round.countdown.to_string());
            set_text(&document, "#hud-knives .hud-value", &round.slots_left().to_string());
            set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());
            set_visible(&document, "hud-fps", "hud-item", self.settings.show_fps);

            set_visible(&document, "hud", "", scene == Scene::Play);
            set_visible(&document, "start-screen", "overlay", scene == Scene::Load);
            set_visible(&document, "pass-screen", "overlay", scene == Scene::Pass);
            set_visible(&document, "over-screen", "overlay", scene == Scene::Over);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    /// Show or hide an element, keeping its base class
    fn set_visible(document: &Document, id: &str, base_class: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible {
                base_class.to_string()
            } else {
                format!("{base_class} hidden")
            };
            if el.get_attribute("class").as_deref() != Some(class.as_str()) {
                let _ = el.set_attribute("class", &class);
            }
        }
    }

    fn js_err(context: &str, err: JsValue) -> anyhow::Error {
        anyhow!("{context}: {err:?}")
    }

    pub async fn run() -> anyhow::Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)?;

        log::info!("Knife Hit starting...");

        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .context("no canvas")?
            .dyn_into()
            .map_err(|_| anyhow!("#canvas is not a canvas element"))?;

        let settings = Settings::from_optional_json(canvas.get_attribute("data-settings").as_deref());
        log::info!("Settings: {:?}", settings);

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = SdfRenderState::new(surface, &adapter, width, height).await?;
        render_state.set_start_time(js_sys::Date::now());
        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            // Everything the Play scene draws is procedural, so the renderer is the last asset
            g.flow.mark_ready();
        }

        set_visible(&document, "loading", "overlay", false);

        setup_input_handlers(&window, &canvas, game.clone())?;

        request_animation_frame(game);

        log::info!("Knife Hit running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> anyhow::Result<()> {
        // Pointer down covers mouse, pen and touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.input.tap = true;
                g.audio.resume();
            });
            canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
                .map_err(|e| js_err("pointerdown listener", e))?;
            closure.forget();
        }

        // Keep touches from scrolling or zooming the page
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())
                .map_err(|e| js_err("touchstart listener", e))?;
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => {
                        g.input.tap = true;
                        g.audio.resume();
                    }
                    "a" | "A" => {
                        g.input.autoplay = !g.input.autoplay;
                        log::info!("Autoplay: {}", g.input.autoplay);
                    }
                    _ => {}
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(|e| js_err("keydown listener", e))?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("window disappeared; stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Knife Hit failed to start: {e:#}");
    }
}

/// Upper bound on a headless session (ten simulated minutes)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_MAX_TICKS: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use knife_hit::consts::SIM_DT_MS;
    use knife_hit::sim::{GameEvent, SceneFlow, TickInput, tick};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    log::info!("Knife Hit (native) starting headless autoplay");
    log::info!("The playable version is the wasm build - run with `trunk serve`");

    let mut flow = SceneFlow::new(seed);
    flow.mark_ready();
    let input = TickInput {
        tap: false,
        autoplay: true,
    };

    let mut throws = 0u32;
    let mut collisions = 0u32;
    while flow.time_ticks < HEADLESS_MAX_TICKS {
        tick(&mut flow, &input, SIM_DT_MS);
        for event in flow.drain_events() {
            match event {
                GameEvent::Throw => throws += 1,
                GameEvent::Collide => collisions += 1,
                _ => {}
            }
        }
        // Autoplay would acknowledge the result screen and start over
        if flow.scene.is_terminal() {
            break;
        }
    }

    log::info!(
        "Session ended in {} after {} ticks: level {}, lives {}, {} throws, {} collisions",
        flow.scene.as_str(),
        flow.time_ticks,
        flow.game.level,
        flow.game.lives,
        throws,
        collisions
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
