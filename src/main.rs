//! Flappy Qor entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, HtmlElement,
        HtmlImageElement, KeyboardEvent, PointerEvent, VisibilityState, Window,
    };

    use flappy_qor::consts::{LOGO_SRC, OVER_SCREEN_DELAY_MS};
    use flappy_qor::platform::asset::load_image;
    use flappy_qor::platform::input::action_for_pointer;
    use flappy_qor::platform::{Action, AssetState, LocalStore, action_for_key};
    use flappy_qor::renderer::{CanvasSurface, draw_frame};
    use flappy_qor::sim::GameEvent;
    use flappy_qor::{Game, Tuning};

    /// Game instance plus everything the browser side owns
    struct App {
        game: Game<LocalStore>,
        surface: CanvasSurface,
        sprite: AssetState<HtmlImageElement>,
        document: Document,
    }

    impl App {
        fn element(&self, id: &str) -> Option<HtmlElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.element(id) {
                let display = if visible { "grid" } else { "none" };
                if let Err(e) = el.style().set_property("display", display) {
                    log::warn!("Could not toggle #{}: {:?}", id, e);
                }
            }
        }

        fn update_hud(&self) {
            self.set_text("score", &self.game.score().to_string());
            self.set_text("best", &self.game.best().to_string());
        }

        /// Run simulation, react to its events, then paint
        fn frame(app: &Rc<RefCell<App>>, time: f64) {
            let mut a = app.borrow_mut();
            let events = a.game.frame(time);

            for event in &events {
                match event {
                    GameEvent::Started => {
                        a.set_visible("start", false);
                        a.set_visible("over", false);
                    }
                    GameEvent::Crashed { score, best, .. } => {
                        a.set_text("finalScore", &score.to_string());
                        a.set_text("finalBest", &best.to_string());
                        show_over_screen_later(app.clone());
                    }
                    _ => {}
                }
            }
            if !events.is_empty() {
                a.update_hud();
            }

            let App {
                game,
                surface,
                sprite,
                ..
            } = &mut *a;
            draw_frame(&game.world, surface, sprite.ready());
        }

        fn handle(&mut self, action: Action) {
            self.game.handle(action);
            match action {
                Action::Restart => {
                    self.set_visible("over", false);
                    self.set_visible("start", true);
                }
                Action::ToggleMute => {
                    let label = self.game.settings.sound_label();
                    self.set_text("muteBtn", label);
                }
                _ => {}
            }
        }
    }

    fn show_over_screen_later(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::warn!("No window - game over screen not scheduled");
            return;
        };
        let closure = Closure::once(move || {
            let a = app.borrow();
            // A quick restart may already have left the game-over screen
            if a.game.phase() == flappy_qor::sim::Phase::Over {
                a.set_visible("over", true);
            }
        });
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            OVER_SCREEN_DELAY_MS,
        ) {
            log::warn!("Could not schedule game over screen: {:?}", e);
        }
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Qor starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let store = LocalStore::open();
        let tuning = Tuning::load(&store);
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, tuning, store),
            surface: CanvasSurface::new(ctx),
            sprite: AssetState::Loading,
            document,
        }));
        log::info!("Game initialized with seed: {}", seed);

        {
            let a = app.borrow();
            a.update_hud();
            a.set_text("muteBtn", a.game.settings.sound_label());
        }

        load_sprite(app.clone());
        setup_input_handlers(&window, &canvas, app.clone());
        setup_buttons(app.clone());
        setup_auto_pause(app.clone());

        request_animation_frame(&window, app);
        log::info!("Flappy Qor running!");
    }

    fn load_sprite(app: Rc<RefCell<App>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let result = load_image(LOGO_SRC).await;
            let mut a = app.borrow_mut();
            if let Ok(image) = &result {
                a.game
                    .sprite_loaded(image.natural_width() as f32, image.natural_height() as f32);
            }
            a.sprite = AssetState::resolve(result, "sprite image");
        });
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer press
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                app.borrow_mut().handle(action_for_pointer());
            });
            listen(canvas, "pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(action) = action_for_key(&event.code(), &event.key()) else {
                    return;
                };
                if action == Action::Flap {
                    // Keep Space from scrolling the page
                    event.prevent_default();
                }
                app.borrow_mut().handle(action);
            });
            listen(window, "keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let buttons = [
            ("playBtn", Action::Play),
            ("againBtn", Action::Restart),
            ("shareBtn", Action::Share),
            ("muteBtn", Action::ToggleMute),
        ];
        let document = app.borrow().document.clone();

        for (id, action) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().handle(action);
            });
            listen(&btn, "click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn listen(target: &EventTarget, kind: &str, callback: &js_sys::Function) {
        if let Err(e) = target.add_event_listener_with_callback(kind, callback) {
            log::warn!("Could not listen for {}: {:?}", kind, e);
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            if document_clone.visibility_state() == VisibilityState::Hidden {
                app.borrow_mut().game.page_hidden();
            }
        });
        listen(&document, "visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(window: &Window, app: Rc<RefCell<App>>) {
        let next = window.clone();
        let closure = Closure::once(move |time: f64| {
            App::frame(&app, time);
            request_animation_frame(&next, app);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::warn!("requestAnimationFrame failed - game loop stopped: {:?}", e);
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_qor::consts::NOMINAL_FRAME_MS;
    use flappy_qor::platform::{Action, MemoryStore};
    use flappy_qor::renderer::{RecordingSurface, draw_frame};
    use flappy_qor::sim::{GameEvent, Phase};
    use flappy_qor::{Game, Tuning};

    env_logger::init();
    log::info!("Flappy Qor (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    const SESSIONS: u32 = 3;
    const MAX_FRAMES: u32 = 60 * 120;

    // Usage: flappy-qor [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(42);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_default(),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let mut game = Game::new(seed, tuning, MemoryStore::new());
    let mut now = 0.0f64;

    for session in 1..=SESSIONS {
        game.handle(Action::Play);
        for _ in 0..MAX_FRAMES {
            if autopilot_should_flap(&game.world) {
                game.handle(Action::Flap);
            }
            let events = game.frame(now);
            now += NOMINAL_FRAME_MS as f64;
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::Crashed { .. }))
            {
                break;
            }
        }

        let mut surface = RecordingSurface::new();
        draw_frame(&game.world, &mut surface, None);
        println!(
            "session {}: score {} best {} ({} draw calls in final frame)",
            session,
            game.score(),
            game.best(),
            surface.commands.len()
        );

        if game.phase() == Phase::Over {
            game.handle(Action::Restart);
            game.frame(now);
            now += NOMINAL_FRAME_MS as f64;
        }
    }
}

/// Flap when falling below the next gap's centre
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_should_flap(world: &flappy_qor::sim::World) -> bool {
    let sprite = &world.sprite;
    let target = world
        .obstacles
        .iter()
        .find(|o| o.right_edge() >= sprite.pos.x)
        .map(|o| o.gap_center())
        .unwrap_or(flappy_qor::consts::VIEW_HEIGHT / 2.0);
    sprite.vy > 0.0 && sprite.pos.y + sprite.size.y / 2.0 > target + 10.0
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
