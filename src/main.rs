//! Wizard vs Ogres entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use glam::Vec2;
    use web_sys::{
        Document, EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent,
        TouchEvent, Window,
    };

    use wizard_vs_ogres::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use wizard_vs_ogres::platform::touch::{JOYSTICK_AREA_ID, JOYSTICK_KNOB_ID};
    use wizard_vs_ogres::platform::{TouchButton, required_element_ids};
    use wizard_vs_ogres::render::WebCanvas;
    use wizard_vs_ogres::{Game, GameConfig, InitError};

    const CANVAS_ID: &str = "gameCanvas";

    /// Game plus the surface it draws on
    struct App {
        game: Game,
        canvas: WebCanvas,
    }

    type Shared = Rc<RefCell<App>>;

    pub fn run() -> Result<(), InitError> {
        console_error_panic_hook::set_once();
        // Fails only if a logger is already installed
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Wizard vs Ogres starting...");

        let window = web_sys::window().ok_or(InitError::NoWindow)?;
        let document = window.document().ok_or(InitError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| InitError::MissingElement {
                id: CANVAS_ID.to_string(),
            })?
            .dyn_into()
            .map_err(|_| InitError::WrongElementType {
                id: CANVAS_ID.to_string(),
                expected: "canvas",
            })?;

        let (width, height) = viewport_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let config = GameConfig::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(config, seed, width, height),
            canvas: WebCanvas::new(&canvas)?,
        }));

        log::info!("Game initialized with seed: {}", seed);

        check_controls(&document)?;
        setup_resize(&window, &canvas, app.clone());
        setup_keyboard(&window, app.clone());
        setup_canvas_taps(&canvas, app.clone());
        setup_joystick(&document, app.clone())?;
        setup_touch_buttons(&document, app.clone())?;
        setup_auto_pause(&window, &document, app.clone());

        request_animation_frame(app);

        log::info!("Wizard vs Ogres running!");
        Ok(())
    }

    fn viewport_size(window: &Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(SCREEN_WIDTH as f64);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(SCREEN_HEIGHT as f64);
        (w as f32, h as f32)
    }

    /// Attach a handler that lives for the rest of the page
    fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(web_sys::Event) + 'static) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn first_touch_x(event: &TouchEvent) -> Option<f32> {
        event
            .touches()
            .get(0)
            .or_else(|| event.changed_touches().get(0))
            .map(|t| t.client_x() as f32)
    }

    fn setup_resize(window: &Window, canvas: &HtmlCanvasElement, app: Shared) {
        let canvas = canvas.clone();
        let win = window.clone();
        listen(window, "resize", move |_| {
            let (w, h) = viewport_size(&win);
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            app.borrow_mut().game.resize(w, h);
        });
    }

    fn setup_keyboard(window: &Window, app: Shared) {
        {
            let app = app.clone();
            listen(window, "keydown", move |event| {
                let event: KeyboardEvent = event.unchecked_into();
                let action = app
                    .borrow_mut()
                    .game
                    .input
                    .key_down(&event.code(), event.repeat());
                // Keep arrows and space from scrolling the page
                if action.is_some() {
                    event.prevent_default();
                }
            });
        }
        listen(window, "keyup", move |event| {
            let event: KeyboardEvent = event.unchecked_into();
            app.borrow_mut().game.input.key_up(&event.code());
        });
    }

    /// Taps start the game and choose upgrade cards
    fn setup_canvas_taps(canvas: &HtmlCanvasElement, app: Shared) {
        {
            let app = app.clone();
            let surface = canvas.clone();
            listen(canvas, "touchstart", move |event| {
                event.prevent_default();
                let event: TouchEvent = event.unchecked_into();
                let bounds = surface.get_bounding_client_rect();
                let pos = event.changed_touches().get(0).map(|t| {
                    Vec2::new(
                        t.client_x() as f32 - bounds.left() as f32,
                        t.client_y() as f32 - bounds.top() as f32,
                    )
                });
                let mut app = app.borrow_mut();
                match pos {
                    Some(pos) => app.game.input.tap(pos),
                    None => app.game.input.any_input(),
                }
            });
        }
        listen(canvas, "mousedown", move |event| {
            let event: MouseEvent = event.unchecked_into();
            let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            app.borrow_mut().game.input.tap(pos);
        });
    }

    /// A control the page must provide
    fn require_html(document: &Document, id: &str) -> Result<HtmlElement, InitError> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| InitError::MissingElement { id: id.to_string() })?
            .dyn_into::<HtmlElement>()
            .map_err(|_| InitError::WrongElementType {
                id: id.to_string(),
                expected: "styled element",
            })
    }

    fn move_knob(knob: &Option<HtmlElement>, offset: f32) {
        if let Some(knob) = knob {
            let _ = knob
                .style()
                .set_property("transform", &format!("translate({offset}px, 0px)"));
        }
    }

    /// Fail before wiring anything if the page lacks a touch control
    fn check_controls(document: &Document) -> Result<(), InitError> {
        for id in required_element_ids() {
            require_html(document, id)?;
        }
        Ok(())
    }

    fn setup_joystick(document: &Document, app: Shared) -> Result<(), InitError> {
        let area = require_html(document, JOYSTICK_AREA_ID)?;
        // The knob is decoration; the stick works without it
        let knob = require_html(document, JOYSTICK_KNOB_ID).ok();

        {
            let app = app.clone();
            listen(&area, "touchstart", move |event| {
                event.prevent_default();
                let event: TouchEvent = event.unchecked_into();
                if let Some(x) = first_touch_x(&event) {
                    app.borrow_mut().game.input.joystick_begin(x);
                }
            });
        }
        {
            let app = app.clone();
            let knob = knob.clone();
            listen(&area, "touchmove", move |event| {
                event.prevent_default();
                let event: TouchEvent = event.unchecked_into();
                if let Some(x) = first_touch_x(&event) {
                    let offset = app.borrow_mut().game.input.joystick_move(x);
                    move_knob(&knob, offset);
                }
            });
        }
        for kind in ["touchend", "touchcancel"] {
            let app = app.clone();
            let knob = knob.clone();
            listen(&area, kind, move |_| {
                app.borrow_mut().game.input.joystick_end();
                move_knob(&knob, 0.0);
            });
        }
        Ok(())
    }

    fn setup_touch_buttons(document: &Document, app: Shared) -> Result<(), InitError> {
        for button in TouchButton::ALL {
            let el = require_html(document, button.element_id())?;
            {
                let app = app.clone();
                listen(&el, "touchstart", move |event| {
                    event.prevent_default();
                    app.borrow_mut().game.input.button_down(button);
                });
            }
            if button.is_held() {
                for kind in ["touchend", "touchcancel"] {
                    let app = app.clone();
                    listen(&el, kind, move |_| {
                        app.borrow_mut().game.input.button_up(button);
                    });
                }
            }
        }
        Ok(())
    }

    fn setup_auto_pause(window: &Window, document: &Document, app: Shared) {
        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let doc = document.clone();
            listen(document, "visibilitychange", move |_| {
                if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().game.suspend();
                }
            });
        }

        // Window blur (click outside)
        listen(window, "blur", move |_| {
            app.borrow_mut().game.suspend();
        });
    }

    fn request_animation_frame(app: Shared) {
        let Some(window) = web_sys::window() else {
            log::error!("Window vanished; stopping the game loop");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Shared) {
        {
            let mut guard = app.borrow_mut();
            let App { game, canvas } = &mut *guard;
            game.frame(canvas);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()?;
    Ok(())
}

/// Headless demo: the autopilot plays a seeded run and the summary is logged
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use wizard_vs_ogres::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use wizard_vs_ogres::render::RecordingCanvas;
    use wizard_vs_ogres::{Game, GameConfig};

    env_logger::init();
    log::info!("Wizard vs Ogres (native) starting...");
    log::info!("The playable game is the web build; running a headless autopilot demo");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    let mut game = Game::new(GameConfig::load(), seed, SCREEN_WIDTH, SCREEN_HEIGHT);
    game.input.autopilot = true;

    let mut canvas = RecordingCanvas::new();
    for frame in 1..=frames {
        canvas.clear();
        game.frame(&mut canvas);
        if frame % 600 == 0 {
            log::info!(
                "frame {frame}: wave {} score {} coins {} health {}",
                game.state.wave,
                game.state.score,
                game.state.coins,
                game.state.player.health
            );
        }
    }

    match serde_json::to_string_pretty(&game.summary()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Could not serialize run summary: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
