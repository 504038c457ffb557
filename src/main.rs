//! Neon Swarm entry point
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
        CanvasRenderingContext2d, Element, Gamepad, GamepadButton, HtmlCanvasElement, HtmlElement,
        KeyboardEvent, MouseEvent, TouchEvent,
    };

    use glam::Vec2;
    use neon_swarm::consts::STICK_MAX_RADIUS;
    use neon_swarm::render::{Color, Surface};
    use neon_swarm::sim::SessionPhase;
    use neon_swarm::ui::{HudSink, ResultModal};
    use neon_swarm::{Bounds, GameSession, InputMailbox};

    /// Canvas 2D implementation of the draw surface.
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        size: (f32, f32),
    }

    impl Surface for CanvasSurface {
        fn clear_fade(&mut self, alpha: f32) {
            self.ctx
                .set_fill_style_str(&format!("rgba(17, 17, 17, {alpha})"));
            self.ctx
                .fill_rect(0.0, 0.0, self.size.0 as f64, self.size.1 as f64);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32, glow: f32) {
            let css = color.to_css();
            self.ctx.save();
            self.ctx.set_global_alpha(alpha as f64);
            if glow > 0.0 {
                self.ctx.set_shadow_blur(glow as f64);
                self.ctx.set_shadow_color(&css);
            }
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.set_fill_style_str(&css);
            self.ctx.fill();
            self.ctx.restore();
        }
    }

    /// Score/round text plus the transition highlight, backed by DOM nodes.
    struct DomHud {
        score_el: Element,
        round_el: Element,
    }

    impl HudSink for DomHud {
        fn set_score(&mut self, score: u64) {
            self.score_el
                .set_text_content(Some(&format!("Score: {score}")));
        }

        fn set_round(&mut self, round: u32) {
            self.round_el
                .set_text_content(Some(&format!("Round: {round}")));
        }

        fn set_round_highlight(&mut self, on: bool) {
            if on {
                let _ = self.round_el.class_list().add_1("highlight");
            } else {
                let _ = self.round_el.class_list().remove_1("highlight");
            }
        }
    }

    /// Start/game-over overlay.
    struct DomModal {
        root: Element,
        title: Element,
        subtitle: Element,
    }

    impl ResultModal for DomModal {
        fn show(&mut self, title: &str, subtitle: &str) {
            self.title.set_text_content(Some(title));
            self.subtitle.set_text_content(Some(subtitle));
            let _ = self.root.class_list().remove_1("hidden");
        }

        fn hide(&mut self) {
            let _ = self.root.class_list().add_1("hidden");
        }
    }

    /// Game instance holding all state.
    struct Game {
        session: GameSession,
        mailbox: InputMailbox,
        surface: CanvasSurface,
        hud: DomHud,
        modal: DomModal,
        viewport: (f32, f32),
    }

    impl Game {
        /// Poll the first connected pad into the mailbox. A missing or
        /// disconnected pad reports `None` and falls out of arbitration.
        fn poll_gamepad(&mut self) {
            let report = first_gamepad().map(|pad| {
                let axes = pad.axes();
                let mut snapshot = neon_swarm::input::GamepadSnapshot::default();
                for (i, slot) in snapshot.axes.iter_mut().enumerate() {
                    *slot = axes.get(i as u32).as_f64().unwrap_or(0.0) as f32;
                }
                let buttons = pad.buttons();
                snapshot.trigger = button_pressed(&buttons, 7);
                snapshot.primary = button_pressed(&buttons, 0);
                snapshot
            });
            self.mailbox.gamepad_report(report);
        }
    }

    fn first_gamepad() -> Option<Gamepad> {
        let pads = web_sys::window()?.navigator().get_gamepads().ok()?;
        let first = pads.get(0);
        if first.is_undefined() || first.is_null() {
            return None;
        }
        first.dyn_into::<Gamepad>().ok()
    }

    fn button_pressed(buttons: &js_sys::Array, index: u32) -> bool {
        let value = buttons.get(index);
        if value.is_undefined() || value.is_null() {
            return false;
        }
        value.unchecked_into::<GamepadButton>().pressed()
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn element(id: &str) -> Element {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .unwrap_or_else(|| panic!("missing element #{id}"))
    }

    fn set_knob_offset(id: &str, offset: Vec2) {
        if let Some(knob) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = knob.style().set_property(
                "transform",
                &format!(
                    "translate(-50%, -50%) translate({:.1}px, {:.1}px)",
                    offset.x, offset.y
                ),
            );
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Swarm starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0) as f32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0) as f32;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // Touch controls only make sense on touch devices
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let is_mobile = ["Android", "iPhone", "iPad", "Mobile"]
            .iter()
            .any(|needle| user_agent.contains(needle));
        if is_mobile {
            for id in ["stick-left-zone", "stick-right-zone"] {
                let _ = element(id).class_list().remove_1("hidden");
            }
        }

        let game = Rc::new(RefCell::new(Game {
            session: GameSession::new(Bounds::new(width, height)),
            mailbox: InputMailbox::default(),
            surface: CanvasSurface {
                ctx,
                size: (width, height),
            },
            hud: DomHud {
                score_el: element("hud-score"),
                round_el: element("hud-round"),
            },
            modal: DomModal {
                root: element("modal"),
                title: element("modal-title"),
                subtitle: element("modal-subtitle"),
            },
            viewport: (width, height),
        }));

        setup_resize_handler(&canvas, game.clone());
        setup_input_handlers(game.clone());
        setup_start_button(game.clone());

        log::info!("Neon Swarm ready ({width}x{height})");
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0) as f32;
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0) as f32;
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);

            let mut g = game.borrow_mut();
            g.viewport = (width, height);
            g.surface.size = (width, height);
            g.session.set_bounds(Bounds::new(width, height));
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().mailbox.key_event(&event.key(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().mailbox.key_event(&event.key(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .mailbox
                    .pointer_moved(Vec2::new(event.client_x() as f32, event.client_y() as f32));
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().mailbox.pointer_button(true);
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().mailbox.pointer_button(false);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch joysticks
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let viewport_width = g.viewport.0;
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                        g.mailbox
                            .touch_start(touch.identifier(), pos, viewport_width);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                        g.mailbox.touch_move(touch.identifier(), pos);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        g.mailbox.touch_end(touch.identifier());
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let button = element("start-btn");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let seed = js_sys::Date::now() as u64;
            {
                let mut g = game.borrow_mut();
                if g.session.phase() == SessionPhase::Running {
                    return;
                }
                let Game {
                    session,
                    hud,
                    modal,
                    ..
                } = &mut *g;
                session.start(seed, now_ms(), hud, modal);
            }
            // The loop stopped scheduling itself at game over; kick it again
            request_animation_frame(game.clone());
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.poll_gamepad();
            let snapshot = g.mailbox.snapshot();
            let Game {
                session,
                surface,
                hud,
                modal,
                mailbox,
                ..
            } = &mut *g;
            let keep = session.frame(&snapshot, time, surface, hud, modal);

            // On-screen knob feedback
            let (move_vec, aim_vec) = mailbox.stick_vectors();
            set_knob_offset("stick-left", move_vec * STICK_MAX_RADIUS);
            set_knob_offset("stick-right", aim_vec * STICK_MAX_RADIUS);

            keep
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use neon_swarm::render::NullSurface;
    use neon_swarm::ui::{NullHud, NullModal};
    use neon_swarm::{Bounds, GameSession, InputMailbox};

    env_logger::init();
    log::info!("Neon Swarm (native) starting...");

    // Headless smoke run: aim right, hold fire, survive as long as possible.
    let mut session = GameSession::new(Bounds::new(800.0, 600.0));
    let mut hud = NullHud;
    let mut modal = NullModal;
    session.start(42, 0.0, &mut hud, &mut modal);

    let mut mailbox = InputMailbox::default();
    mailbox.pointer_moved(Vec2::new(800.0, 300.0));
    mailbox.pointer_button(true);
    let snapshot = mailbox.snapshot();

    let mut frames = 0u32;
    for i in 0..3600u32 {
        let now_ms = i as f64 * (1000.0 / 60.0);
        if !session.frame(&snapshot, now_ms, &mut NullSurface, &mut hud, &mut modal) {
            break;
        }
        frames += 1;
    }

    log::info!(
        "smoke run: {frames} frames, round {}, score {}",
        session.round(),
        session.score()
    );
    println!(
        "Survived {frames} frames | Round: {} | Score: {}",
        session.round(),
        session.score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
