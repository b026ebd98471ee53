mod result_modal;
mod slice_painter;
mod wheel_canvas;
pub mod wheel_utils;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use shared::{FairRng, Outcome, Selection, WheelConfig, WheelError, WheelEvent, WheelGame};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;
use yew::prelude::*;

use crate::storage::LocalStorageStore;
use crate::styles;

use result_modal::ResultModal;
use wheel_canvas::WheelCanvas;
use wheel_utils::{
    fallback_seed, now_ms, status_for_error, status_for_event, ResetButton, SpinButton, StatusLine,
};

type Game = WheelGame<LocalStorageStore>;

// Add custom CSS for animations
const CUSTOM_CSS: &str = r#"
@keyframes pulse-subtle {
    0% {
        transform: scale(1);
        box-shadow: 0 0 0 0 rgba(255, 167, 38, 0.4);
    }
    70% {
        transform: scale(1.02);
        box-shadow: 0 0 0 10px rgba(255, 167, 38, 0);
    }
    100% {
        transform: scale(1);
        box-shadow: 0 0 0 0 rgba(255, 167, 38, 0);
    }
}

.animate-pulse-subtle {
    animation: pulse-subtle 2s infinite;
}

@media (prefers-reduced-motion: reduce) {
    .animate-pulse-subtle {
        animation: none;
    }
}
"#;

fn build_game(config: WheelConfig) -> Option<Game> {
    let store = LocalStorageStore::new(config.storage_key.clone());
    let rng = FairRng::new(fallback_seed());
    match WheelGame::new(config, rng, store) {
        Ok(game) => Some(game),
        Err(e) => {
            log::error!("wheel configuration rejected: {e}");
            None
        }
    }
}

/// The one requestAnimationFrame callback, reused for every frame.
#[derive(Default)]
struct FrameLoop {
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

/// Everything the event handlers, the frame loop and the reset timer need,
/// cheap to clone into closures.
#[derive(Clone)]
struct WheelUi {
    game: Rc<RefCell<Option<Game>>>,
    outcomes: UseStateSetter<Rc<Vec<Outcome>>>,
    rotation: UseStateSetter<f64>,
    pointer_deg: UseStateSetter<f64>,
    spinning: UseStateSetter<bool>,
    status: UseStateSetter<String>,
    selection: UseStateSetter<Option<Selection>>,
    frame_loop: Rc<FrameLoop>,
    reset_timer: Rc<RefCell<Option<Timeout>>>,
}

impl WheelUi {
    fn spin(&self) {
        let started = match self.game.borrow_mut().as_mut() {
            Some(game) => game.start_spin(now_ms()),
            None => return,
        };
        match started {
            Ok(event) => {
                self.spinning.set(true);
                self.apply(vec![event]);
                self.start_frames();
            }
            Err(e) => self.report(&e),
        }
    }

    fn reset(&self) {
        let reset = match self.game.borrow_mut().as_mut() {
            Some(game) => game.reset(),
            None => return,
        };
        match reset {
            Ok(event) => self.apply(vec![event]),
            Err(e) => self.report(&e),
        }
    }

    fn close_result(&self) {
        self.selection.set(None);
        let event = self.game.borrow_mut().as_mut().and_then(|game| game.acknowledge());
        if let Some(event) = event {
            self.apply(vec![event]);
        }
    }

    fn report(&self, error: &WheelError) {
        if let Some(text) = status_for_error(error) {
            self.status.set(text);
        }
    }

    fn apply(&self, events: Vec<WheelEvent>) {
        for event in events {
            if let Some(text) = status_for_event(&event) {
                self.status.set(text);
            }
            match event {
                WheelEvent::SpinStarted { .. } => self.selection.set(None),
                WheelEvent::OutcomeSelected(selection) => self.selection.set(Some(selection)),
                WheelEvent::Exhausted => self.schedule_auto_reset(),
                WheelEvent::Reset(_) => {
                    self.reset_timer.borrow_mut().take();
                    self.selection.set(None);
                }
            }
        }
        self.sync();
    }

    fn sync(&self) {
        if let Some(game) = self.game.borrow().as_ref() {
            self.outcomes.set(Rc::new(game.registry().outcomes().to_vec()));
            self.rotation.set(game.rotation());
            self.pointer_deg.set(game.pointer_deg());
            self.spinning.set(game.is_spinning());
        }
    }

    // The timer only wakes the frame loop; the reset itself happens in
    // `advance`, outside the timer's own callback.
    fn schedule_auto_reset(&self) {
        let deadline = self.game.borrow().as_ref().and_then(|g| g.pending_reset_at());
        let Some(deadline) = deadline else {
            return;
        };
        let delay = (deadline - now_ms()).max(0.0).ceil() as u32 + 1;
        let ui = self.clone();
        let timeout = Timeout::new(delay, move || ui.start_frames());
        *self.reset_timer.borrow_mut() = Some(timeout);
    }

    fn start_frames(&self) {
        if self.frame_loop.handle.get().is_none() {
            self.request_frame();
        }
    }

    fn request_frame(&self) {
        let mut callback = self.frame_loop.callback.borrow_mut();
        let callback = callback.get_or_insert_with(|| {
            let ui = self.clone();
            Closure::wrap(Box::new(move |_timestamp: f64| ui.tick()) as Box<dyn FnMut(f64)>)
        });

        match window().map(|w| w.request_animation_frame(callback.as_ref().unchecked_ref())) {
            Some(Ok(handle)) => self.frame_loop.handle.set(Some(handle)),
            _ => log::warn!("requestAnimationFrame unavailable, animation stopped"),
        }
    }

    fn tick(&self) {
        self.frame_loop.handle.set(None);

        let stepped = self.game.borrow_mut().as_mut().map(|game| {
            let frame = game.advance(now_ms());
            (frame, game.is_animating())
        });
        let Some((frame, animating)) = stepped else {
            return;
        };

        self.rotation.set(frame.rotation);
        self.pointer_deg.set(frame.pointer_deg);
        self.spinning.set(frame.spinning);
        if !frame.events.is_empty() {
            self.apply(frame.events);
        }

        if animating {
            self.request_frame();
        }
    }

    fn stop(&self) {
        if let Some(handle) = self.frame_loop.handle.take() {
            if let Some(window) = window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        self.frame_loop.callback.borrow_mut().take();
        self.reset_timer.borrow_mut().take();
    }
}

#[derive(Properties, PartialEq)]
pub struct FruitWheelProps {
    pub config: WheelConfig,
}

#[function_component(FruitWheel)]
pub fn fruit_wheel(props: &FruitWheelProps) -> Html {
    // Apply custom CSS
    {
        use_effect_with((), move |_| {
            let document = window().and_then(|w| w.document());
            let style_element = document.as_ref().and_then(|document| {
                let head = document.head()?;
                let style = document.create_element("style").ok()?;
                style.set_text_content(Some(CUSTOM_CSS));
                head.append_child(&style).ok()?;
                Some(style)
            });

            move || {
                if let Some(style) = style_element {
                    if let Some(parent) = style.parent_node() {
                        let _ = parent.remove_child(&style);
                    }
                }
            }
        });
    }

    let game = use_mut_ref(|| build_game(props.config.clone()));

    let outcomes = use_state(|| {
        Rc::new(
            game.borrow()
                .as_ref()
                .map(|g| g.registry().outcomes().to_vec())
                .unwrap_or_default(),
        )
    });
    let rotation = use_state(|| game.borrow().as_ref().map(|g| g.rotation()).unwrap_or(0.0));
    let pointer_deg = use_state(|| 0.0);
    let spinning = use_state(|| false);
    let status = use_state(|| {
        if game.borrow().is_none() {
            "The wheel could not be set up.".to_string()
        } else {
            String::new()
        }
    });
    let selection = use_state(|| None::<Selection>);
    let frame_loop = use_memo((), |_| FrameLoop::default());
    let reset_timer = use_mut_ref(|| None::<Timeout>);

    let ui = WheelUi {
        game: game.clone(),
        outcomes: outcomes.setter(),
        rotation: rotation.setter(),
        pointer_deg: pointer_deg.setter(),
        spinning: spinning.setter(),
        status: status.setter(),
        selection: selection.setter(),
        frame_loop,
        reset_timer,
    };

    {
        let ui = ui.clone();
        use_effect_with((), move |_| move || ui.stop());
    }

    let on_spin = {
        let ui = ui.clone();
        Callback::from(move |_: MouseEvent| ui.spin())
    };
    let on_reset = {
        let ui = ui.clone();
        Callback::from(move |_: MouseEvent| ui.reset())
    };
    let on_close = {
        let ui = ui.clone();
        Callback::from(move |_: ()| ui.close_result())
    };

    let ready = game.borrow().is_some();
    let exhausted = ready && outcomes.iter().all(Outcome::is_chosen);

    html! {
        <div class={styles::CONTAINER}>
            <h1 class={classes!(styles::TEXT_H1, "mb-6", "text-center")}>
                <span class={styles::TITLE_GRADIENT}>{"Fruit Wheel"}</span>
            </h1>

            <div class={styles::CARD}>
                <div class="relative mx-auto mb-8 flex justify-center items-center">
                    <div
                        id="pointer"
                        class={styles::POINTER}
                        style={format!(
                            "transform: translateX(-50%) rotate({:.2}deg);",
                            *pointer_deg,
                        )}
                        aria-hidden="true"
                    />
                    <WheelCanvas
                        outcomes={(*outcomes).clone()}
                        rotation={*rotation}
                        is_spinning={*spinning}
                    />
                </div>

                <div class="flex justify-center items-center gap-4 mt-4">
                    <div class="w-full max-w-[300px]">
                        <SpinButton
                            is_spinning={*spinning}
                            exhausted={exhausted || !ready}
                            onclick={on_spin}
                        />
                    </div>
                    <ResetButton disabled={*spinning || !ready} onclick={on_reset} />
                </div>

                <StatusLine message={AttrValue::from((*status).clone())} />
            </div>

            <ResultModal selection={(*selection).clone()} {on_close} />
        </div>
    }
}
