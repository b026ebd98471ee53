use gloo_events::EventListener;
use shared::Selection;
use wasm_bindgen::JsCast;
use web_sys::{window, Event, KeyboardEvent};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ResultModalProps {
    pub selection: Option<Selection>,
    pub on_close: Callback<()>,
}

/// Border in the winner's color; split outcomes get a two-color gradient.
fn border_style(colors: &[String]) -> String {
    match colors {
        [single] => format!("border-color: {single};"),
        [first, second, ..] => format!(
            "border-image: linear-gradient(135deg, {first} 0%, {first} 50%, {second} 50%, {second} 100%) 1;"
        ),
        [] => String::new(),
    }
}

#[function_component(ResultModal)]
pub fn result_modal(props: &ResultModalProps) -> Html {
    let open = props.selection.is_some();

    {
        let on_close = props.on_close.clone();
        use_effect_with(open, move |open| {
            let listener = if *open {
                window().map(|window| {
                    EventListener::new(&window, "keydown", move |event: &Event| {
                        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                            if key.key() == "Escape" {
                                on_close.emit(());
                            }
                        }
                    })
                })
            } else {
                None
            };
            move || drop(listener)
        });
    }

    let Some(selection) = &props.selection else {
        return html! {};
    };

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_ok = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div id="resultModal" class={styles::MODAL_BACKDROP} onclick={on_backdrop}>
            <div
                class={styles::MODAL_CARD}
                style={border_style(&selection.colors)}
                role="dialog"
                aria-modal="true"
                aria-labelledby="resultTitle"
                onclick={stop}
            >
                <div class="text-6xl mb-4 space-x-2">
                    { for selection.icons.iter().map(|icon| html! { <span>{icon}</span> }) }
                </div>
                <h2 id="resultTitle" class={styles::TEXT_H2}>{selection.label.clone()}</h2>
                <p class={classes!(styles::TEXT_SMALL, "mt-2")}>
                    {format!("{} remaining", selection.remaining)}
                </p>
                <button
                    id="resultOk"
                    class={classes!(styles::BUTTON_PRIMARY, "mt-6", "w-full")}
                    onclick={on_ok}
                >
                    {"OK"}
                </button>
            </div>
        </div>
    }
}
