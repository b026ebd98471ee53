use yew::prelude::*;
use web_sys::window;
use shared::{ResetCause, WheelError, WheelEvent};

pub const EXHAUSTED_MESSAGE: &str = "All fruits have been chosen.";
pub const AUTO_RESET_MESSAGE: &str = "All fruits were chosen. Spinner reset.";

// Same clock as requestAnimationFrame timestamps
pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

// Seed for the fallback generator, only used without crypto.getRandomValues
pub fn fallback_seed() -> u64 {
    js_sys::Date::now().to_bits() ^ now_ms().to_bits().rotate_left(17)
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Status line text for an event, `None` when the line should stay as is.
pub fn status_for_event(event: &WheelEvent) -> Option<String> {
    match event {
        WheelEvent::SpinStarted { .. } => Some("Spinning…".to_string()),
        WheelEvent::OutcomeSelected(selection) => Some(format!(
            "{} selected. {} remaining.",
            selection.label, selection.remaining
        )),
        WheelEvent::Exhausted => None,
        WheelEvent::Reset(ResetCause::Manual) => Some(String::new()),
        WheelEvent::Reset(ResetCause::Exhaustion) => Some(AUTO_RESET_MESSAGE.to_string()),
    }
}

pub fn status_for_error(error: &WheelError) -> Option<String> {
    match error {
        WheelError::Exhausted => Some(EXHAUSTED_MESSAGE.to_string()),
        // a second click while spinning is simply ignored
        WheelError::Busy => None,
        other => Some(other.to_string()),
    }
}

#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub exhausted: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = if props.is_spinning {
        "Spinning..."
    } else {
        "Spin"
    };

    // still clickable when exhausted so the click can explain why nothing happens
    let is_disabled = props.is_spinning;

    let button_class = if is_disabled || props.exhausted {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    let animation_class = if is_disabled || props.exhausted {
        ""
    } else {
        "animate-pulse-subtle"
    };

    html! {
        <div class={classes!(
            "relative",
            "overflow-hidden",
            "rounded-full",
            button_class,
            animation_class,
        )}>
            <button
                id="spin"
                onclick={props.onclick.clone()}
                disabled={is_disabled}
                class={classes!(
                    "relative",
                    "w-full",
                    "px-10",
                    "py-4",
                    "font-bold",
                    "text-lg",
                    "bg-transparent",
                    "focus:outline-none",
                    "focus:ring-4",
                    "focus:ring-yellow-300",
                )}
            >
                <span>{button_text}</span>
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResetButtonProps {
    pub disabled: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(ResetButton)]
pub fn reset_button(props: &ResetButtonProps) -> Html {
    html! {
        <button
            id="reset"
            onclick={props.onclick.clone()}
            disabled={props.disabled}
            class={classes!(
                crate::styles::BUTTON_SECONDARY,
                "rounded-full",
                props.disabled.then_some("opacity-50"),
            )}
        >
            {"Reset"}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusLineProps {
    pub message: AttrValue,
}

#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    html! {
        <p id="status" class={crate::styles::STATUS} aria-live="polite">{props.message.clone()}</p>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Selection;

    fn selection(label: &str, remaining: usize) -> Selection {
        Selection {
            index: 0,
            id: label.to_lowercase(),
            label: label.to_string(),
            icons: vec!["🍋".to_string()],
            colors: vec!["#fdd835".to_string()],
            remaining,
        }
    }

    #[test]
    fn selection_status_names_the_fruit_and_what_is_left() {
        let event = WheelEvent::OutcomeSelected(selection("Lemon", 7));
        assert_eq!(status_for_event(&event).as_deref(), Some("Lemon selected. 7 remaining."));
    }

    #[test]
    fn resets_clear_or_explain_the_status() {
        assert_eq!(status_for_event(&WheelEvent::Reset(ResetCause::Manual)), Some(String::new()));
        assert_eq!(
            status_for_event(&WheelEvent::Reset(ResetCause::Exhaustion)).as_deref(),
            Some(AUTO_RESET_MESSAGE)
        );
        assert_eq!(status_for_event(&WheelEvent::Exhausted), None);
    }

    #[test]
    fn busy_is_silent_and_exhaustion_is_explained() {
        assert_eq!(status_for_error(&WheelError::Busy), None);
        assert_eq!(status_for_error(&WheelError::Exhausted).as_deref(), Some(EXHAUSTED_MESSAGE));
    }
}
