pub mod config;
pub mod storage;
pub mod styles;
pub mod wheel;

use shared::WheelConfig;
use yew::prelude::*;

use crate::wheel::FruitWheel;

#[derive(Properties, PartialEq, Default)]
pub struct AppProps {
    #[prop_or_default]
    pub config: WheelConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    html! {
        <div class="min-h-screen w-full">
            <div class="mx-auto">
                <FruitWheel config={props.config.clone()} />
            </div>
        </div>
    }
}
