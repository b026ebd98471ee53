use fruit_wheel_frontend::config::{load_wheel_config, mount_element, MOUNT_ID};
use fruit_wheel_frontend::{App, AppProps};
use yew::Renderer;

fn main() {
    // Initialize the logger for WebAssembly
    wasm_logger::init(wasm_logger::Config::default());

    let props = AppProps {
        config: load_wheel_config(),
    };

    match mount_element() {
        Some(root) => {
            Renderer::<App>::with_root_and_props(root, props).render();
        }
        None => {
            log::info!("no #{MOUNT_ID} element, mounting on body");
            Renderer::<App>::with_props(props).render();
        }
    }
}
