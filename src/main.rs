mod app;
mod dodge_input;
mod hearts;
mod hero;
mod marquee;

fn main() {
    console_error_panic_hook::set_once();
    gloo::console::log!(
        "valentine: mounting",
        valentine_core::GALLERY.len() as u32,
        valentine_core::HERO_SRC.unwrap_or("no hero")
    );
    yew::Renderer::<app::App>::new().render();
}
