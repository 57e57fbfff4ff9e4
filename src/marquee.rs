use std::rc::Rc;

use valentine_core::gallery::{loop_sequence, memory_alt};
use valentine_core::{LoadGate, CAROUSEL_SPEED_SECONDS};
use web_sys::Event;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub(crate) struct MarqueeProps {
    pub images: Vec<&'static str>,
}

#[function_component(MarqueeCarousel)]
pub(crate) fn marquee_carousel(props: &MarqueeProps) -> Html {
    let gate = {
        let images = props.images.clone();
        use_mut_ref(move || LoadGate::new(images))
    };
    let revealed = use_state(|| false);

    let on_settled = {
        let gate = gate.clone();
        let revealed = revealed.clone();
        Rc::new(move |src: &'static str| {
            let mut gate = gate.borrow_mut();
            if gate.mark_loaded(src) && gate.is_revealed() {
                gloo::console::log!("marquee: revealed", gate.loaded_count() as u32);
                revealed.set(true);
            }
        })
    };

    if props.images.is_empty() {
        return html! {
            <div class="carousel-fallback" role="status">
                {"Add photos to assets/carousel to fill this strip."}
            </div>
        };
    }

    let distinct = props.images.len();
    let items = loop_sequence(&props.images)
        .into_iter()
        .enumerate()
        .map(|(index, src)| {
            let onload = {
                let on_settled = on_settled.clone();
                Callback::from(move |_: Event| on_settled(src))
            };
            let onerror = {
                let on_settled = on_settled.clone();
                Callback::from(move |_: Event| on_settled(src))
            };
            let loading = if index < distinct { "eager" } else { "lazy" };
            html! {
                <figure class="marquee-item" key={format!("memory-{index}")}>
                    <img
                        {src}
                        alt={memory_alt(index, distinct)}
                        width="240"
                        height="240"
                        {loading}
                        decoding="async"
                        {onload}
                        {onerror}
                    />
                </figure>
            }
        });

    let track_class = classes!("marquee-track", (*revealed).then_some("revealed"));
    let track_style = format!("--marquee-duration: {CAROUSEL_SPEED_SECONDS}s;");

    html! {
        <div class="marquee-shell">
            if !*revealed {
                <p class="marquee-caption" role="status">{"Loading memories..."}</p>
            }
            <div class={track_class} style={track_style}>
                { for items }
            </div>
        </div>
    }
}
