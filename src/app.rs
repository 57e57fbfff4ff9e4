use std::rc::Rc;

use valentine_core::gallery::gallery_sources;
use valentine_core::prompt::{ASK_AGAIN_LABEL, SUCCESS_LINE, SUCCESS_TITLE};
use valentine_core::{place_avoid_button, Point, Session, SessionAction, Stage, HERO_SRC};
use web_sys::{MouseEvent, TouchEvent};
use yew::prelude::*;

use crate::dodge_input::{first_touch, measure, session_rng};
use crate::hearts::HeartsBackground;
use crate::hero::{use_hero_preload, HeroPhoto};
use crate::marquee::MarqueeCarousel;

const AFFIRM_LABEL: &str = "Yes, I want to be your valentine";
const AVOID_LABEL: &str = "No, I do not want to be your valentine";

#[derive(Clone, Default, PartialEq)]
struct SessionState(Session);

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = self.0.clone();
        if next.apply(action) {
            Rc::new(SessionState(next))
        } else {
            self
        }
    }
}

#[derive(Clone)]
struct AvoidHandlers {
    onmouseenter: Callback<MouseEvent>,
    ontouchstart: Callback<TouchEvent>,
    onclick: Callback<MouseEvent>,
}

#[function_component(App)]
pub(crate) fn app() -> Html {
    let session = use_reducer(SessionState::default);
    let hero_loaded = use_state(|| HERO_SRC.is_none());
    let rng = use_mut_ref(session_rng);
    let affirm_ref = use_node_ref();
    let avoid_ref = use_node_ref();

    use_hero_preload(HERO_SRC);

    let dodge: Rc<dyn Fn(Option<Point>)> = {
        let session = session.clone();
        let rng = rng.clone();
        let affirm_ref = affirm_ref.clone();
        let avoid_ref = avoid_ref.clone();
        Rc::new(move |touch| {
            let Some(input) = measure(&avoid_ref, &affirm_ref, touch) else {
                gloo::console::warn!("dodge: avoid button not measurable");
                return;
            };
            let position = {
                let mut rng = rng.borrow_mut();
                place_avoid_button(&input, &mut *rng)
            };
            session.dispatch(SessionAction::Dodge(position));
        })
    };

    let avoid = AvoidHandlers {
        onmouseenter: {
            let dodge = dodge.clone();
            Callback::from(move |_: MouseEvent| dodge(None))
        },
        ontouchstart: {
            let dodge = dodge.clone();
            Callback::from(move |event: TouchEvent| dodge(first_touch(&event)))
        },
        onclick: {
            let dodge = dodge.clone();
            Callback::from(move |_: MouseEvent| dodge(None))
        },
    };

    let on_accept = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            gloo::console::log!("session: accepted", session.0.attempts());
            session.dispatch(SessionAction::Accept);
        })
    };
    let on_ask_again = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            gloo::console::log!("session: ask again");
            session.dispatch(SessionAction::AskAgain);
        })
    };
    let on_hero_settled = {
        let hero_loaded = hero_loaded.clone();
        Callback::from(move |_: ()| hero_loaded.set(true))
    };

    let state = &session.0;
    let revealed = *hero_loaded;
    let card_style = format!(
        "opacity: {}; transition: opacity 0.2s ease;",
        if revealed { 1 } else { 0 }
    );

    let body = match state.stage() {
        Stage::Question => {
            let hero = HERO_SRC.map(|src| {
                html! { <HeroPhoto {src} on_settled={on_hero_settled.clone()} /> }
            });
            let affirm_style = format!("--yes-scale: {};", state.affirm_scale());
            let inline_avoid = (!state.avoid_button_floating())
                .then(|| avoid_button(&avoid_ref, &avoid, "btn btn-no btn-no-inline", None));
            html! {
                <>
                    { for hero }
                    <h1 style="font-size: 2rem;">{ state.prompt_text() }</h1>
                    <div class="button-zone">
                        <button
                            ref={affirm_ref.clone()}
                            class="btn btn-yes"
                            type="button"
                            aria-label={AFFIRM_LABEL}
                            onclick={on_accept}
                            style={affirm_style}
                        >
                            {"Yes"}
                        </button>
                        { for inline_avoid }
                    </div>
                </>
            }
        }
        Stage::Accepted => html! {
            <div class="success-screen">
                <h1 class="success-title">{ SUCCESS_TITLE }</h1>
                <MarqueeCarousel images={gallery_sources()} />
                <p class="success-line" style="font-size: 1.5rem; margin-top: 1rem;">
                    { SUCCESS_LINE }
                </p>
                <button
                    class="btn btn-back"
                    type="button"
                    aria-label="Ask the question again"
                    onclick={on_ask_again}
                >
                    { ASK_AGAIN_LABEL }
                </button>
            </div>
        },
    };

    let floating_avoid = state
        .avoid_position()
        .map(|position| avoid_button(&avoid_ref, &avoid, "btn btn-no btn-no-fixed", Some(position)));

    html! {
        <main class="app">
            <HeartsBackground />
            if !revealed {
                <div class="app-loader" role="status" aria-live="polite" aria-label="Loading">
                    <div class="app-loader-spinner" />
                    <span class="app-loader-text">{"Loading..."}</span>
                </div>
            }
            <section
                class="card"
                aria-hidden={if revealed { "false" } else { "true" }}
                style={card_style}
            >
                { body }
            </section>
            { for floating_avoid }
        </main>
    }
}

fn avoid_button(
    node_ref: &NodeRef,
    handlers: &AvoidHandlers,
    class: &'static str,
    position: Option<Point>,
) -> Html {
    let style = position.map(|p| format!("left: {}px; top: {}px;", p.x, p.y));
    html! {
        <button
            ref={node_ref.clone()}
            {class}
            type="button"
            aria-label={AVOID_LABEL}
            onmouseenter={handlers.onmouseenter.clone()}
            ontouchstart={handlers.ontouchstart.clone()}
            onclick={handlers.onclick.clone()}
            {style}
        >
            {"No"}
        </button>
    }
}
