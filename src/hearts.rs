use yew::prelude::*;

pub(crate) const HEART_COUNT: usize = 12;

#[function_component(HeartsBackground)]
pub(crate) fn hearts_background() -> Html {
    html! {
        <div class="hearts-layer" aria-hidden="true">
            { for (0..HEART_COUNT).map(|index| html! {
                <span class="heart" key={format!("heart-{index}")}>{"❤"}</span>
            }) }
        </div>
    }
}
