use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlImageElement, HtmlLinkElement};
use yew::prelude::*;

/// Adds `<link rel="preload" as="image">` for the hero while mounted.
#[hook]
pub(crate) fn use_hero_preload(src: Option<&'static str>) {
    use_effect_with(src, |src| {
        let link = src.and_then(append_preload_link);
        move || {
            if let Some(link) = link {
                link.remove();
            }
        }
    });
}

pub(crate) fn append_preload_link(src: &str) -> Option<HtmlLinkElement> {
    let document = web_sys::window()?.document()?;
    let head = document.head()?;
    let link = document
        .create_element("link")
        .ok()?
        .dyn_into::<HtmlLinkElement>()
        .ok()?;
    link.set_rel("preload");
    link.set_href(src);
    link.set_attribute("as", "image").ok()?;
    head.append_child(&link).ok()?;
    Some(link)
}

#[derive(Properties, PartialEq)]
pub(crate) struct HeroPhotoProps {
    pub src: &'static str,
    /// Fires on load or error; the page never waits on a broken photo.
    pub on_settled: Callback<()>,
}

#[function_component(HeroPhoto)]
pub(crate) fn hero_photo(props: &HeroPhotoProps) -> Html {
    let img_ref = use_node_ref();

    {
        // A cached image can finish before the listeners see it.
        let img_ref = img_ref.clone();
        let on_settled = props.on_settled.clone();
        use_effect_with((), move |_| {
            if let Some(img) = img_ref.cast::<HtmlImageElement>() {
                if img.complete() {
                    on_settled.emit(());
                }
            }
            || ()
        });
    }

    let onload = {
        let on_settled = props.on_settled.clone();
        Callback::from(move |_: Event| on_settled.emit(()))
    };
    let onerror = {
        let on_settled = props.on_settled.clone();
        Callback::from(move |_: Event| on_settled.emit(()))
    };

    html! {
        <img
            ref={img_ref}
            class="hero-photo"
            src={props.src}
            alt="me"
            width="180"
            height="180"
            fetchpriority="high"
            decoding="async"
            {onload}
            {onerror}
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn preload_links() -> u32 {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.query_selector_all("link[rel=preload]").ok())
            .map(|list| list.length())
            .unwrap_or(0)
    }

    #[wasm_bindgen_test]
    fn preload_link_is_added_and_removable() {
        let before = preload_links();
        let link = append_preload_link("generated/me-hero.avif").expect("link");
        assert_eq!(link.get_attribute("as").as_deref(), Some("image"));
        assert_eq!(preload_links(), before + 1);
        link.remove();
        assert_eq!(preload_links(), before);
    }
}
