use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    pub id: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

/// Bulma style modal mounted on document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let modal = html! {
        <div id={props.id.clone()} class="modal is-active">
            <div class="modal-background" onclick={close.clone()}/>
            <div class="modal-content">
                <div class="box">{props.children.clone()}</div>
            </div>
            <button class="modal-close is-large" aria-label="close" onclick={close}/>
        </div>
    };
    create_portal(modal, gloo::utils::body().into())
}

/// Seed for the card shuffle, taken from JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    const SPAN: f64 = (1u64 << 32) as f64;
    let high = (SPAN * random()) as u64;
    let low = (SPAN * random()) as u64;
    (high << 32) | low
}
