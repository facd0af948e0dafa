use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub text: Option<AttrValue>,
}

/// Spinner shown while a chart dataset is being fetched.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="d-flex flex-column justify-content-center align-items-center py-4 gap-2">
            <span class="spinner-border spinner-border-sm" role="status"></span>
            {if let Some(text) = &props.text {
                html! { <p class="small text-muted mb-0">{text}</p> }
            } else {
                html! {}
            }}
        </div>
    }
}
