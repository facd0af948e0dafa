use controller::{FormField, FormFields};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PredictionFormProps {
    pub form: FormFields,
    /// Current message per field, in display order.
    pub errors: Vec<(FormField, String)>,
    /// Shows the spinner. The button stays clickable so repeat submits race.
    pub submitting: bool,
    pub on_input: Callback<(FormField, String)>,
    pub on_submit: Callback<()>,
}

fn error_for(errors: &[(FormField, String)], field: FormField) -> Option<&str> {
    errors
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, message)| message.as_str())
}

fn number_input(props: &PredictionFormProps, field: FormField, id: &'static str) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit((field, input.value()));
        })
    };
    let invalid = error_for(&props.errors, field).is_some();

    html! {
        <div class="mb-3">
            <label for={id} class="form-label">{field.label()}</label>
            <input
                type="number"
                id={id}
                class={classes!("form-control", invalid.then_some("is-invalid"))}
                required=true
                value={props.form.get(field).to_string()}
                {oninput}
            />
            if let Some(message) = error_for(&props.errors, field) {
                <div class="invalid-feedback">{message}</div>
            }
        </div>
    }
}

/// Customer form. Field messages stay in place until the next successful
/// validation.
#[function_component(PredictionForm)]
pub fn prediction_form(props: &PredictionFormProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <form class="card shadow-sm" {onsubmit} novalidate=true>
            <div class="card-body">
                <h5 class="card-title">{"🧑 Customer Details"}</h5>
                {number_input(props, FormField::Age, "age")}
                {number_input(props, FormField::Purchases, "purchases")}
                {number_input(props, FormField::Loyalty, "loyalty")}
                {number_input(props, FormField::Discounts, "discounts")}
                <button type="submit" class="btn btn-primary w-100">
                    if props.submitting {
                        <span class="spinner-border spinner-border-sm me-2" role="status"></span>
                        {"Predicting..."}
                    } else {
                        {"Predict"}
                    }
                </button>
            </div>
        </form>
    }
}
