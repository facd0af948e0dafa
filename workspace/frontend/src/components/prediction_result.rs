use common::PredictionLabel;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PredictionResultProps {
    pub prediction: PredictionLabel,
    /// Changes on every successful prediction.
    pub revision: u64,
}

/// Outcome banner. The dashboard keys it by revision so the entrance
/// animation replays for every new response, even when the label repeats.
#[function_component(PredictionResult)]
pub fn prediction_result(props: &PredictionResultProps) -> Html {
    let tone = if props.prediction.will_purchase() {
        "bg-success"
    } else {
        "bg-danger"
    };

    html! {
        <div
            data-revision={props.revision.to_string()}
            class={classes!("mt-4", "p-3", "rounded", "text-center", "fw-bold", "text-white", "animated-result", tone)}
        >
            {props.prediction.message()}
        </div>
    }
}
