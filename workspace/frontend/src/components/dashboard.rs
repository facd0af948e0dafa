use std::rc::Rc;

use controller::{FormField, FormPhase, PredictionController, PredictionOutcome, PREDICTION_FAILED_NOTICE};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api_client::BrowserScoringApi;
use crate::components::charts::{ImportanceChart, PerformanceChart};
use crate::components::prediction_form::PredictionForm;
use crate::components::prediction_result::PredictionResult;
use crate::widgets::toast::ToastContext;

type Controller = PredictionController<BrowserScoringApi>;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let force_update = use_force_update();
    let toast_ctx = use_context::<ToastContext>();

    // Built once per mount; every state change schedules a re-render
    let controller: Rc<Controller> = (*use_state(move || {
        Rc::new(
            PredictionController::new(BrowserScoringApi)
                .with_listener(move || force_update.force_update()),
        )
    }))
    .clone();

    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            log::debug!("Loading dashboard charts");
            let performance = controller.clone();
            spawn_local(async move { performance.load_performance_summary().await });
            spawn_local(async move { controller.load_feature_importance().await });
            || ()
        });
    }

    let on_input = {
        let controller = controller.clone();
        Callback::from(move |(field, value): (FormField, String)| {
            controller.set_field(field, value);
        })
    };

    let on_submit = {
        let controller = controller.clone();
        Callback::from(move |_: ()| {
            let controller = controller.clone();
            let toast_ctx = toast_ctx.clone();
            spawn_local(async move {
                match controller.submit_prediction().await {
                    PredictionOutcome::Failed(err) => {
                        log::error!("Prediction failed: {}", err);
                        if let Some(ctx) = toast_ctx {
                            ctx.show_error(PREDICTION_FAILED_NOTICE.to_string());
                        }
                    }
                    PredictionOutcome::Rejected(errors) => {
                        log::debug!("Prediction form rejected: {}", errors);
                    }
                    PredictionOutcome::Predicted(_) => {}
                }
            });
        })
    };

    let state = controller.snapshot();
    let errors: Vec<(FormField, String)> = FormField::ALL
        .iter()
        .filter_map(|field| state.field_error(*field).map(|e| (*field, e.to_string())))
        .collect();

    html! {
        <div class="container py-4">
            <h1 class="mb-4 text-center">{"🛒 Purchase Pulse"}</h1>
            <div class="row g-4">
                <div class="col-lg-4">
                    <PredictionForm
                        form={state.form().clone()}
                        {errors}
                        submitting={state.phase() == FormPhase::Submitting}
                        {on_input}
                        {on_submit}
                    />
                    if let Some(prediction) = state.prediction() {
                        <PredictionResult key={format!("prediction-{}", state.result_revision())} {prediction} revision={state.result_revision()} />
                    }
                </div>
                <div class="col-lg-4">
                    <PerformanceChart performance={state.performance().clone()} />
                </div>
                <div class="col-lg-4">
                    <ImportanceChart importance={state.importance().clone()} />
                </div>
            </div>
        </div>
    }
}
