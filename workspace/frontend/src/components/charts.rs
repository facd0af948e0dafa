use common::PerformanceSummary;
use controller::{FeatureRanking, FetchState};
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

use crate::widgets::loading::Loading;

const IMPORTANCE_BAR_COLOR: &str = "#8884d8";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    pub fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

/// Pie trace with one slice per confusion-matrix cell.
pub fn performance_traces(summary: &PerformanceSummary) -> Value {
    let slices = summary.slices();
    json!([{
        "type": "pie",
        "labels": slices.iter().map(|s| s.label).collect::<Vec<_>>(),
        "values": slices.iter().map(|s| s.count).collect::<Vec<_>>(),
        "marker": {"colors": slices.iter().map(|s| s.color).collect::<Vec<_>>()},
        "textinfo": "label+percent",
        "hoverinfo": "label+value",
        "sort": false
    }])
}

/// Horizontal bar trace, first entry on top.
pub fn importance_traces(ranking: &FeatureRanking) -> Value {
    json!([{
        "type": "bar",
        "orientation": "h",
        "y": ranking.entries.iter().map(|e| e.feature_name.as_str()).collect::<Vec<_>>(),
        "x": ranking.entries.iter().map(|e| e.weight).collect::<Vec<_>>(),
        "marker": {"color": IMPORTANCE_BAR_COLOR}
    }])
}

/// Card title, with the sample size once the counts are in.
pub fn performance_title(performance: &FetchState<PerformanceSummary>) -> String {
    match performance.data() {
        Some(summary) => format!("📊 Model Performance ({} samples)", summary.total()),
        None => "📊 Model Performance".to_string(),
    }
}

fn importance_layout() -> Value {
    json!({
        "margin": {"t": 10, "r": 10, "l": 140, "b": 30},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "xaxis": {"showgrid": true, "gridcolor": "#eee"},
        "yaxis": {"autorange": "reversed"}
    })
}

fn draw(element: &Element, traces: &Value, layout: &Value) {
    let div_id = element.id();
    if div_id.is_empty() {
        return;
    }
    let config = json!({"responsive": true, "displayModeBar": false});
    let values = (
        serde_wasm_bindgen::to_value(traces),
        serde_wasm_bindgen::to_value(layout),
        serde_wasm_bindgen::to_value(&config),
    );
    match values {
        (Ok(data), Ok(layout), Ok(config)) => newPlot(&div_id, data, layout, config),
        _ => log::error!("Failed to convert chart data for #{}", div_id),
    }
}

#[derive(Properties, PartialEq)]
pub struct PerformanceChartProps {
    pub performance: FetchState<PerformanceSummary>,
}

#[function_component(PerformanceChart)]
pub fn performance_chart(props: &PerformanceChartProps) -> Html {
    let chart_ref = use_node_ref();

    use_effect_with(
        (chart_ref.clone(), props.performance.clone()),
        move |(chart_ref, performance)| {
            if let (Some(element), Some(summary)) = (chart_ref.cast::<Element>(), performance.data()) {
                log::trace!("Drawing performance chart for {} samples", summary.total());
                let layout = json!({
                    "margin": {"t": 10, "r": 10, "l": 10, "b": 10},
                    "paper_bgcolor": "rgba(0,0,0,0)",
                    "showlegend": true,
                    "legend": {"orientation": "h", "y": -0.1}
                });
                draw(&element, &performance_traces(summary), &layout);
            }
            || ()
        },
    );

    let body = match &props.performance {
        FetchState::NotStarted | FetchState::Loading => {
            html! { <Loading text="Loading model performance..." /> }
        }
        FetchState::Success(_) => html! {
            <div ref={chart_ref} id="chart-model-performance" class="chart-container" style="height: 320px;"></div>
        },
        FetchState::Error(_) => html! {
            <p class="text-muted text-center my-4">{"No performance data available."}</p>
        },
    };

    html! {
        <div class="card shadow-sm h-100">
            <div class="card-body">
                <h5 class="card-title">{performance_title(&props.performance)}</h5>
                {body}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ImportanceChartProps {
    pub importance: FetchState<FeatureRanking>,
}

#[function_component(ImportanceChart)]
pub fn importance_chart(props: &ImportanceChartProps) -> Html {
    let chart_ref = use_node_ref();

    use_effect_with(
        (chart_ref.clone(), props.importance.clone()),
        move |(chart_ref, importance)| {
            if let (Some(element), Some(ranking)) = (chart_ref.cast::<Element>(), importance.data()) {
                log::trace!("Drawing importance chart with {} features", ranking.entries.len());
                draw(&element, &importance_traces(ranking), &importance_layout());
            }
            || ()
        },
    );

    let body = match props.importance.data() {
        Some(ranking) => html! {
            <>
                if ranking.is_fallback() {
                    <p class="small text-muted mb-1">{"Showing the default ranking."}</p>
                }
                <div ref={chart_ref} id="chart-feature-importance" class="chart-container" style="height: 320px;"></div>
            </>
        },
        None => html! { <Loading text="Loading feature importance..." /> },
    };

    html! {
        <div class="card shadow-sm h-100">
            <div class="card-body">
                <h5 class="card-title">{"📈 Feature Importance"}</h5>
                {body}
            </div>
        </div>
    }
}
