use wasm_bindgen::prelude::*;
use cellscope_core::inspector::{inspect, Layer};
use cellscope_core::localization::Untranslated;
use cellscope_core::stats::format_area;
use cellscope_core::{AreaUnit, Coordinate};

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Inspect the layers in `layers_json` at (lon, lat).
/// Returns an array of `{ label, value }` rows.
#[wasm_bindgen(js_name = sampleLayers)]
pub fn sample_layers(layers_json: &str, lon: f64, lat: f64) -> Result<JsValue, JsValue> {
    let layers: Vec<Layer> = serde_json::from_str(layers_json)
        .map_err(|e| to_js_error(format!("Invalid layers: {e}")))?;
    let rows = inspect(&layers, Coordinate::new(lon, lat));
    serde_wasm_bindgen::to_value(&rows).map_err(to_js_error)
}

/// Render `sqm` square metres in the unit described by `unit_json`.
/// A null area renders as "N/A".
#[wasm_bindgen(js_name = formatArea)]
pub fn format_area_js(sqm: Option<f64>, unit_json: &str) -> Result<String, JsValue> {
    let unit: AreaUnit = serde_json::from_str(unit_json)
        .map_err(|e| to_js_error(format!("Invalid unit: {e}")))?;
    Ok(format_area(sqm, &unit, &Untranslated).unwrap_or_else(|| "N/A".to_string()))
}

/// Default unit list as JSON, first entry selected.
#[wasm_bindgen(js_name = defaultUnits)]
pub fn default_units() -> Result<String, JsValue> {
    serde_json::to_string(&AreaUnit::defaults()).map_err(to_js_error)
}
