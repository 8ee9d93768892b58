use wasm_bindgen::prelude::*;

/// Compose `text` with a JSON page configuration and return SVG markup.
#[wasm_bindgen]
pub fn render_svg(text: &str, config_json: &str) -> Result<String, JsValue> {
    crate::render_svg_from_json(text, config_json).map_err(|e| JsValue::from_str(&e.to_string()))
}
