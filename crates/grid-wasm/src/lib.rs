use serde::Serialize;
use wasm_bindgen::prelude::*;
use grid_core::export::to_json_pretty;
use grid_core::{ClassifierParams, GridClassifier, MaterialLayers, RasterBuffer, RunSummary};

/// Material weight layers collected by the page before classification.
#[wasm_bindgen]
#[derive(Default)]
pub struct MaterialSet {
    layers: MaterialLayers,
}

#[wasm_bindgen]
impl MaterialSet {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the RGBA bytes (`ImageData.data`) of material layer `index`.
    pub fn insert(
        &mut self,
        index: usize,
        width: usize,
        height: usize,
        data: Vec<u8>,
    ) -> Result<(), JsValue> {
        let layer = format!("material {index}");
        let raster = RasterBuffer::new(&layer, width, height, data).map_err(to_js)?;
        self.layers.insert(index, raster).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        self.layers.set_enabled(index, enabled);
    }

    #[wasm_bindgen(js_name = enabledCount)]
    pub fn enabled_count(&self) -> usize {
        self.layers.enabled_count()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyOutput {
    grid_json: String,
    summary: RunSummary,
}

/// Default parameters as JSON (camelCase keys).
#[wasm_bindgen(js_name = defaultParams)]
pub fn default_params() -> String {
    serde_json::to_string(&ClassifierParams::default()).unwrap_or_default()
}

/// Classify the heightmap bytes (`ImageData.data`) against the material set.
/// Returns `{ gridJson, summary }`.
#[wasm_bindgen]
pub fn classify(
    params_json: &str,
    heightmap: Vec<u8>,
    width: usize,
    height: usize,
    materials: &MaterialSet,
) -> Result<JsValue, JsValue> {
    let output = run(params_json, heightmap, width, height, &materials.layers)?;
    serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn run(
    params_json: &str,
    heightmap: Vec<u8>,
    width: usize,
    height: usize,
    materials: &MaterialLayers,
) -> Result<ClassifyOutput, String> {
    let params: ClassifierParams =
        serde_json::from_str(params_json).map_err(|e| format!("Invalid params: {e}"))?;
    materials.require_usable().map_err(|e| e.to_string())?;
    let elevation =
        RasterBuffer::new("heightmap", width, height, heightmap).map_err(|e| e.to_string())?;

    let result = GridClassifier::new()
        .classify(&elevation, materials, &params)
        .map_err(|e| e.to_string())?;
    let grid_json = to_json_pretty(&result.grid).map_err(|e| e.to_string())?;

    Ok(ClassifyOutput { grid_json, summary: result.summary() })
}

fn to_js(e: grid_core::ClassifyError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
