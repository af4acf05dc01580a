//! Browser binding
//!
//! Exposes one [`Driver`] over `performance.now()`. The page drives it from
//! `requestAnimationFrame` and reads frames back as JSON.

use wasm_bindgen::prelude::*;

use crate::driver::Driver;
use crate::platform::PerformanceClock;
use crate::sim::{HostInputs, TickInput};

#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pintograph (web) ready");
}

#[wasm_bindgen]
pub struct WebPintograph {
    driver: Driver<PerformanceClock>,
}

#[wasm_bindgen]
impl WebPintograph {
    /// Build from host inputs as JSON (`distance`, `radii`, `speeds`,
    /// `directions`, `rod_lengths`)
    #[wasm_bindgen(constructor)]
    pub fn new(inputs_json: &str) -> Result<WebPintograph, JsValue> {
        let inputs = HostInputs::from_json(inputs_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let clock = PerformanceClock::new().ok_or_else(|| JsValue::from_str("performance.now() unavailable"))?;
        Ok(Self {
            driver: Driver::new(inputs, clock),
        })
    }

    /// One tick; returns the frame as JSON, or `null` when there is nothing to draw
    pub fn tick(&mut self, start: bool, reset: bool, runtime: f64) -> Result<String, JsValue> {
        let input = TickInput { start, reset, runtime };
        match self.driver.tick(&input) {
            Ok(Some(frame)) => frame.to_json().map_err(|e| JsValue::from_str(&e.to_string())),
            Ok(None) => Ok("null".to_string()),
            Err(err) => Err(JsValue::from_str(&err.to_string())),
        }
    }

    /// Whether the page should request another animation frame
    pub fn wants_tick(&self) -> bool {
        self.driver.wants_tick()
    }

    pub fn set_inputs(&mut self, inputs_json: &str) -> Result<(), JsValue> {
        let inputs = HostInputs::from_json(inputs_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.driver.set_inputs(inputs);
        Ok(())
    }

    pub fn elapsed(&self) -> f64 {
        self.driver.elapsed()
    }

    pub fn trace_len(&self) -> usize {
        self.driver.path().len()
    }
}
