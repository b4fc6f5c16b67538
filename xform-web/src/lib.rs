//! xform Web - WASM bindings for the transform stack
//!
//! Exposes `Transform` to JavaScript with the method names a WebGL draw
//! loop expects. `values()` returns `f32`s ready for `uniformMatrix4fv`.

use nalgebra::Point3;
use wasm_bindgen::prelude::*;
use xform_core::{Order, Transform, TransformError};

fn to_js(error: TransformError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn order(pre: bool) -> Order {
    if pre {
        Order::Pre
    } else {
        Order::Post
    }
}

#[wasm_bindgen]
pub struct WebTransform {
    inner: Transform,
}

#[wasm_bindgen]
impl WebTransform {
    /// Identity when `values` is omitted, otherwise a copy of 16 row-major values
    #[wasm_bindgen(constructor)]
    pub fn new(values: Option<Vec<f64>>) -> Result<WebTransform, JsValue> {
        let inner = match values {
            Some(values) => Transform::from_values(&values).map_err(to_js)?,
            None => Transform::new(),
        };
        Ok(WebTransform { inner })
    }

    /// Parse a bracketed matrix literal
    #[wasm_bindgen(js_name = fromString)]
    pub fn from_string(text: &str) -> Result<WebTransform, JsValue> {
        let inner = text.parse::<Transform>().map_err(to_js)?;
        Ok(WebTransform { inner })
    }

    /// Current matrix as `f32`s for uniform upload
    pub fn values(&self) -> Vec<f32> {
        self.inner.to_f32_array().to_vec()
    }

    pub fn push(&mut self) {
        self.inner.push();
    }

    pub fn pop(&mut self) -> Result<(), JsValue> {
        self.inner.pop().map_err(to_js)
    }

    #[wasm_bindgen(js_name = multiplyBy)]
    pub fn multiply_by(&mut self, values: &[f64], pre: bool) -> Result<(), JsValue> {
        let other = Transform::from_values(values).map_err(to_js)?;
        self.inner.multiply_by(&other, order(pre));
        Ok(())
    }

    #[wasm_bindgen(js_name = multiplyByTransform)]
    pub fn multiply_by_transform(&mut self, other: &WebTransform, pre: bool) {
        self.inner.multiply_by(&other.inner, order(pre));
    }

    pub fn translate(&mut self, tx: f64, ty: f64, tz: f64, pre: bool) {
        self.inner.translate(tx, ty, tz, order(pre));
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64, pre: bool) {
        self.inner.scale(sx, sy, sz, order(pre));
    }

    #[wasm_bindgen(js_name = rotateX)]
    pub fn rotate_x(&mut self, angle: f64, pre: bool) {
        self.inner.rotate_x(angle, order(pre));
    }

    #[wasm_bindgen(js_name = rotateY)]
    pub fn rotate_y(&mut self, angle: f64, pre: bool) {
        self.inner.rotate_y(angle, order(pre));
    }

    #[wasm_bindgen(js_name = rotateZ)]
    pub fn rotate_z(&mut self, angle: f64, pre: bool) {
        self.inner.rotate_z(angle, order(pre));
    }

    pub fn perspective(&mut self, near: f64, far: f64, top: f64, right: f64) {
        self.inner.perspective(near, far, top, right);
    }

    pub fn invert(&mut self) -> Result<(), JsValue> {
        self.inner.invert().map(|_| ()).map_err(to_js)
    }

    /// Project `[x, y, z]` through the current matrix
    #[wasm_bindgen(js_name = applyToVertex)]
    pub fn apply_to_vertex(&self, x: f64, y: f64, z: f64) -> Result<Vec<f64>, JsValue> {
        let p = self
            .inner
            .apply_to_vertex(&Point3::new(x, y, z))
            .map_err(to_js)?;
        Ok(vec![p.x, p.y, p.z])
    }
}
