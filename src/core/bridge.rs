//! Browser implementation of [`Backend`] over the host page's JS bridge.
//!
//! The host page installs `window.zxBackend` before the bundle starts:
//!
//! - `ready: Promise<void>`
//! - `query(collection, spec) -> Promise<Array<{id, ...}>>`
//! - `get(collection, id) -> Promise<object | null>`
//! - `add(collection, data) -> Promise<string>`
//! - `update(collection, id, data) -> Promise<void>`
//! - `remove(collection, id) -> Promise<void>`
//! - `call(name, data) -> Promise<object>`
//! - `upload(path, bytes: Uint8Array, contentType) -> Promise<string>` (download URL)
//! - `deleteFile(url) -> Promise<void>`
//! - `currentUser() -> {uid, name, role, whatsapp} | null`
//! - `signInEmail(email, password) -> Promise<void>`
//! - `signInGoogle() -> Promise<void>`
//! - `signOut() -> Promise<void>`
//! - `onAuthChanged(callback)` (optional)
//!
//! Rejections are expected to carry `code` and `message` properties.

use std::cell::Cell;

use js_sys::{Array, Function, Object, Promise, Reflect, Uint8Array};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;

use crate::config::backend::BRIDGE_GLOBAL;
use crate::core::backend::{Backend, Document, StoreQuery};
use crate::core::error::BackendError;
use crate::models::Session;
use crate::utils::dom;

/// [`Backend`] backed by `window.zxBackend`.
#[derive(Default)]
pub struct JsBackend {
    ready: Cell<bool>,
}

impl JsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the host page installed the bridge.
    pub fn is_available() -> bool {
        bridge().is_ok()
    }

    /// Subscribe to sign-in/sign-out changes.
    ///
    /// The callback lives for the rest of the page. A bridge without
    /// `onAuthChanged` is treated as having a fixed session.
    pub fn on_auth_changed(&self, callback: impl Fn(Option<Session>) + 'static) {
        let Ok(bridge) = bridge() else {
            return;
        };
        let Ok(subscribe) = method(&bridge, "onAuthChanged") else {
            return;
        };

        let closure = Closure::wrap(Box::new(move |user: JsValue| {
            callback(decode_session(user));
        }) as Box<dyn Fn(JsValue)>);

        if let Err(e) = subscribe.call1(&bridge, closure.as_ref().unchecked_ref()) {
            web_sys::console::warn_1(&format!("onAuthChanged failed: {:?}", e).into());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }
}

// =============================================================================
// JS Interop Helpers
// =============================================================================

/// Get the bridge object installed by the host page.
fn bridge() -> Result<Object, BackendError> {
    let window = dom::window().ok_or(BackendError::NoWindow)?;
    Reflect::get(&window, &BRIDGE_GLOBAL.into())
        .ok()
        .and_then(|v| v.dyn_into::<Object>().ok())
        .ok_or(BackendError::NotInstalled)
}

fn method(bridge: &Object, name: &str) -> Result<Function, BackendError> {
    Reflect::get(bridge, &name.into())
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok())
        .ok_or_else(|| BackendError::Decode(format!("bridge has no `{}` function", name)))
}

/// Call `bridge[name](...args)` and await the returned promise.
async fn invoke(name: &str, args: &[JsValue]) -> Result<JsValue, BackendError> {
    let bridge = bridge()?;
    let function = method(&bridge, name)?;

    let js_args: Array = args.iter().collect();
    let result = function.apply(&bridge, &js_args).map_err(remote_error)?;

    // Non-promise return values resolve immediately
    JsFuture::from(Promise::resolve(&result))
        .await
        .map_err(remote_error)
}

/// Convert a rejection into a [`BackendError::Remote`].
fn remote_error(err: JsValue) -> BackendError {
    let field = |key: &str| {
        Reflect::get(&err, &key.into())
            .ok()
            .and_then(|v| v.as_string())
    };
    let message = field("message")
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));

    BackendError::Remote {
        code: field("code"),
        message,
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, BackendError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| BackendError::Decode(e.to_string()))
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, BackendError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| BackendError::Decode(e.to_string()))
}

fn decode_session(user: JsValue) -> Option<Session> {
    if user.is_null() || user.is_undefined() {
        return None;
    }
    match from_js::<Session>(user) {
        Ok(session) => Some(session),
        Err(e) => {
            web_sys::console::warn_1(&format!("Ignoring malformed session: {}", e).into());
            None
        }
    }
}

// =============================================================================
// Backend Implementation
// =============================================================================

impl Backend for JsBackend {
    async fn ready(&self) -> Result<(), BackendError> {
        if self.ready.get() {
            return Ok(());
        }

        let bridge = bridge()?;
        let ready = Reflect::get(&bridge, &"ready".into())
            .map_err(|_| BackendError::Decode("bridge has no `ready` promise".to_string()))?;
        JsFuture::from(Promise::resolve(&ready))
            .await
            .map_err(remote_error)?;

        self.ready.set(true);
        Ok(())
    }

    async fn query<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &StoreQuery,
    ) -> Result<Vec<Document<T>>, BackendError> {
        let spec = to_js(query)?;
        let rows = invoke("query", &[collection.into(), spec]).await?;
        from_js(rows)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, BackendError> {
        let doc = invoke("get", &[collection.into(), id.into()]).await?;
        if doc.is_null() || doc.is_undefined() {
            return Ok(None);
        }
        from_js(doc).map(Some)
    }

    async fn add(&self, collection: &str, data: &Value) -> Result<String, BackendError> {
        let id = invoke("add", &[collection.into(), to_js(data)?]).await?;
        id.as_string()
            .ok_or_else(|| BackendError::Decode("add did not return an id".to_string()))
    }

    async fn update(&self, collection: &str, id: &str, data: &Value) -> Result<(), BackendError> {
        invoke("update", &[collection.into(), id.into(), to_js(data)?]).await?;
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        invoke("remove", &[collection.into(), id.into()]).await?;
        Ok(())
    }

    async fn call(&self, name: &str, data: &Value) -> Result<Value, BackendError> {
        let result = invoke("call", &[name.into(), to_js(data)?]).await?;
        if result.is_null() || result.is_undefined() {
            return Ok(Value::Null);
        }
        from_js(result)
    }

    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, BackendError> {
        let data = Uint8Array::from(bytes);
        let url = invoke("upload", &[path.into(), data.into(), content_type.into()]).await?;
        url.as_string()
            .ok_or_else(|| BackendError::Decode("upload did not return a URL".to_string()))
    }

    async fn delete_file(&self, url: &str) -> Result<(), BackendError> {
        invoke("deleteFile", &[url.into()]).await?;
        Ok(())
    }

    fn current_user(&self) -> Option<Session> {
        let bridge = bridge().ok()?;
        let user = method(&bridge, "currentUser").ok()?.call0(&bridge).ok()?;
        decode_session(user)
    }

    async fn sign_in_email(&self, email: &str, password: &str) -> Result<(), BackendError> {
        invoke("signInEmail", &[email.into(), password.into()]).await?;
        Ok(())
    }

    async fn sign_in_google(&self) -> Result<(), BackendError> {
        invoke("signInGoogle", &[]).await?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        invoke("signOut", &[]).await?;
        Ok(())
    }
}
