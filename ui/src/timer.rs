use crate::error::{describe_js, WebError};
use dioxus::logger::tracing::error;
use std::time::Duration;
use syncbadge_core::{Scheduler, TaskHandle};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Scheduler on top of `window.setTimeout`
pub struct WindowScheduler {
    window: Window,
}

impl WindowScheduler {
    pub fn new() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        Ok(Self { window })
    }
}

impl Scheduler for WindowScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TaskHandle> {
        // Freed once called; cancelled callbacks leak their closure
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            ) {
            Ok(id) => Some(TaskHandle(id as u64)),
            Err(e) => {
                error!("setTimeout failed: {}", describe_js(&e));
                None
            }
        }
    }

    fn cancel(&self, handle: TaskHandle) {
        self.window.clear_timeout_with_handle(handle.0 as i32);
    }
}
