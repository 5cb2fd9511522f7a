//! Video inspection in the browser
//!
//! The selected file is loaded into a detached `<video>` element through an
//! object URL. Duration comes from the metadata, the thumbnail from drawing the
//! first decoded frame onto a canvas and exporting it as JPEG.

use async_trait::async_trait;

use crate::stores::composer::{Attachment, MediaProbe};

pub const THUMBNAIL_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserMediaProbe;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl MediaProbe for BrowserMediaProbe {
    async fn video_duration(&self, video: &Attachment) -> Result<f64, String> {
        let loaded = wasm::LoadedVideo::open(video, "loadedmetadata").await?;
        let duration = loaded.element.duration();
        if duration.is_finite() {
            Ok(duration)
        } else {
            Err("Could not read video duration".to_string())
        }
    }

    async fn video_thumbnail(&self, video: &Attachment) -> Result<Attachment, String> {
        let loaded = wasm::LoadedVideo::open(video, "loadeddata").await?;
        let bytes = loaded.capture_jpeg()?;
        log::debug!("Captured {} byte thumbnail for {}", bytes.len(), video.name);

        Ok(Attachment {
            name: format!("{}.jpg", video.name),
            content_type: THUMBNAIL_TYPE.to_string(),
            bytes,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl MediaProbe for BrowserMediaProbe {
    async fn video_duration(&self, _video: &Attachment) -> Result<f64, String> {
        Err("Video inspection requires a browser".to_string())
    }

    async fn video_thumbnail(&self, _video: &Attachment) -> Result<Attachment, String> {
        Err("Video inspection requires a browser".to_string())
    }
}

/// Strip the `data:<type>;base64,` prefix and decode the payload
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, String> {
    use base64::Engine;

    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| "Malformed data URL".to_string())?;
    if !header.ends_with(";base64") {
        return Err("Data URL is not base64 encoded".to_string());
    }

    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| format!("Invalid thumbnail data: {}", e))
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use js_sys::{Array, Uint8Array};
    use tokio::sync::oneshot;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, Url};

    use super::{decode_data_url, THUMBNAIL_TYPE};
    use crate::stores::composer::Attachment;

    /// Video element backed by an object URL; the URL is revoked on drop
    pub struct LoadedVideo {
        pub element: HtmlVideoElement,
        object_url: String,
    }

    impl Drop for LoadedVideo {
        fn drop(&mut self) {
            self.element.set_src("");
            if let Err(e) = Url::revoke_object_url(&self.object_url) {
                log::warn!("Failed to revoke object URL: {:?}", e);
            }
        }
    }

    impl LoadedVideo {
        /// Load `video` and wait until the element fires `ready_event`
        pub async fn open(video: &Attachment, ready_event: &str) -> Result<Self, String> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or("No document")?;

            let parts = Array::new();
            parts.push(&Uint8Array::from(video.bytes.as_slice()));
            let mut options = BlobPropertyBag::new();
            options.set_type(&video.content_type);
            let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(|e| format!("Failed to wrap video: {:?}", e))?;
            let object_url = Url::create_object_url_with_blob(&blob)
                .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

            let element = document
                .create_element("video")
                .map_err(|e| format!("Failed to create video element: {:?}", e))?
                .dyn_into::<HtmlVideoElement>()
                .map_err(|_| "Not a video element")?;
            element.set_muted(true);
            element.set_preload("auto");

            let loaded = LoadedVideo { element, object_url };
            loaded.element.set_src(&loaded.object_url);
            wait_for(&loaded.element, ready_event).await?;
            Ok(loaded)
        }

        pub fn capture_jpeg(&self) -> Result<Vec<u8>, String> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or("No document")?;

            let width = self.element.video_width();
            let height = self.element.video_height();
            if width == 0 || height == 0 {
                return Err("Video has no decodable frame".to_string());
            }

            let canvas = document
                .create_element("canvas")
                .map_err(|e| format!("Failed to create canvas: {:?}", e))?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| "Not a canvas element")?;
            canvas.set_width(width);
            canvas.set_height(height);

            let context = canvas
                .get_context("2d")
                .map_err(|e| format!("Failed to get canvas context: {:?}", e))?
                .ok_or("Canvas context unavailable")?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| "Not a 2d context")?;
            context
                .draw_image_with_html_video_element_and_dw_and_dh(
                    &self.element,
                    0.0,
                    0.0,
                    width as f64,
                    height as f64,
                )
                .map_err(|e| format!("Failed to draw video frame: {:?}", e))?;

            let data_url = canvas
                .to_data_url_with_type(THUMBNAIL_TYPE)
                .map_err(|e| format!("Failed to encode thumbnail: {:?}", e))?;
            decode_data_url(&data_url)
        }
    }

    /// Resolve once `event` (or `error`) fires on `video`. Listeners are removed afterwards.
    async fn wait_for(video: &HtmlVideoElement, event: &str) -> Result<(), String> {
        let (tx, rx) = oneshot::channel::<Result<(), String>>();
        let tx = Rc::new(RefCell::new(Some(tx)));

        let ready_tx = tx.clone();
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = ready_tx.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        });
        let error_tx = tx.clone();
        let on_error = Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = error_tx.borrow_mut().take() {
                let _ = tx.send(Err("Failed to load video".to_string()));
            }
        });

        video
            .add_event_listener_with_callback(event, on_ready.as_ref().unchecked_ref())
            .map_err(|e| format!("Failed to listen for {}: {:?}", event, e))?;
        video
            .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            .map_err(|e| format!("Failed to listen for errors: {:?}", e))?;

        let result = rx
            .await
            .unwrap_or_else(|_| Err("Video load was interrupted".to_string()));

        let _ = video.remove_event_listener_with_callback(event, on_ready.as_ref().unchecked_ref());
        let _ = video.remove_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
        result
    }
}
