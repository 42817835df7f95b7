use std::io::Cursor;

use image::ImageFormat;

use crate::canvas::CanvasSurface;
use crate::error::ExportError;

/// Name the exported image is offered under
pub const EXPORT_FILE_NAME: &str = "canvas.png";

/// Encodes the current buffer, unchanged, as a PNG image.
pub fn encode_png(canvas: &CanvasSurface) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    canvas
        .image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    log::debug!(
        "Encoded {}x{} canvas to {} PNG bytes",
        canvas.width(),
        canvas.height(),
        bytes.len()
    );
    Ok(bytes)
}

/// Writes the canvas as a PNG file at `path`
#[cfg(not(target_arch = "wasm32"))]
pub fn write_png(canvas: &CanvasSurface, path: &std::path::Path) -> Result<(), ExportError> {
    let bytes = encode_png(canvas)?;
    std::fs::write(path, bytes)?;
    log::info!("Saved canvas to {}", path.display());
    Ok(())
}

/// Asks where to save `canvas.png` and writes it there.
/// Cancelling the dialog is not an error.
#[cfg(not(target_arch = "wasm32"))]
pub fn save(canvas: &CanvasSurface) -> Result<(), ExportError> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("PNG image", &["png"])
        .save_file()
    else {
        log::info!("Save cancelled");
        return Ok(());
    };
    write_png(canvas, &path)
}

/// Triggers a browser download of `canvas.png`
#[cfg(target_arch = "wasm32")]
pub fn save(canvas: &CanvasSurface) -> Result<(), ExportError> {
    use eframe::wasm_bindgen::JsCast as _;

    let web_err = |err: eframe::wasm_bindgen::JsValue| ExportError::Web(format!("{err:?}"));

    let bytes = encode_png(canvas)?;
    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(web_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(web_err)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Web("no document".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(web_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Web("created element is not an anchor".to_owned()))?;

    anchor.set_href(&url);
    anchor.set_download(EXPORT_FILE_NAME);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(web_err)?;

    log::info!("Downloaded {}", EXPORT_FILE_NAME);
    Ok(())
}
