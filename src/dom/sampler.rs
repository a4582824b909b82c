use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::domain::{Container, ElementSize, SandboxError};
use crate::rigid_body::Vec2;

/// First element matching `selector`, `None` if the page has none
pub fn find_container(document: &Document, selector: &str) -> Result<Option<HtmlElement>, SandboxError> {
    let found = document.query_selector(selector).map_err(SandboxError::from_js)?;
    Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

pub fn sample_container(container: &Element) -> Container {
    let rect = container.get_bounding_client_rect();
    Container::new(rect.width() as f32, rect.height() as f32)
}

/// Every object element inside the container with its measured size
pub fn sample_objects(container: &Element, selector: &str) -> Result<Vec<(HtmlElement, ElementSize)>, SandboxError> {
    let nodes = container.query_selector_all(selector).map_err(SandboxError::from_js)?;
    let mut objects = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let rect = el.get_bounding_client_rect();
        objects.push((el, ElementSize::new(rect.width() as f32, rect.height() as f32)));
    }
    Ok(objects)
}

/// Pointer position relative to the container's top-left corner
pub fn pointer_position(container: &Element, event: &MouseEvent) -> Vec2 {
    let rect = container.get_bounding_client_rect();
    Vec2::new(
        (f64::from(event.client_x()) - rect.left()) as f32,
        (f64::from(event.client_y()) - rect.top()) as f32,
    )
}
