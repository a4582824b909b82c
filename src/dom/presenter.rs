use web_sys::HtmlElement;

use crate::simulation::{ElementTransform, Presenter};

/// Writes `left`, `top` and `transform` inline styles
pub struct StylePresenter;

/// CSS values for a transform: (`left`, `top`, `transform`)
pub fn transform_css(t: ElementTransform) -> (String, String, String) {
    (
        format!("{}px", t.left),
        format!("{}px", t.top),
        format!("rotate({}rad)", t.rotation),
    )
}

impl Presenter<HtmlElement> for StylePresenter {
    fn apply(&mut self, element: &HtmlElement, transform: ElementTransform) {
        let (left, top, rotate) = transform_css(transform);
        let style = element.style();
        // A failed write only affects this frame
        let _ = style.set_property("left", &left);
        let _ = style.set_property("top", &top);
        let _ = style.set_property("transform", &rotate);
    }
}
