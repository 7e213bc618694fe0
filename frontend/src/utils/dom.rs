use shared::{PickerError, Selector};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

/// All input elements matched by `selector`, in document order.
///
/// Zero matches is an error, as is a match that is not an `<input>`.
pub fn find_inputs(selector: &Selector) -> Result<Vec<HtmlInputElement>, PickerError> {
    let css = selector.to_css();
    let nodes = document()
        .and_then(|document| document.query_selector_all(&css).ok())
        .ok_or_else(|| PickerError::NoMatch(css.clone()))?;

    let mut inputs = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        let Some(node) = nodes.item(index) else {
            continue;
        };
        let input = node
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| PickerError::NotAnInput(css.clone()))?;
        inputs.push(input);
    }

    if inputs.is_empty() {
        return Err(PickerError::NoMatch(css));
    }
    Ok(inputs)
}

pub fn find_first_input(selector: &Selector) -> Result<HtmlInputElement, PickerError> {
    let css = selector.to_css();
    find_inputs(selector)?
        .into_iter()
        .next()
        .ok_or(PickerError::NoMatch(css))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn append(tag: &str, id: &str, class: &str) -> web_sys::Element {
        let document = document().unwrap();
        let element = document.create_element(tag).unwrap();
        element.set_id(id);
        element.set_class_name(class);
        document.body().unwrap().append_child(&element).unwrap();
        element
    }

    #[wasm_bindgen_test]
    fn test_find_inputs_in_document_order() {
        let first = append("input", "dom-find-a", "dom-find");
        let second = append("input", "dom-find-b", "dom-find");

        let found = find_inputs(&Selector::Class("dom-find".to_string())).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id(), "dom-find-a");
        assert_eq!(found[1].id(), "dom-find-b");

        first.remove();
        second.remove();
    }

    #[wasm_bindgen_test]
    fn test_find_inputs_no_match() {
        let result = find_inputs(&Selector::Id("dom-find-missing".to_string()));
        assert!(matches!(result, Err(PickerError::NoMatch(_))));
    }

    #[wasm_bindgen_test]
    fn test_find_inputs_rejects_non_inputs() {
        let div = append("div", "dom-find-div", "");
        let result = find_first_input(&Selector::Id("dom-find-div".to_string()));
        assert!(matches!(result, Err(PickerError::NotAnInput(_))));
        div.remove();
    }
}
