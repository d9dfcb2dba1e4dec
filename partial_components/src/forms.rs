//! Small form conveniences.

use std::rc::Rc;

use partial::prelude::*;
use web_sys::{Element, Event, HtmlInputElement};

/// Write the chosen file name(s) into the `.file-name` label of the
/// enclosing Bulma `.file` block
pub fn show_upload_filename(_controller: &Rc<Controller>, element: &Element, _event: &Event) {
    let Some(input) = element.dyn_ref::<HtmlInputElement>() else {
        return;
    };

    let mut names = Vec::new();
    if let Some(files) = input.files() {
        for index in 0..files.length() {
            if let Some(file) = files.get(index) {
                names.push(file.name());
            }
        }
    }

    let label = dom::closest(element, ".file")
        .and_then(|block| block.query_selector(".file-name").ok().flatten());

    if let Some(label) = label {
        label.set_text_content(Some(&display_names(&names)));
    }
}

pub fn display_names(names: &[String]) -> String {
    names.join(", ")
}

/// Fill the field named by the `date_field` attribute with the current time
pub fn set_now(_controller: &Rc<Controller>, element: &Element, event: &Event) {
    event.prevent_default();

    let Some(field) = dom::attr(element, "date_field")
        .and_then(|id| dom::document().ok()?.get_element_by_id(&id))
    else {
        return;
    };

    let now = js_sys::Date::new_0();
    let value = format_timestamp(
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date(),
        now.get_hours(),
        now.get_minutes(),
        now.get_seconds(),
    );

    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.set_value(&value);
    } else {
        let _ = field.set_attribute("value", &value);
    }
}

/// `YYYY-MM-DD hh:mm:ss`
pub fn format_timestamp(year: u32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> String {
    format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_zero_padded() {
        assert_eq!(format_timestamp(2024, 3, 7, 9, 5, 0), "2024-03-07 09:05:00");
        assert_eq!(format_timestamp(1999, 12, 31, 23, 59, 59), "1999-12-31 23:59:59");
    }

    #[test]
    fn several_files_are_listed() {
        assert_eq!(display_names(&[]), "");
        assert_eq!(
            display_names(&["a.png".to_owned(), "b.pdf".to_owned()]),
            "a.png, b.pdf"
        );
    }
}
