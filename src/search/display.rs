use std::{cell::RefCell, rc::Rc};

/// The text widget the search pipeline writes its results into.
pub trait TextDisplay {
  /// Replaces the displayed text.
  fn set_text(&mut self, text: &str);
}

/// An in-memory text display.
///
/// Clones share the same widget, so a test or a demo can keep one handle
/// while the screen owns another.
#[derive(Clone, Debug, Default)]
pub struct TextView(Rc<RefCell<TextViewState>>);

#[derive(Debug, Default)]
struct TextViewState {
  text: String,
  history: Vec<String>,
}

impl TextView {
  pub fn new() -> Self { Self::default() }

  /// The text currently displayed.
  pub fn text(&self) -> String { self.0.borrow().text.clone() }

  /// Every text ever written, oldest first, including writes that did not
  /// change what was displayed.
  pub fn history(&self) -> Vec<String> { self.0.borrow().history.clone() }
}

impl TextDisplay for TextView {
  fn set_text(&mut self, text: &str) {
    let mut state = self.0.borrow_mut();
    state.text = text.to_owned();
    state.history.push(text.to_owned());
  }
}

impl<D: TextDisplay + ?Sized> TextDisplay for Box<D> {
  fn set_text(&mut self, text: &str) { (**self).set_text(text) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[rxflow_macro::test]
  fn clones_share_text_and_history() {
    let view = TextView::new();
    let mut handle = view.clone();
    handle.set_text("abc");
    handle.set_text("");

    assert_eq!(view.text(), "");
    assert_eq!(view.history(), vec!["abc", ""]);
  }
}
