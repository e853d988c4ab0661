mod answer_selector;

pub use answer_selector::*;
