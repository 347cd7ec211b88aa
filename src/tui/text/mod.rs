//! Text helpers for the chat transcript and detail view.

mod wrap;

pub(crate) use wrap::wrap_paragraphs;
