//! Helpers shared by the unit tests.
#![allow(missing_docs)]

mod html;
mod http;

pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::{assert_content_type, get_header};
