//! Shared page layout, styles and formatting helpers for the maud views.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, html};
use numfmt::{Formatter, Precision};

use crate::endpoints;

// Link styles
pub const LINK_STYLE: &str = "link";

pub const BUTTON_DELETE_STYLE: &str = "link link-delete";

pub const BUTTON_PRIMARY_STYLE: &str = "button";

// Form styles
pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_TEXT_INPUT_STYLE: &str = "form-input";

// Table styles
pub const TABLE_STYLE: &str = "table";
pub const TABLE_CELL_STYLE: &str = "table-cell";
pub const AMOUNT_CELL_STYLE: &str = "table-cell amount";

// Category badge style
pub const CATEGORY_BADGE_STYLE: &str = "badge";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "page";

/// Wrap `content` in the full HTML document.
///
/// `dark_mode` adds the `dark` class to the root element, which switches the
/// stylesheet's colours.
pub fn base(title: &str, dark_mode: bool, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class=[dark_mode.then_some("dark")]
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expense Tracker" }
                link href=(format!("{}/main.css", endpoints::STATIC)) rel="stylesheet";
            }

            body
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="error"
        {
            h1 class="error-code" { (header) }

            p class="error-description" { (description) }

            p { (fix) }

            a href=(endpoints::ROOT) class=(LINK_STYLE) { "Back to Expenses" }
        }
    );

    base(title, false, &content)
}

pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("\"$\" is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .expect("\"-$\" is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    let formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    };

    // numfmt drops trailing zeros, e.g. "12.30" comes out as "12.3" and "6.00" as "6".
    match formatted_string.split_once('.') {
        None => format!("{formatted_string}.00"),
        Some((_, decimals)) if decimals.len() == 1 => format!("{formatted_string}0"),
        Some(_) => formatted_string,
    }
}
