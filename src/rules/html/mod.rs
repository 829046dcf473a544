mod no_inline_html;

pub use no_inline_html::NoInlineHtml;
