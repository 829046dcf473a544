mod ol_prefix;
mod ul_indent;
mod ul_style;

pub use ol_prefix::OlPrefix;
pub use ul_indent::UlIndent;
pub use ul_style::UlStyle;
