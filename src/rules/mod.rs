//! The builtin rule catalog.
//!
//! Each rule is a stateless unit struct implementing [`crate::linter::Rule`].
//! Rules are grouped by the aspect of the document they inspect.

mod headings;
mod html;
mod lists;
mod whitespace;

pub use headings::{HeadingStyleRule, NoDuplicateHeading, NoTrailingPunctuation};
pub use html::NoInlineHtml;
pub use lists::{OlPrefix, UlIndent, UlStyle};
pub use whitespace::{LineLength, NoHardTabs, NoMultipleBlanks, TrailingNewline};
