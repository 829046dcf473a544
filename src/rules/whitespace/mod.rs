mod line_length;
mod no_hard_tabs;
mod no_multiple_blanks;
mod trailing_newline;

pub use line_length::LineLength;
pub use no_hard_tabs::NoHardTabs;
pub use no_multiple_blanks::NoMultipleBlanks;
pub use trailing_newline::TrailingNewline;
