mod heading_style;
mod no_duplicate_heading;
mod no_trailing_punctuation;

pub use heading_style::HeadingStyleRule;
pub use no_duplicate_heading::NoDuplicateHeading;
pub use no_trailing_punctuation::NoTrailingPunctuation;
