pub mod lexicon;
pub mod translator;
pub mod word_info;

pub use lexicon::{BOKMAL, bokmal};
pub use translator::NorwegianTranslator;
pub use word_info::NorwegianWordInfo;
