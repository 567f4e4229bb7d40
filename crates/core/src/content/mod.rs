//! The site-content document: eleven named sections, a hard-coded
//! default for each, and a copy-on-edit buffer for the admin panel.

mod default;
mod editor;
mod model;
mod section;

pub use editor::EditingBuffer;
pub use model::{
    Colors, Cta, Feature, Hero, MenuItem, Navbar, NotFound, Popup, QuizQuestion, QuizSection, Seo,
    SiteContent, Stats, Testimonial,
};
pub use section::Section;
