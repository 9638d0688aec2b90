mod load;
mod name;

pub use load::{html_path, load_html, load_metadata, meta_path};
pub use name::TemplateName;
