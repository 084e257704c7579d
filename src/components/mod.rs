mod article_modal;
mod breadcrumbs;
mod help_modal;
mod search_palette;

pub use article_modal::ArticleModal;
pub use breadcrumbs::Breadcrumbs;
pub use help_modal::HelpModal;
pub use search_palette::SearchPalette;
