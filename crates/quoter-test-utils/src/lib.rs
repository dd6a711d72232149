pub mod sandbox;

pub use insta;

/// `insta::assert_snapshot!` with the letter date masked, since quotes are
/// always dated today.
#[macro_export]
macro_rules! assert_snapshot {
    ($name:expr, $value:expr) => {{
        let mut settings = $crate::insta::Settings::clone_current();
        settings.add_filter(r"\b\d{2} [A-Z][a-z]+ \d{4}\b", "[DATE]");
        settings.bind(|| {
            $crate::insta::assert_snapshot!($name, $value);
        });
    }};
}
