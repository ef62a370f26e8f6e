//! Machine translation of locale messages.

mod error;
mod openai;

use std::future::Future;

pub use error::TranslateError;
pub use openai::{API_KEY_ENV, OpenAiTranslator, language_name};

/// Translates one message at a time.
///
/// Callers treat any error as recoverable and keep the source text.
pub trait Translator {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> impl Future<Output = Result<String, TranslateError>>;
}
