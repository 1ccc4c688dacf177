/// A trimmed down `GET /languages` response from a LibreTranslate server.
pub fn libretranslate_languages_fixture() -> &'static str {
    return r#"
[
  {
    "code": "en",
    "name": "English",
    "targets": ["de", "es", "fr"]
  },
  {
    "code": "fr",
    "name": "French",
    "targets": ["de", "en", "es"]
  },
  {
    "code": "de",
    "name": "German",
    "targets": ["en", "es", "fr"]
  },
  {
    "code": "es",
    "name": "Spanish",
    "targets": ["de", "en", "fr"]
  }
]
"#
    .trim();
}

/// A `translate_a/single` response for a two sentence translation from
/// English to French.
pub fn google_translation_fixture() -> &'static str {
    return r#"
[[["Bonjour le monde. ","Hello world. ",null,null,10],["Comment allez-vous ?","How are you?",null,null,10]],null,"en",null,null,null,null,[]]
"#
    .trim();
}
