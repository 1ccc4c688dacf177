use super::Languages;
use super::FALLBACK_NOTICE;
use crate::domain::models::LanguageMap;
use crate::domain::models::StubGateway;

#[tokio::test]
async fn it_uses_gateway_languages() {
    let mut languages = LanguageMap::new();
    languages.insert("english".to_string(), "en".to_string());
    languages.insert("italian".to_string(), "it".to_string());
    let gateway = StubGateway::mapping(&[]).with_languages(languages);

    let catalog = Languages::load(&gateway).await;

    assert!(catalog.notice.is_none());
    assert_eq!(
        catalog.languages.keys().collect::<Vec<&String>>(),
        vec!["english", "italian"]
    );
}

#[tokio::test]
async fn it_falls_back_when_the_gateway_fails() {
    let gateway = StubGateway::mapping(&[]);

    let catalog = Languages::load(&gateway).await;

    assert!(catalog.notice.is_some());
    assert_eq!(catalog.notice, Some(FALLBACK_NOTICE.to_string()));
    assert_eq!(
        catalog.languages.keys().collect::<Vec<&String>>(),
        vec!["arabic", "chinese", "english", "french", "german", "japanese", "russian", "spanish"]
    );
}

#[tokio::test]
async fn it_falls_back_on_empty_catalogs() {
    let gateway = StubGateway::mapping(&[]).with_languages(LanguageMap::new());

    let catalog = Languages::load(&gateway).await;

    assert!(catalog.notice.is_some());
}
