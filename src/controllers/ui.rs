use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET / - Browser front end for uploading examples and generating speech
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
