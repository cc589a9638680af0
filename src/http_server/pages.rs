use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(include_str!("pages/index.html"))
}

pub async fn tgbot() -> Html<&'static str> {
    Html(include_str!("pages/tgbot.html"))
}

pub async fn tgbot_init() -> Html<&'static str> {
    Html(include_str!("pages/tgbot_init.html"))
}
