//! Server-rendered pages. Layout is static; charts are drawn in the browser
//! from the JSON API.

use axum::response::Html;

const HOME: &str = include_str!("../assets/home.html");
const ANALYSIS: &str = include_str!("../assets/analysis.html");

pub async fn home() -> Html<&'static str> {
    Html(HOME)
}

pub async fn analysis() -> Html<&'static str> {
    Html(ANALYSIS)
}
