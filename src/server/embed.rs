// Embed endpoint - share-card metadata for the dashboard
//
// Clients that render link previews read two copies of the same card:
// `fc:miniapp` (launch_miniapp) and the older `fc:frame` (launch_frame).

use super::ServerState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

const EMBED_VERSION: &str = "1";
const BUTTON_TITLE: &str = "Open Gas Checker";
const APP_NAME: &str = "Base Gas Checker";
const SPLASH_BACKGROUND: &str = "#0b0d12";

#[derive(Debug, Clone, Serialize)]
pub struct EmbedMetadata {
    #[serde(rename = "fc:miniapp")]
    pub miniapp: Embed,
    #[serde(rename = "fc:frame")]
    pub frame: Embed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Embed {
    pub version: String,
    pub image_url: String,
    pub button: EmbedButton,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedButton {
    pub title: String,
    pub action: EmbedAction,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub url: String,
    pub splash_image_url: String,
    pub splash_background_color: String,
}

impl EmbedMetadata {
    pub fn for_app(app_url: &str) -> Self {
        let embed = |kind: &str| Embed {
            version: EMBED_VERSION.to_string(),
            image_url: format!("{}/hero.png", app_url),
            button: EmbedButton {
                title: BUTTON_TITLE.to_string(),
                action: EmbedAction {
                    kind: kind.to_string(),
                    name: APP_NAME.to_string(),
                    url: app_url.to_string(),
                    splash_image_url: format!("{}/splash.png", app_url),
                    splash_background_color: SPLASH_BACKGROUND.to_string(),
                },
            },
        };

        Self {
            miniapp: embed("launch_miniapp"),
            frame: embed("launch_frame"),
        }
    }
}

/// Handler for GET /api/embed
pub async fn get_embed(State(state): State<Arc<ServerState>>) -> Json<EmbedMetadata> {
    Json(EmbedMetadata::for_app(&state.app_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_shape() {
        let value = serde_json::to_value(EmbedMetadata::for_app("https://gas.example")).unwrap();

        let miniapp = &value["fc:miniapp"];
        assert_eq!(miniapp["version"], "1");
        assert_eq!(miniapp["imageUrl"], "https://gas.example/hero.png");
        assert_eq!(miniapp["button"]["action"]["type"], "launch_miniapp");
        assert_eq!(
            miniapp["button"]["action"]["splashImageUrl"],
            "https://gas.example/splash.png"
        );
        assert_eq!(miniapp["button"]["action"]["splashBackgroundColor"], "#0b0d12");

        assert_eq!(value["fc:frame"]["button"]["action"]["type"], "launch_frame");
        assert_eq!(value["fc:frame"]["button"]["title"], miniapp["button"]["title"]);
    }
}
