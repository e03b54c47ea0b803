use crate::maps_client::{MapsClient, MapsError, MapsResult, ensure_success};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{instrument, warn};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recommendations {
    #[serde(default)]
    pub hotels: Vec<RecommendationItem>,
    #[serde(default)]
    pub restaurants: Vec<RecommendationItem>,
    #[serde(default)]
    pub attractions: Vec<RecommendationItem>,
}

impl Recommendations {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty() && self.restaurants.is_empty() && self.attractions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecommendationItem {
    pub name: String,
    #[serde(default, alias = "sentiment")]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Price band for hotels, cuisine for restaurants, kind of place for attractions.
    #[serde(default, alias = "price", alias = "cuisine", alias = "type")]
    pub category: Option<String>,
}

fn recommendation_prompt(destination: &str) -> String {
    format!(
        r#"Act as a travel guide. For the destination "{destination}", provide top recommendations.
Return ONLY a raw JSON object with this exact structure (no markdown, no backticks):
{{
  "hotels": [{{"name": "Hotel Name", "rating": 4.5, "price": "High/Mid/Budget", "description": "Brief description"}}],
  "restaurants": [{{"name": "Restaurant Name", "rating": 4.8, "cuisine": "Type", "description": "Brief description"}}],
  "attractions": [{{"name": "Attraction Name", "type": "History/Nature/etc", "description": "Brief description"}}]
}}
Provide 5 items for each category."#
    )
}

/// Removes a surrounding markdown code fence (with or without a `json` tag).
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub fn parse_recommendations(text: &str) -> serde_json::Result<Recommendations> {
    serde_json::from_str(strip_code_fences(text))
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

impl MapsClient {
    /// Asks the language model for hotels, restaurants and attractions at `destination`.
    pub async fn fetch_recommendations(&self, destination: &str) -> MapsResult<Recommendations> {
        let api_key = self.api_key.as_deref().ok_or(MapsError::MissingApiKey)?;
        let body = json!({
            "model": self.llm_model,
            "messages": [{ "role": "user", "content": recommendation_prompt(destination) }],
            "temperature": 0.7,
        });
        let response = self
            .http
            .post(format!("{}/chat/completions", self.llm_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let completion: CompletionResponse = ensure_success(response).await?.json().await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| MapsError::UnexpectedResponse("empty completion".to_owned()))?;
        Ok(parse_recommendations(&content)?)
    }

    /// Recommendations for the map sidebar. Empty when the service is unconfigured or fails.
    #[instrument(skip(self))]
    pub async fn recommendations(&self, destination: &str) -> Recommendations {
        match self.fetch_recommendations(destination).await {
            Ok(recommendations) => recommendations,
            Err(MapsError::MissingApiKey) => Recommendations::default(),
            Err(e) => {
                warn!("Recommendations unavailable for {destination}: {e}");
                Recommendations::default()
            }
        }
    }
}
