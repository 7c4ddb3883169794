use customers_core_api::domain::WatchlistMatch;
use serde::Deserialize;

/// Body of `GET /search`. Only the SDN list is read.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "SDNs", default)]
    pub sdns: Vec<OfacSdn>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfacSdn {
    #[serde(rename = "entityID")]
    pub entity_id: String,
    #[serde(rename = "sdnName")]
    pub sdn_name: String,
    #[serde(rename = "sdnType", default)]
    pub sdn_type: String,
    #[serde(rename = "match")]
    pub match_score: f64,
}

impl From<OfacSdn> for WatchlistMatch {
    fn from(sdn: OfacSdn) -> Self {
        WatchlistMatch {
            entity_id: sdn.entity_id,
            display_name: sdn.sdn_name,
            category: sdn.sdn_type,
            match_score: sdn.match_score,
        }
    }
}
