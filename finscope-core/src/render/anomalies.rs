//! Anomaly cards, styled by lower-cased severity.

use serde::Serialize;

use crate::model::{Anomaly, SeverityLevel};

pub const RECOMMENDATION_PREFIX: &str = "💡 ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnomalyCard {
    /// `anomaly-<severity lower-cased>`.
    pub style_key: String,
    #[serde(skip)]
    pub level: SeverityLevel,
    /// Severity exactly as the backend sent it.
    pub badge: String,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

impl AnomalyCard {
    pub fn from_anomaly(a: &Anomaly) -> Self {
        Self {
            style_key: format!("anomaly-{}", a.severity.style_key()),
            level: a.severity.level(),
            badge: a.severity.to_string(),
            title: a.metric.clone(),
            description: a.description.clone(),
            recommendation: format!("{RECOMMENDATION_PREFIX}{}", a.recommendation),
        }
    }
}

pub fn cards(anomalies: &[Anomaly]) -> Vec<AnomalyCard> {
    anomalies.iter().map(AnomalyCard::from_anomaly).collect()
}
