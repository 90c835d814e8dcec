//! Chart visualization API

use super::BackendClient;
use crate::models::DatabaseKind;
use anyhow::Result;

impl BackendClient {
    /// Request a rendered chart, returning the raw image bytes
    pub async fn fetch_visualization(
        &self,
        kind: DatabaseKind,
        user_input: &str,
        chart_type: &str,
        vis_requirement: &str,
    ) -> Result<Vec<u8>> {
        let endpoint = format!(
            "{}?user_input={}&chart_type={}&vis_requirement={}",
            kind.visualization_endpoint(),
            urlencoding::encode(user_input),
            urlencoding::encode(chart_type),
            urlencoding::encode(vis_requirement),
        );
        self.get_bytes(&endpoint).await
    }
}
