use super::ApiClient;
use crate::error::ClientResult;
use crate::models::complaints::Complaint;

impl ApiClient {
    /// `POST /complaint/{gigId}/create`
    pub async fn report_gig(&self, gig_id: &str, complaint: &Complaint) -> ClientResult<()> {
        let gig_id = gig_id.rsplit('/').next().unwrap_or(gig_id).trim();
        self.send_unit(
            self.post(&format!("/complaint/{gig_id}/create")).json(complaint),
            "Failed to send report",
        )
        .await
    }
}
