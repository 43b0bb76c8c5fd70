use reqwest::multipart::{Form, Part};
use tracing::info;

use super::{ApiClient, reject_if_error};
use crate::error::{ClientError, ClientResult};
use crate::media::MediaAttachment;
use crate::models::gigs::{FormValues, GigDetailResponse};

impl ApiClient {
    /// `POST /gigs/create` as multipart: the form fields plus one `files` part
    /// per attachment.
    pub async fn create_gig(
        &self,
        values: &FormValues,
        attachments: &[MediaAttachment],
    ) -> ClientResult<()> {
        let mut form = Form::new()
            .text("title", values.title.clone())
            .text("description", values.description.clone())
            .text("price", values.price.to_string())
            .text("category_id", values.category.clone())
            .text("duration", values.delivery_time.to_string());
        for attachment in attachments {
            let part = Part::bytes(attachment.file.bytes.clone())
                .file_name(attachment.file.file_name.clone())
                .mime_str(&attachment.file.mime_type)?;
            form = form.part("files", part);
        }

        self.send_unit(self.post("/gigs/create").multipart(form), "Failed to create gig")
            .await?;
        info!(title = %values.title, files = attachments.len(), "Gig submitted");
        Ok(())
    }

    /// `GET /{id}/get-gig-detail`
    pub async fn gig_detail(&self, gig_id: &str) -> ClientResult<GigDetailResponse> {
        let response: GigDetailResponse = self
            .send(self.get(&format!("/{gig_id}/get-gig-detail")))
            .await?;
        reject_if_error(&response.envelope, "Failed to load gig")?;
        if response.gig.is_none() {
            return Err(ClientError::NotFound(format!("Gig {gig_id} not found")));
        }
        Ok(response)
    }
}
