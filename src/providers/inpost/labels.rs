//! Label retrieval

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::io::SeekFrom;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, instrument, warn};

use crate::domain::{CourierError, Label, LabelFile, LabelFormat};
use crate::providers::http_client::{path_segment, ApiRequest};
use crate::providers::traits::CourierGetLabels;
use super::errors::{from_io, from_transport};
use super::session::InpostSession;

const API_PATH: &str = "/v1/shipments/:shipment_id/label";
const BATCH_API_PATH: &str = "/v1/organizations/:organization_id/shipments/labels";

/// Where a label request goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelTarget {
    Single(String),
    Batch(Vec<String>),
}

impl LabelTarget {
    /// A comma anywhere in the input selects the batch endpoint.
    ///
    /// An id that itself contains a comma would be routed as a batch; ShipX
    /// ids are numeric so this is not guarded against. Input made only of
    /// commas and blanks yields an empty batch, which is never sent.
    pub fn parse(shipment_ids: &str) -> Self {
        if shipment_ids.contains(',') {
            LabelTarget::Batch(
                shipment_ids
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        } else {
            LabelTarget::Single(shipment_ids.to_string())
        }
    }
}

/// ShipX label operations
#[derive(Debug, Clone)]
pub struct InpostCourierGetLabels {
    session: InpostSession,
}

impl InpostCourierGetLabels {
    pub fn new(session: InpostSession) -> Self {
        InpostCourierGetLabels { session }
    }

    fn path(shipment_id: &str) -> String {
        API_PATH.replace(":shipment_id", &path_segment(shipment_id))
    }

    fn batch_path(&self) -> String {
        BATCH_API_PATH.replace(":organization_id", &path_segment(self.session.parameters().organization_id()))
    }

    /// Build the label file request for a single id or a batch
    ///
    /// Fails when the input names no id at all (e.g. `","`).
    pub fn label_file_request(&self, shipment_ids: &str, format: LabelFormat) -> Result<ApiRequest, CourierError> {
        let label_type = self.session.parameters().label_type();

        match LabelTarget::parse(shipment_ids) {
            LabelTarget::Single(id) => Ok(ApiRequest::get(Self::path(&id))
                .query("type", label_type)
                .query("format", format.as_str())),
            LabelTarget::Batch(ids) if ids.is_empty() => Err(CourierError::Unexpected {
                message: format!("no shipment ids given in '{}'", shipment_ids),
                code: 0,
            }),
            LabelTarget::Batch(ids) => Ok(ids.into_iter().fold(
                ApiRequest::get(self.batch_path())
                    .query("type", label_type)
                    .query("format", format.as_str()),
                |request, id| request.query("shipment_ids[]", id),
            )),
        }
    }

    /// Label content is text (base64 by default); binary bodies belong to
    /// `get_label_file`.
    async fn fetch_label(&self, shipment_id: &str) -> Result<String, CourierError> {
        let request = ApiRequest::get(Self::path(shipment_id))
            .query("type", self.session.parameters().label_type());

        let response = self.session.client().send(request).await.map_err(from_transport)?;
        String::from_utf8(response.body.to_vec()).map_err(|e| CourierError::Unexpected {
            message: format!("label body is not valid UTF-8 text: {}", e.utf8_error()),
            code: 0,
        })
    }

    /// Stream the label into an anonymous temporary file and read it back.
    /// The file is removed when it goes out of scope, on every path.
    async fn download_label(&self, request: ApiRequest) -> Result<Bytes, CourierError> {
        let mut sink = tokio::fs::File::from_std(tempfile::tempfile().map_err(from_io)?);

        let mut body = self.session.client().stream(request).await.map_err(from_transport)?;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(from_transport)?;
            sink.write_all(&chunk).await.map_err(from_io)?;
        }
        sink.flush().await.map_err(from_io)?;

        sink.seek(SeekFrom::Start(0)).await.map_err(from_io)?;
        let mut contents = Vec::new();
        sink.read_to_end(&mut contents).await.map_err(from_io)?;

        debug!(bytes = contents.len(), "Label downloaded");
        Ok(Bytes::from(contents))
    }
}

#[async_trait]
impl CourierGetLabels for InpostCourierGetLabels {
    #[instrument(skip(self))]
    async fn get_label(&self, shipment_id: &str) -> Label {
        match self.fetch_label(shipment_id).await {
            Ok(content) => Label::Content(content),
            Err(err) => {
                warn!(error = %err, "Label request failed");
                Label::failure(err)
            }
        }
    }

    #[instrument(skip(self), fields(format = %format))]
    async fn get_label_file(&self, shipment_ids: &str, format: LabelFormat) -> LabelFile {
        let result = match self.label_file_request(shipment_ids, format) {
            Ok(request) => self.download_label(request).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(data) => LabelFile::Data(data),
            Err(err) => {
                warn!(error = %err, "Label file request failed");
                LabelFile::failure(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use crate::providers::inpost::test_support::{session, FakeTransport, Reply};
    use std::sync::Arc;

    fn courier(transport: &Arc<FakeTransport>) -> InpostCourierGetLabels {
        InpostCourierGetLabels::new(session(transport.clone()))
    }

    #[test]
    fn test_label_target_parse() {
        assert_eq!(LabelTarget::parse("111"), LabelTarget::Single("111".to_string()));
        assert_eq!(
            LabelTarget::parse("111,222"),
            LabelTarget::Batch(vec!["111".to_string(), "222".to_string()])
        );
        assert_eq!(
            LabelTarget::parse("111, 222,"),
            LabelTarget::Batch(vec!["111".to_string(), "222".to_string()])
        );
    }

    #[tokio::test]
    async fn test_get_label() {
        let transport = FakeTransport::new([Reply::Ok("JVBERi0xLjcKOCAwIG9iago8PCAv")]);

        let label = courier(&transport).get_label("123").await;

        assert_eq!(label.content(), Some("JVBERi0xLjcKOCAwIG9iago8PCAv"));
        assert!(label.errors().is_empty());

        let request = transport.last_request();
        assert_eq!(request.path, "/v1/shipments/123/label");
        assert_eq!(request.query, vec![("type".to_string(), "A6".to_string())]);
    }

    #[tokio::test]
    async fn test_get_label_failure() {
        let transport = FakeTransport::new([Reply::Status(
            404,
            r#"{"status":404,"error":"resource_not_found","message":"Resource not found"}"#,
        )]);

        let label = courier(&transport).get_label("123").await;

        assert_eq!(label.content(), None);
        assert_eq!(label.errors().len(), 1);
        assert_eq!(label.first_error().unwrap().kind(), ErrorKind::Transport);
        assert_eq!(label.first_error().unwrap().to_string(), "Resource not found");
    }

    #[tokio::test]
    async fn test_get_label_rejects_binary_body() {
        let transport = FakeTransport::new([Reply::Binary(b"%PDF-1.7\n\xe2\xe3\xcf\xd3")]);

        let label = courier(&transport).get_label("123").await;

        assert_eq!(label.content(), None);
        assert_eq!(label.errors().len(), 1);
        let err = label.first_error().unwrap();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.to_string().starts_with("label body is not valid UTF-8"));
    }

    #[tokio::test]
    async fn test_get_label_escapes_shipment_id() {
        let transport = FakeTransport::new([Reply::Ok("JVBERi0x"), Reply::Ok("%PDF")]);
        let courier = courier(&transport);

        courier.get_label("12/34?x").await;
        assert_eq!(transport.last_request().path, "/v1/shipments/12%2F34%3Fx/label");

        courier.get_label_file("5#6", LabelFormat::Pdf).await;
        assert_eq!(transport.last_request().path, "/v1/shipments/5%236/label");
    }

    #[tokio::test]
    async fn test_get_label_file_without_ids() {
        let transport = FakeTransport::new(Vec::<Reply>::new());

        let file = courier(&transport).get_label_file(" , ", LabelFormat::Pdf).await;

        assert_eq!(file.data(), None);
        assert_eq!(file.errors().len(), 1);
        assert_eq!(file.first_error().unwrap().kind(), ErrorKind::Unexpected);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_label_file_binary() {
        let transport = FakeTransport::new([Reply::Binary(b"%PDF\x00\xff\xfe\x01")]);

        let file = courier(&transport).get_label_file("111", LabelFormat::Pdf).await;

        assert_eq!(file.data(), Some(&b"%PDF\x00\xff\xfe\x01"[..]));
    }

    #[tokio::test]
    async fn test_get_label_file_single() {
        let transport = FakeTransport::new([Reply::Ok("%PDF-1.7 single label")]);

        let file = courier(&transport).get_label_file("111", LabelFormat::Pdf).await;

        assert_eq!(file.data(), Some(&b"%PDF-1.7 single label"[..]));

        let request = transport.last_request();
        assert_eq!(request.path, "/v1/shipments/111/label");
        assert_eq!(request.query_values("type"), vec!["A6"]);
        assert_eq!(request.query_values("format"), vec!["pdf"]);
        assert!(request.query_values("shipment_ids[]").is_empty());
    }

    #[tokio::test]
    async fn test_get_label_file_batch() {
        let transport = FakeTransport::new([Reply::Ok("^XA batch ^XZ")]);

        let file = courier(&transport).get_label_file("111,222", LabelFormat::Zpl).await;

        assert_eq!(file.into_result().unwrap(), Bytes::from_static(b"^XA batch ^XZ"));

        let request = transport.last_request();
        assert_eq!(request.path, "/v1/organizations/1234/shipments/labels");
        assert_eq!(request.query_values("format"), vec!["zpl"]);
        assert_eq!(request.query_values("shipment_ids[]"), vec!["111", "222"]);
    }

    #[tokio::test]
    async fn test_get_label_file_transport_error() {
        let transport = FakeTransport::new([Reply::Status(400, r#"{"message":"Invalid format"}"#)]);

        let file = courier(&transport).get_label_file("111", LabelFormat::Epl).await;

        assert_eq!(file.data(), None);
        assert_eq!(
            file.errors(),
            &[CourierError::Transport {
                status: 400,
                message: "Invalid format".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_get_label_file_broken_stream() {
        let transport = FakeTransport::new([Reply::BrokenStream("%PDF")]);

        let file = courier(&transport).get_label_file("111", LabelFormat::Pdf).await;

        let err = file.first_error().unwrap();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(err.code(), 104);
        assert!(file.data().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_label_requests_share_session() {
        let transport = FakeTransport::new([Reply::Ok("one"), Reply::Ok("two")]);
        let courier = courier(&transport);

        let (first, second) = tokio::join!(courier.get_label("1"), courier.get_label("2"));

        let mut contents = vec![first.into_result().unwrap(), second.into_result().unwrap()];
        contents.sort();
        assert_eq!(contents, vec!["one", "two"]);
        assert_eq!(transport.requests().len(), 2);
    }
}
