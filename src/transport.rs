use anyhow::{Context, Result};
use reqwest::blocking::multipart::{Form, Part};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::AnalysisResult;
use crate::request::{AnalysisRequest, FieldValue, JobDescription};

pub const ANALYZE_PATH: &str = "/api/analyze";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Analysis request failed: HTTP status {status}")]
    RequestFailed { status: u16 },

    #[error("Could not reach the analysis service: {0}")]
    Transport(String),

    #[error("Unexpected response from the analysis service: {0}")]
    Decode(String),
}

/// Sends one analysis request to the backend.
pub trait Transport: Send + Sync {
    fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, TransportError>;
}

#[derive(Debug)]
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        // Analysis may take arbitrarily long; the call is never timed out.
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            endpoint: endpoint_url(base_url),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH)
}

fn build_form(request: &AnalysisRequest) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for field in request.fields() {
        form = match field.value {
            FieldValue::Text(text) => form.text(field.name, text.to_string()),
            FieldValue::File(upload) => {
                let part = Part::bytes(upload.bytes.clone())
                    .file_name(upload.file_name.clone())
                    .mime_str(upload.mime)
                    .map_err(|e| TransportError::Transport(e.to_string()))?;
                form.part(field.name, part)
            }
        };
    }
    Ok(form)
}

impl Transport for HttpTransport {
    fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, TransportError> {
        let form = build_form(request)?;
        let jd_source = match request.job_description() {
            JobDescription::Text(_) => "text",
            JobDescription::File(_) => "file",
        };

        info!(
            endpoint = %self.endpoint,
            fields = ?request.field_names(),
            resume = %request.resume().file_name,
            jd_source,
            github = request.github_url().is_some(),
            "Submitting analysis request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| {
                warn!(error = %e, "Analysis request could not be sent");
                TransportError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Analysis service returned an error status");
            return Err(TransportError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| TransportError::Transport(e.to_string()))?;

        let result: AnalysisResult = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Analysis response did not match the expected shape");
            TransportError::Decode(e.to_string())
        })?;

        info!(score = result.score, "Analysis complete");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_result_json;
    use crate::request::Upload;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serves exactly one HTTP exchange on a loopback port and hands back the
    /// raw request it received.
    fn serve_once(status_line: &'static str, body: String) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let raw = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            tx.send(raw).unwrap();
        });

        (base_url, rx)
    }

    fn read_request(stream: &mut std::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(boundary) = multipart_boundary(&text) {
                if text.contains(&format!("--{}--", boundary)) {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn multipart_boundary(raw: &str) -> Option<String> {
        let header_end = raw.find("\r\n\r\n")?;
        raw[..header_end]
            .lines()
            .find(|line| line.to_lowercase().starts_with("content-type:"))
            .and_then(|line| line.split("boundary=").nth(1))
            .map(|b| b.trim().to_string())
    }

    fn text_request() -> AnalysisRequest {
        AnalysisRequest::build(
            Some(Upload::new("resume.pdf", b"%PDF-1.4".to_vec())),
            "Senior Go Engineer",
            None,
            "",
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_url_joins_path() {
        assert_eq!(endpoint_url("http://localhost:8001"), "http://localhost:8001/api/analyze");
        assert_eq!(endpoint_url("http://localhost:8001/"), "http://localhost:8001/api/analyze");
    }

    #[test]
    fn test_submit_posts_multipart_with_text_job_description() {
        let (base_url, rx) = serve_once("200 OK", sample_result_json().to_string());
        let transport = HttpTransport::new(&base_url).unwrap();

        let result = transport.submit(&text_request()).unwrap();
        assert_eq!(result.score, 68.5);

        let raw = rx.recv().unwrap();
        assert!(raw.starts_with("POST /api/analyze HTTP/1.1"));
        assert!(raw.to_lowercase().contains("content-type: multipart/form-data"));
        assert!(raw.contains("name=\"resume\"; filename=\"resume.pdf\""));
        assert!(raw.contains("name=\"job_description\""));
        assert!(raw.contains("Senior Go Engineer"));
        assert!(!raw.contains("name=\"jd_file\""));
        assert!(!raw.contains("name=\"github_url\""));
    }

    #[test]
    fn test_submit_posts_jd_file() {
        let (base_url, rx) = serve_once("200 OK", sample_result_json().to_string());
        let transport = HttpTransport::new(&base_url).unwrap();
        let request = AnalysisRequest::build(
            Some(Upload::new("resume.docx", b"docx".to_vec())),
            "",
            Some(Upload::new("jd.txt", b"Rust engineer wanted".to_vec())),
            "https://github.com/octocat",
        )
        .unwrap();

        transport.submit(&request).unwrap();

        let raw = rx.recv().unwrap();
        assert!(raw.contains("name=\"jd_file\"; filename=\"jd.txt\""));
        assert!(!raw.contains("name=\"job_description\""));
        assert!(raw.contains("name=\"github_url\""));
        assert!(raw.contains("https://github.com/octocat"));
    }

    #[test]
    fn test_submit_maps_error_status() {
        let (base_url, _rx) = serve_once("500 Internal Server Error", "{\"detail\":\"boom\"}".to_string());
        let transport = HttpTransport::new(&base_url).unwrap();

        let err = transport.submit(&text_request()).unwrap_err();
        assert!(matches!(err, TransportError::RequestFailed { status: 500 }));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_submit_maps_malformed_body() {
        let (base_url, _rx) = serve_once("200 OK", "<html>not json</html>".to_string());
        let transport = HttpTransport::new(&base_url).unwrap();

        let err = transport.submit(&text_request()).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn test_submit_maps_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let transport = HttpTransport::new(&format!("http://127.0.0.1:{}", port)).unwrap();

        let err = transport.submit(&text_request()).unwrap_err();
        assert!(matches!(err, TransportError::Transport(_)));
    }
}
