use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;

/// A file picked by the user, passed to the backend unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl Upload {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime: content_type(file_name),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(&file_name, bytes))
    }

    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }
}

fn content_type(file_name: &str) -> &'static str {
    let lower_name = file_name.to_lowercase();
    if lower_name.ends_with(".pdf") {
        "application/pdf"
    } else if lower_name.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower_name.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobDescription {
    Text(String),
    File(Upload),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please upload a resume and provide a job description (text or file).")]
    MissingInput,
}

/// Everything needed for one `POST /api/analyze`. Only constructible through
/// [`AnalysisRequest::build`], so a value of this type is always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    resume: Upload,
    job_description: JobDescription,
    github_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    File(&'a Upload),
}

/// One multipart form field, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField<'a> {
    pub name: &'static str,
    pub value: FieldValue<'a>,
}

impl AnalysisRequest {
    /// A job description file takes precedence over text, matching the form
    /// where picking a file clears the pasted text.
    pub fn build(
        resume: Option<Upload>,
        jd_text: &str,
        jd_file: Option<Upload>,
        github_url: &str,
    ) -> Result<Self, ValidationError> {
        let resume = resume.ok_or(ValidationError::MissingInput)?;

        let job_description = match jd_file {
            Some(file) => JobDescription::File(file),
            None if !jd_text.trim().is_empty() => JobDescription::Text(jd_text.to_string()),
            None => return Err(ValidationError::MissingInput),
        };

        let github_url = Some(github_url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(Self {
            resume,
            job_description,
            github_url,
        })
    }

    pub fn resume(&self) -> &Upload {
        &self.resume
    }

    pub fn job_description(&self) -> &JobDescription {
        &self.job_description
    }

    pub fn github_url(&self) -> Option<&str> {
        self.github_url.as_deref()
    }

    pub fn fields(&self) -> Vec<FormField<'_>> {
        let mut fields = vec![FormField {
            name: "resume",
            value: FieldValue::File(&self.resume),
        }];

        fields.push(match &self.job_description {
            JobDescription::Text(text) => FormField {
                name: "job_description",
                value: FieldValue::Text(text),
            },
            JobDescription::File(file) => FormField {
                name: "jd_file",
                value: FieldValue::File(file),
            },
        });

        if let Some(url) = &self.github_url {
            fields.push(FormField {
                name: "github_url",
                value: FieldValue::Text(url),
            });
        }

        fields
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields().iter().map(|f| f.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume() -> Upload {
        Upload::new("resume.pdf", b"%PDF-1.4 fake".to_vec())
    }

    #[test]
    fn test_build_requires_resume() {
        let result = AnalysisRequest::build(None, "Senior Go Engineer", None, "");
        assert_eq!(result, Err(ValidationError::MissingInput));
    }

    #[test]
    fn test_build_requires_job_description() {
        let result = AnalysisRequest::build(Some(resume()), "", None, "");
        assert_eq!(result, Err(ValidationError::MissingInput));

        // Whitespace only counts as empty
        let result = AnalysisRequest::build(Some(resume()), "  \n\t", None, "");
        assert_eq!(result, Err(ValidationError::MissingInput));
    }

    #[test]
    fn test_text_job_description_fields() {
        let request =
            AnalysisRequest::build(Some(resume()), "Senior Go Engineer", None, "").unwrap();
        assert_eq!(request.field_names(), vec!["resume", "job_description"]);

        let fields = request.fields();
        assert_eq!(fields[1].value, FieldValue::Text("Senior Go Engineer"));
    }

    #[test]
    fn test_file_job_description_fields() {
        let jd = Upload::new("jd.txt", b"We need a Rust engineer".to_vec());
        let request = AnalysisRequest::build(Some(resume()), "", Some(jd.clone()), "").unwrap();
        assert_eq!(request.field_names(), vec!["resume", "jd_file"]);
        assert_eq!(request.job_description(), &JobDescription::File(jd));
    }

    #[test]
    fn test_file_wins_over_text() {
        let jd = Upload::new("jd.pdf", vec![1, 2, 3]);
        let request = AnalysisRequest::build(Some(resume()), "stale text", Some(jd), "").unwrap();
        assert_eq!(request.field_names(), vec!["resume", "jd_file"]);
    }

    #[test]
    fn test_github_url_only_when_present() {
        let request = AnalysisRequest::build(Some(resume()), "JD", None, "   ").unwrap();
        assert!(request.github_url().is_none());
        assert!(!request.field_names().contains(&"github_url"));

        let request =
            AnalysisRequest::build(Some(resume()), "JD", None, " https://github.com/octo ").unwrap();
        assert_eq!(request.github_url(), Some("https://github.com/octo"));
        assert_eq!(
            request.field_names(),
            vec!["resume", "job_description", "github_url"]
        );
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(Upload::new("CV.PDF", vec![]).mime, "application/pdf");
        assert_eq!(
            Upload::new("cv.docx", vec![]).mime,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(Upload::new("jd.txt", vec![]).mime, "text/plain");
        assert_eq!(Upload::new("cv.odt", vec![]).mime, "application/octet-stream");
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = Upload::from_path(Path::new("/definitely/not/here/resume.pdf"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_from_path_reads_bytes() {
        let path = std::env::temp_dir().join(format!("skillgap-upload-{}.txt", std::process::id()));
        std::fs::write(&path, b"hello").unwrap();
        let upload = Upload::from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(upload.bytes, b"hello");
        assert_eq!(upload.mime, "text/plain");
        assert!(upload.file_name.starts_with("skillgap-upload-"));
    }
}
